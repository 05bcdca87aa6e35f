//! Annotated variable initializers
//!
//! `const user: User = value` compares the initializer's type against the
//! annotation. Declarators initialized with a block-bodied function are left
//! to the return check.

use super::{initializes_block_function, Check, CheckContext};
use crate::compare::Verdict;
use crate::issue::{FindingKind, Issue};
use excess_core::ast::{Program, VariableDeclarator};
use excess_core::{visit, HasNode, Visitor};

pub struct VariableInitializerCheck;

impl Check for VariableInitializerCheck {
    fn id(&self) -> &'static str {
        "excess-property.initializer"
    }

    fn description(&self) -> &'static str {
        "Detects initializers carrying properties the annotated type does not declare"
    }

    fn check(&self, program: &Program, ctx: &mut CheckContext<'_>) -> Vec<Issue> {
        let mut visitor = InitializerVisitor {
            ctx,
            issues: Vec::new(),
        };
        visit(&mut visitor, program);
        visitor.issues
    }
}

struct InitializerVisitor<'c, 'a> {
    ctx: &'c mut CheckContext<'a>,
    issues: Vec<Issue>,
}

impl Visitor for InitializerVisitor<'_, '_> {
    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator) {
        if !decl.annotated {
            return;
        }
        let Some(init) = &decl.init else {
            return;
        };
        let oracle = self.ctx.oracle;
        if initializes_block_function(oracle, decl) {
            return;
        }
        let (Some(actual), Some(expected)) = (oracle.type_at(init.node_id()), oracle.type_at(decl.id))
        else {
            return;
        };

        if let Verdict::Violation(violation) = self.ctx.comparator.compare(actual, expected, "") {
            self.issues.push(Issue::finding(
                "excess-property.initializer",
                FindingKind::ExcessPropertyOnValue,
                self.ctx.file_path.to_path_buf(),
                decl.span,
                &violation,
            ));
        }
    }
}
