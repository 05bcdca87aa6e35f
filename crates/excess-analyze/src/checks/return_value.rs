//! Function and lambda return values
//!
//! A function's returns are compared against every return type its call
//! signatures declare (awaited for async functions). A return is reported
//! only when all declared return types reject it.

use super::{declared_return_types, Check, CheckContext};
use crate::compare::{Verdict, Violation};
use crate::issue::{FindingKind, Issue};
use excess_core::ast::{Expression, Function, FunctionBody, Program, Statement, VariableDeclarator};
use excess_core::{collect_returns, visit, HasNode, Span, TypeId, Visitor};

pub struct ReturnValueCheck;

impl Check for ReturnValueCheck {
    fn id(&self) -> &'static str {
        "excess-property.return"
    }

    fn description(&self) -> &'static str {
        "Detects returned objects carrying properties the return type does not declare"
    }

    fn check(&self, program: &Program, ctx: &mut CheckContext<'_>) -> Vec<Issue> {
        let mut visitor = ReturnVisitor {
            ctx,
            issues: Vec::new(),
        };
        visit(&mut visitor, program);
        visitor.issues
    }
}

struct ReturnVisitor<'c, 'a> {
    ctx: &'c mut CheckContext<'a>,
    issues: Vec<Issue>,
}

impl ReturnVisitor<'_, '_> {
    fn check_declaration(&mut self, func: &Function) {
        let return_types = declared_return_types(self.ctx.oracle, func.id);
        if return_types.is_empty() {
            return;
        }
        if let FunctionBody::Block { statements } = &func.body {
            self.check_returns(statements, &return_types);
        }
    }

    fn check_returns(&mut self, statements: &[Statement], return_types: &[TypeId]) {
        for ret in collect_returns(statements) {
            let Some(argument) = &ret.argument else {
                continue;
            };
            self.check_value(argument, return_types, ret.span);
        }
    }

    fn check_value(&mut self, value: &Expression, return_types: &[TypeId], at: Span) {
        let Some(actual) = self.ctx.oracle.type_at(value.node_id()) else {
            return;
        };
        if let Some(violation) = self.rejected_by_all(actual, return_types) {
            self.issues.push(Issue::finding(
                "excess-property.return",
                FindingKind::ExcessPropertyOnReturn,
                self.ctx.file_path.to_path_buf(),
                at,
                &violation,
            ));
        }
    }

    /// First violation, if every return type yields one. Unlike
    /// `all_conclusive_violate`, an inconclusive return type accepts the value.
    fn rejected_by_all(&mut self, actual: TypeId, return_types: &[TypeId]) -> Option<Violation> {
        let mut first = None;
        for &expected in return_types {
            match self.ctx.comparator.compare(actual, expected, "") {
                Verdict::Violation(violation) => {
                    first.get_or_insert(violation);
                }
                _ => return None,
            }
        }
        first
    }
}

impl Visitor for ReturnVisitor<'_, '_> {
    fn visit_statement(&mut self, stmt: &Statement) -> bool {
        if let Statement::Function(func) = stmt {
            self.check_declaration(func);
        }
        true
    }

    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator) {
        let Some(Expression::Function(func)) = &decl.init else {
            return;
        };
        let return_types = declared_return_types(self.ctx.oracle, decl.id);
        if return_types.is_empty() {
            return;
        }

        match &func.body {
            FunctionBody::Block { statements } => self.check_returns(statements, &return_types),
            FunctionBody::Expression { expression } => {
                self.check_value(expression, &return_types, decl.span)
            }
        }
    }
}
