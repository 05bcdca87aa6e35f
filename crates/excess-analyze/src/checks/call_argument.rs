//! Call arguments
//!
//! Each argument is compared against the parameter at its position in every
//! call signature of the callee. Overloads make the call ambiguous, so an
//! argument is only reported when no signature accepts it.

use super::{Check, CheckContext};
use crate::compare::{all_conclusive_violate, Verdict};
use crate::issue::{FindingKind, Issue};
use excess_core::ast::{CallExpression, Expression, Program};
use excess_core::{visit, HasNode, Visitor};

pub struct CallArgumentCheck;

impl Check for CallArgumentCheck {
    fn id(&self) -> &'static str {
        "excess-property.argument"
    }

    fn description(&self) -> &'static str {
        "Detects arguments carrying properties the parameter type does not declare"
    }

    fn check(&self, program: &Program, ctx: &mut CheckContext<'_>) -> Vec<Issue> {
        let mut visitor = CallArgumentVisitor {
            ctx,
            issues: Vec::new(),
        };
        visit(&mut visitor, program);
        visitor.issues
    }
}

struct CallArgumentVisitor<'c, 'a> {
    ctx: &'c mut CheckContext<'a>,
    issues: Vec<Issue>,
}

impl CallArgumentVisitor<'_, '_> {
    fn check_call(&mut self, call: &CallExpression) {
        let oracle = self.ctx.oracle;
        let Some(callee) = oracle.type_at(call.callee.node_id()) else {
            return;
        };
        let signatures = oracle.call_signatures_of(callee);
        if signatures.is_empty() {
            return;
        }

        for (position, argument) in call.arguments.iter().enumerate() {
            let Some(actual) = oracle.type_at(argument.node_id()) else {
                continue;
            };
            let comparator = &mut self.ctx.comparator;
            let verdicts: Vec<Verdict> = signatures
                .iter()
                .map(|sig| match sig.parameter_at(position) {
                    Some(expected) => comparator.compare(actual, expected, ""),
                    // no parameter here: the argument is taken as `any`
                    None => Verdict::NoViolation,
                })
                .collect();

            if let Some(violation) = all_conclusive_violate(verdicts) {
                self.issues.push(Issue::finding(
                    "excess-property.argument",
                    FindingKind::ExcessPropertyOnValue,
                    self.ctx.file_path.to_path_buf(),
                    call.span,
                    &violation,
                ));
            }
        }
    }
}

impl Visitor for CallArgumentVisitor<'_, '_> {
    fn visit_expression(&mut self, expr: &Expression) -> bool {
        if let Expression::Call(call) = expr {
            self.check_call(call);
        }
        true
    }
}
