//! Return statement collection for a single function scope

use crate::ast::{BlockStatement, ReturnStatement, Statement};

/// Collect the `return` statements that belong to the scope owning
/// `statements`.
///
/// Both arms of conditionals, loop and labeled bodies, switch cases and
/// try/catch/finally blocks are followed. Nested functions, classes and
/// modules are not entered: their returns belong to them.
pub fn collect_returns(statements: &[Statement]) -> Vec<&ReturnStatement> {
    let mut found = Vec::new();
    for stmt in statements {
        collect_from_statement(stmt, &mut found);
    }
    found
}

fn collect_from_statement<'a>(stmt: &'a Statement, found: &mut Vec<&'a ReturnStatement>) {
    if stmt.is_scope_boundary() {
        return;
    }

    match stmt {
        Statement::Return(ret) => found.push(ret),
        Statement::If(if_stmt) => {
            collect_from_statement(&if_stmt.consequent, found);
            if let Some(alternate) = &if_stmt.alternate {
                collect_from_statement(alternate, found);
            }
        }
        Statement::Block(block) => collect_from_block(block, found),
        Statement::Loop(loop_stmt) => collect_from_statement(&loop_stmt.body, found),
        Statement::Labeled(labeled) => collect_from_statement(&labeled.body, found),
        Statement::Switch(switch) => {
            for case in &switch.cases {
                for inner in &case.consequent {
                    collect_from_statement(inner, found);
                }
            }
        }
        Statement::Try(try_stmt) => {
            collect_from_block(&try_stmt.block, found);
            if let Some(handler) = &try_stmt.handler {
                collect_from_block(handler, found);
            }
            if let Some(finalizer) = &try_stmt.finalizer {
                collect_from_block(finalizer, found);
            }
        }
        Statement::Variable(_) | Statement::Expression(_) | Statement::Throw(_) => {}
        Statement::Function(_) | Statement::Class(_) | Statement::Module(_) => {}
    }
}

fn collect_from_block<'a>(block: &'a BlockStatement, found: &mut Vec<&'a ReturnStatement>) {
    for inner in &block.statements {
        collect_from_statement(inner, found);
    }
}
