//! Syntax tree visitor
//!
//! Provides a trait-based visitor pattern that checks can implement.
//! Default implementations handle traversal; checks override specific methods.
//! Unlike return-scope collection, the visitor descends into every nested
//! function, class and module.

use crate::ast::*;

/// Trait for visiting syntax nodes
///
/// Default implementations traverse child nodes. Override specific methods
/// to perform actions at those nodes.
pub trait Visitor {
    /// Called for each statement. Return `true` to continue traversal into children.
    fn visit_statement(&mut self, _stmt: &Statement) -> bool {
        true
    }

    /// Called for each expression. Return `true` to continue traversal into children.
    fn visit_expression(&mut self, _expr: &Expression) -> bool {
        true
    }

    /// Called for each variable declarator before its initializer is traversed.
    fn visit_variable_declarator(&mut self, _decl: &VariableDeclarator) {}

    /// Called for function declarations, function expressions and methods.
    fn visit_function(&mut self, _func: &Function) {}

    /// Visit a program (entry point)
    fn visit_program(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.traverse_statement(stmt);
        }
    }

    /// Traverse a statement and its children
    fn traverse_statement(&mut self, stmt: &Statement) {
        if !self.visit_statement(stmt) {
            return;
        }

        match stmt {
            Statement::Variable(var) => {
                for decl in &var.declarators {
                    self.visit_variable_declarator(decl);
                    if let Some(init) = &decl.init {
                        self.traverse_expression(init);
                    }
                }
            }
            Statement::Expression(expr_stmt) => {
                self.traverse_expression(&expr_stmt.expression);
            }
            Statement::Return(ret) => {
                if let Some(arg) = &ret.argument {
                    self.traverse_expression(arg);
                }
            }
            Statement::If(if_stmt) => {
                self.traverse_expression(&if_stmt.test);
                self.traverse_statement(&if_stmt.consequent);
                if let Some(alternate) = &if_stmt.alternate {
                    self.traverse_statement(alternate);
                }
            }
            Statement::Block(block) => self.traverse_block(block),
            Statement::Loop(loop_stmt) => {
                for expr in &loop_stmt.head {
                    self.traverse_expression(expr);
                }
                self.traverse_statement(&loop_stmt.body);
            }
            Statement::Labeled(labeled) => {
                self.traverse_statement(&labeled.body);
            }
            Statement::Switch(switch) => {
                self.traverse_expression(&switch.discriminant);
                for case in &switch.cases {
                    if let Some(test) = &case.test {
                        self.traverse_expression(test);
                    }
                    for inner in &case.consequent {
                        self.traverse_statement(inner);
                    }
                }
            }
            Statement::Try(try_stmt) => {
                self.traverse_block(&try_stmt.block);
                if let Some(handler) = &try_stmt.handler {
                    self.traverse_block(handler);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.traverse_block(finalizer);
                }
            }
            Statement::Throw(throw) => {
                self.traverse_expression(&throw.argument);
            }
            Statement::Function(func) => self.traverse_function(func),
            Statement::Class(class) => self.traverse_class(class),
            Statement::Module(module) => {
                for inner in &module.body {
                    self.traverse_statement(inner);
                }
            }
        }
    }

    /// Traverse a block's statements
    fn traverse_block(&mut self, block: &BlockStatement) {
        for inner in &block.statements {
            self.traverse_statement(inner);
        }
    }

    /// Traverse a function body
    fn traverse_function(&mut self, func: &Function) {
        self.visit_function(func);
        match &func.body {
            FunctionBody::Block { statements } => {
                for inner in statements {
                    self.traverse_statement(inner);
                }
            }
            FunctionBody::Expression { expression } => {
                self.traverse_expression(expression);
            }
        }
    }

    /// Traverse class members
    fn traverse_class(&mut self, class: &Class) {
        for member in &class.members {
            match member {
                ClassMember::Method(method) => self.traverse_function(method),
                ClassMember::Field(field) => {
                    if let Some(value) = &field.value {
                        self.traverse_expression(value);
                    }
                }
                ClassMember::StaticBlock(block) => self.traverse_block(block),
            }
        }
    }

    /// Traverse an expression and its children
    fn traverse_expression(&mut self, expr: &Expression) {
        if !self.visit_expression(expr) {
            return;
        }

        match expr {
            Expression::Leaf(_) => {}
            Expression::Call(call) => {
                self.traverse_expression(&call.callee);
                for arg in &call.arguments {
                    self.traverse_expression(arg);
                }
            }
            Expression::Function(func) => self.traverse_function(func),
            Expression::Class(class) => self.traverse_class(class),
            Expression::Jsx(element) => {
                for attr in &element.attributes {
                    match attr {
                        JsxAttribute::Attribute(named) => {
                            if let Some(value) = &named.value {
                                self.traverse_expression(value);
                            }
                        }
                        JsxAttribute::Spread(spread) => {
                            self.traverse_expression(&spread.argument);
                        }
                    }
                }
                for child in &element.children {
                    self.traverse_expression(child);
                }
            }
            Expression::Compound(compound) => {
                for child in &compound.children {
                    self.traverse_expression(child);
                }
            }
        }
    }
}

/// Helper function to run a visitor on a program
pub fn visit<V: Visitor>(visitor: &mut V, program: &Program) {
    visitor.visit_program(program);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{NodeId, Span};

    fn leaf(id: u32) -> Expression {
        Expression::Leaf(Leaf {
            id: NodeId(id),
            span: Span::default(),
        })
    }

    fn call(id: u32, args: Vec<Expression>) -> Expression {
        Expression::Call(CallExpression {
            id: NodeId(id),
            span: Span::default(),
            callee: Box::new(leaf(id + 100)),
            arguments: args,
        })
    }

    #[derive(Default)]
    struct CallCounter {
        calls: usize,
        functions: usize,
    }

    impl Visitor for CallCounter {
        fn visit_expression(&mut self, expr: &Expression) -> bool {
            if matches!(expr, Expression::Call(_)) {
                self.calls += 1;
            }
            true
        }

        fn visit_function(&mut self, _func: &Function) {
            self.functions += 1;
        }
    }

    #[test]
    fn test_visits_nested_calls() {
        let inner_fn = Function {
            id: NodeId(10),
            span: Span::default(),
            name: None,
            body: FunctionBody::Expression {
                expression: Box::new(call(11, vec![])),
            },
        };
        let program = Program::new(vec![Statement::Expression(ExpressionStatement {
            span: Span::default(),
            expression: call(1, vec![call(2, vec![]), Expression::Function(inner_fn)]),
        })]);

        let mut counter = CallCounter::default();
        visit(&mut counter, &program);
        assert_eq!(counter.calls, 3);
        assert_eq!(counter.functions, 1);
    }

    #[test]
    fn test_stop_descending() {
        struct StopAtCalls(usize);
        impl Visitor for StopAtCalls {
            fn visit_expression(&mut self, expr: &Expression) -> bool {
                if matches!(expr, Expression::Call(_)) {
                    self.0 += 1;
                    return false;
                }
                true
            }
        }

        let program = Program::new(vec![Statement::Expression(ExpressionStatement {
            span: Span::default(),
            expression: call(1, vec![call(2, vec![])]),
        })]);
        let mut visitor = StopAtCalls(0);
        visit(&mut visitor, &program);
        assert_eq!(visitor.0, 1);
    }
}
