//! Builders for typed test programs
//!
//! Every node gets a fresh id, and its span sits on the line equal to that
//! id, so assertions can name the reported node by line.

use excess_core::ast::*;
use excess_core::{NodeId, ObjectShape, Property, Signature, Span, TypeId, TypeKind, TypeTable};

#[derive(Default)]
pub struct Fixture {
    pub table: TypeTable,
    next_node: u32,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(&mut self) -> TypeId {
        self.table.intrinsic(TypeKind::String)
    }

    pub fn number(&mut self) -> TypeId {
        self.table.intrinsic(TypeKind::Number)
    }

    pub fn undefined(&mut self) -> TypeId {
        self.table.intrinsic(TypeKind::Undefined)
    }

    pub fn never(&mut self) -> TypeId {
        self.table.intrinsic(TypeKind::Never)
    }

    pub fn any(&mut self) -> TypeId {
        self.table.intrinsic(TypeKind::Any)
    }

    pub fn void(&mut self) -> TypeId {
        self.table.intrinsic(TypeKind::Void)
    }

    /// Anonymous object literal type
    pub fn literal(&mut self, properties: Vec<(&str, TypeId)>) -> TypeId {
        self.table.object(properties)
    }

    /// `type <name> = { ... }`
    pub fn alias(&mut self, name: &str, properties: Vec<(&str, TypeId)>) -> TypeId {
        self.table.add_alias(name, shape(properties))
    }

    /// Instance type of `class <name>`
    pub fn class(&mut self, name: &str, properties: Vec<Property>) -> TypeId {
        self.table.add_symbol(
            name,
            TypeKind::Object(ObjectShape {
                properties,
                class_instance: true,
                ..ObjectShape::default()
            }),
        )
    }

    /// Handle the next added type will receive
    pub fn next_type(&self) -> TypeId {
        TypeId(self.table.len() as u32)
    }

    /// Function type with one call signature per entry
    pub fn overloads(&mut self, signatures: Vec<(Vec<TypeId>, TypeId)>) -> TypeId {
        self.table.add(TypeKind::Object(ObjectShape {
            call_signatures: signatures
                .into_iter()
                .map(|(parameters, return_type)| Signature {
                    parameters,
                    rest: None,
                    return_type,
                })
                .collect(),
            ..ObjectShape::default()
        }))
    }

    fn node(&mut self) -> (NodeId, Span) {
        self.next_node += 1;
        (NodeId(self.next_node), Span::at(self.next_node as usize, 1))
    }

    fn typed_node(&mut self, ty: Option<TypeId>) -> (NodeId, Span) {
        let (id, span) = self.node();
        if let Some(ty) = ty {
            self.table.bind(id, ty);
        }
        (id, span)
    }

    /// Identifier or literal expression of type `ty`
    pub fn expr(&mut self, ty: TypeId) -> Expression {
        let (id, span) = self.typed_node(Some(ty));
        Expression::Leaf(Leaf { id, span })
    }

    pub fn untyped_expr(&mut self) -> Expression {
        let (id, span) = self.node();
        Expression::Leaf(Leaf { id, span })
    }

    /// `callee(arguments)`
    pub fn call(&mut self, callee: TypeId, arguments: Vec<Expression>) -> Expression {
        let callee = self.expr(callee);
        let (id, span) = self.node();
        Expression::Call(CallExpression {
            id,
            span,
            callee: Box::new(callee),
            arguments,
        })
    }

    /// `const <name>: <declared> = init` (annotated when `declared` is set)
    pub fn declare(
        &mut self,
        name: &str,
        declared: Option<TypeId>,
        init: Option<Expression>,
    ) -> Statement {
        let (id, span) = self.typed_node(declared);
        Statement::Variable(VariableDeclaration {
            span,
            declarators: vec![VariableDeclarator {
                id,
                span,
                name: name.to_string(),
                annotated: declared.is_some(),
                init,
            }],
        })
    }

    /// `const <name> = init` where the binding's type is inferred as `ty`
    pub fn declare_inferred(&mut self, name: &str, ty: TypeId, init: Expression) -> Statement {
        let (id, span) = self.typed_node(Some(ty));
        Statement::Variable(VariableDeclaration {
            span,
            declarators: vec![VariableDeclarator {
                id,
                span,
                name: name.to_string(),
                annotated: false,
                init: Some(init),
            }],
        })
    }

    pub fn ret(&mut self, argument: Option<Expression>) -> Statement {
        let (id, span) = self.node();
        Statement::Return(ReturnStatement { id, span, argument })
    }

    pub fn expr_stmt(&mut self, expression: Expression) -> Statement {
        let (_, span) = self.node();
        Statement::Expression(ExpressionStatement { span, expression })
    }

    pub fn if_else(&mut self, consequent: Statement, alternate: Option<Statement>) -> Statement {
        let test = self.untyped_expr();
        let (_, span) = self.node();
        Statement::If(IfStatement {
            span,
            test,
            consequent: Box::new(consequent),
            alternate: alternate.map(Box::new),
        })
    }

    /// Function with a block body, typed `ty`
    pub fn function(&mut self, name: Option<&str>, ty: TypeId, body: Vec<Statement>) -> Function {
        let (id, span) = self.typed_node(Some(ty));
        Function {
            id,
            span,
            name: name.map(str::to_string),
            body: FunctionBody::Block { statements: body },
        }
    }

    /// Arrow function with a concise body, typed `ty`
    pub fn arrow(&mut self, ty: TypeId, body: Expression) -> Function {
        let (id, span) = self.typed_node(Some(ty));
        Function {
            id,
            span,
            name: None,
            body: FunctionBody::Expression {
                expression: Box::new(body),
            },
        }
    }

    /// `name={value}` where the attribute resolves to `ty`
    pub fn attr(&mut self, name: &str, ty: TypeId) -> JsxAttribute {
        let value = self.expr(ty);
        let (id, span) = self.typed_node(Some(ty));
        JsxAttribute::Attribute(JsxNamedAttribute {
            id,
            span,
            name: name.to_string(),
            value: Some(value),
        })
    }

    /// `{...value}` where the spread value has type `ty`
    pub fn spread(&mut self, ty: TypeId) -> JsxAttribute {
        let argument = self.expr(ty);
        let (_, span) = self.node();
        JsxAttribute::Spread(JsxSpreadAttribute { span, argument })
    }

    /// `<Tag ...attributes />` with the tag resolving to `component`
    pub fn jsx(&mut self, tag: &str, component: TypeId, attributes: Vec<JsxAttribute>) -> Expression {
        let (tag_id, tag_span) = self.typed_node(Some(component));
        let (id, span) = self.node();
        Expression::Jsx(JsxElement {
            id,
            span,
            tag: JsxTag {
                id: tag_id,
                span: tag_span,
                name: tag.to_string(),
            },
            attributes,
            children: Vec::new(),
        })
    }
}

fn shape(properties: Vec<(&str, TypeId)>) -> TypeKind {
    TypeKind::Object(ObjectShape {
        properties: properties
            .into_iter()
            .map(|(name, ty)| Property::new(name, ty))
            .collect(),
        ..ObjectShape::default()
    })
}
