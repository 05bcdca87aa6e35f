//! Closed syntax model consumed by the checks
//!
//! Only the constructs the checks care about are modelled precisely:
//! declarations, calls, returns, JSX elements, and every node that can nest
//! statements. Everything else is a [`Leaf`] or a [`Compound`] holding its
//! sub-expressions, so traversal still reaches calls and elements inside them.

use crate::span::{HasNode, NodeId, Span};
use serde::{Deserialize, Serialize};

/// A typed source unit's top level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    Variable(VariableDeclaration),
    Expression(ExpressionStatement),
    Return(ReturnStatement),
    If(IfStatement),
    Block(BlockStatement),
    /// `for`, `for..in`, `for..of`, `while`, `do..while`
    Loop(LoopStatement),
    Labeled(LabeledStatement),
    Switch(SwitchStatement),
    Try(TryStatement),
    Throw(ThrowStatement),
    Function(Function),
    Class(Class),
    Module(Module),
}

impl Statement {
    /// Function, class and module declarations open a new return scope.
    pub fn is_scope_boundary(&self) -> bool {
        matches!(
            self,
            Statement::Function(_) | Statement::Class(_) | Statement::Module(_)
        )
    }

    pub fn span(&self) -> Span {
        match self {
            Statement::Variable(s) => s.span,
            Statement::Expression(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::If(s) => s.span,
            Statement::Block(s) => s.span,
            Statement::Loop(s) => s.span,
            Statement::Labeled(s) => s.span,
            Statement::Switch(s) => s.span,
            Statement::Try(s) => s.span,
            Statement::Throw(s) => s.span,
            Statement::Function(s) => s.span,
            Statement::Class(s) => s.span,
            Statement::Module(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    #[serde(default)]
    pub span: Span,
    pub declarators: Vec<VariableDeclarator>,
}

/// `name[: T] = init`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    pub name: String,
    /// Whether the binding carries an explicit type annotation
    #[serde(default)]
    pub annotated: bool,
    #[serde(default)]
    pub init: Option<Expression>,
}

impl HasNode for VariableDeclarator {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    #[serde(default)]
    pub span: Span,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub argument: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    #[serde(default)]
    pub span: Span,
    pub test: Expression,
    pub consequent: Box<Statement>,
    #[serde(default)]
    pub alternate: Option<Box<Statement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopStatement {
    #[serde(default)]
    pub span: Span,
    /// Init/test/update or iterated expressions
    #[serde(default)]
    pub head: Vec<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledStatement {
    #[serde(default)]
    pub span: Span,
    pub label: String,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatement {
    #[serde(default)]
    pub span: Span,
    pub discriminant: Expression,
    #[serde(default)]
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// `None` for `default:`
    #[serde(default)]
    pub test: Option<Expression>,
    #[serde(default)]
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStatement {
    #[serde(default)]
    pub span: Span,
    pub block: BlockStatement,
    #[serde(default)]
    pub handler: Option<BlockStatement>,
    #[serde(default)]
    pub finalizer: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowStatement {
    #[serde(default)]
    pub span: Span,
    pub argument: Expression,
}

/// Function declaration, function expression or arrow function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub name: Option<String>,
    pub body: FunctionBody,
}

impl HasNode for Function {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FunctionBody {
    Block { statements: Vec<Statement> },
    /// Concise arrow body
    Expression { expression: Box<Expression> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClassMember {
    Method(Function),
    Field(ClassField),
    StaticBlock(BlockStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassField {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    pub name: String,
    #[serde(default)]
    pub value: Option<Expression>,
}

/// `namespace`/`module` declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    pub name: String,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Identifier, literal, `this`, ...
    Leaf(Leaf),
    Call(CallExpression),
    Function(Function),
    Class(Class),
    Jsx(JsxElement),
    /// Any other expression, reduced to its sub-expressions
    Compound(Compound),
}

impl HasNode for Expression {
    fn node_id(&self) -> NodeId {
        match self {
            Expression::Leaf(e) => e.id,
            Expression::Call(e) => e.id,
            Expression::Function(e) => e.id,
            Expression::Class(e) => e.id,
            Expression::Jsx(e) => e.id,
            Expression::Compound(e) => e.id,
        }
    }

    fn span(&self) -> Span {
        match self {
            Expression::Leaf(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::Function(e) => e.span,
            Expression::Class(e) => e.span,
            Expression::Jsx(e) => e.span,
            Expression::Compound(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub children: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    pub callee: Box<Expression>,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

/// `<Tag attr={..} {...spread}>children</Tag>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsxElement {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    pub tag: JsxTag,
    #[serde(default)]
    pub attributes: Vec<JsxAttribute>,
    #[serde(default)]
    pub children: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsxTag {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxAttribute {
    /// `name="v"`, `name={expr}` or the bare `name` shorthand; the attribute
    /// node itself resolves to the value's type.
    Attribute(JsxNamedAttribute),
    Spread(JsxSpreadAttribute),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsxNamedAttribute {
    pub id: NodeId,
    #[serde(default)]
    pub span: Span,
    pub name: String,
    #[serde(default)]
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsxSpreadAttribute {
    #[serde(default)]
    pub span: Span,
    pub argument: Expression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_boundaries() {
        let func = Statement::Function(Function {
            id: NodeId(1),
            span: Span::default(),
            name: Some("f".into()),
            body: FunctionBody::Block { statements: vec![] },
        });
        let block = Statement::Block(BlockStatement::default());
        assert!(func.is_scope_boundary());
        assert!(!block.is_scope_boundary());
    }

    #[test]
    fn test_deserialize_call_statement() {
        let json = r#"{
            "type": "Expression",
            "expression": {
                "type": "Call",
                "id": 3,
                "callee": { "type": "Leaf", "id": 1 },
                "arguments": [{ "type": "Leaf", "id": 2 }]
            }
        }"#;
        let stmt: Statement = serde_json::from_str(json).unwrap();
        match stmt {
            Statement::Expression(ExpressionStatement { expression, .. }) => {
                assert_eq!(expression.node_id(), NodeId(3));
                let Expression::Call(call) = expression else {
                    panic!("expected call");
                };
                assert_eq!(call.arguments.len(), 1);
            }
            other => panic!("unexpected statement: {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_arrow_body() {
        let json = r#"{
            "type": "Function",
            "id": 4,
            "body": { "kind": "expression", "expression": { "type": "Leaf", "id": 5 } }
        }"#;
        let expr: Expression = serde_json::from_str(json).unwrap();
        let Expression::Function(func) = expr else {
            panic!("expected function");
        };
        assert!(matches!(func.body, FunctionBody::Expression { .. }));
    }
}
