//! Syntax tree consumed by the outline builder
//!
//! The tree follows the ESTree shape so it can be read straight from the JSON
//! emitted by Flow, Esprima, Acorn or Babel. Only the node shapes that end up
//! in an outline get their own variant; every other tag collapses into a
//! catch-all so that unknown syntax never fails deserialization.

use serde::Deserialize;

/// Root of a parsed source file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub body: Vec<Node>,
}

/// Start position of a node. Lines are 1-based, columns 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            start: Position { line, column },
        }
    }
}

/// Statement-level node, discriminated by its `type` tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    FunctionDeclaration(FunctionDeclaration),
    ClassDeclaration(ClassDeclaration),
    MethodDefinition(MethodDefinition),
    /// Babel class member: parameters sit on the member itself
    #[serde(alias = "ClassPrivateMethod", alias = "TSDeclareMethod")]
    ClassMethod(ClassMethod),
    #[serde(alias = "ExportNamedDeclaration", alias = "ExportDefaultDeclaration")]
    ExportDeclaration(ExportDeclaration),
    ExpressionStatement(ExpressionStatement),
    #[serde(other)]
    Unsupported,
}

impl Node {
    /// Tag name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Node::FunctionDeclaration(_) => "FunctionDeclaration",
            Node::ClassDeclaration(_) => "ClassDeclaration",
            Node::MethodDefinition(_) => "MethodDefinition",
            Node::ClassMethod(_) => "ClassMethod",
            Node::ExportDeclaration(_) => "ExportDeclaration",
            Node::ExpressionStatement(_) => "ExpressionStatement",
            Node::Unsupported => "Unsupported",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionDeclaration {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub params: Vec<Pattern>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassDeclaration {
    #[serde(default)]
    pub id: Option<Identifier>,
    pub body: ClassBody,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassBody {
    #[serde(default)]
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodDefinition {
    pub key: Expression,
    pub value: FunctionExpression,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassMethod {
    pub key: Expression,
    #[serde(default)]
    pub params: Vec<Pattern>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportDeclaration {
    #[serde(default)]
    pub declaration: Option<Box<Node>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub loc: SourceLocation,
}

/// Expression node, discriminated by its `type` tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    CallExpression(CallExpression),
    Identifier(Identifier),
    #[serde(alias = "StringLiteral", alias = "NumericLiteral")]
    Literal(Literal),
    ArrowFunctionExpression(FunctionExpression),
    FunctionExpression(FunctionExpression),
    #[serde(other)]
    Other,
}

impl Expression {
    /// Name of a plain identifier expression
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Expression::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }

    /// Value of a string literal expression
    pub fn string_value(&self) -> Option<&str> {
        match self {
            Expression::Literal(literal) => literal.value.as_str(),
            _ => None,
        }
    }

    /// Statements of an arrow or ordinary function expression with a block body
    pub fn function_body(&self) -> Option<&[Node]> {
        match self {
            Expression::ArrowFunctionExpression(f) | Expression::FunctionExpression(f) => {
                f.body.as_ref()?.statements()
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: serde_json::Value::String(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionExpression {
    #[serde(default)]
    pub params: Vec<Pattern>,
    /// Absent for abstract and overload signatures (`body: null`)
    #[serde(default)]
    pub body: Option<FunctionBody>,
}

/// Body of a function: a statement block, or a single expression for
/// concise arrow functions
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum FunctionBody {
    BlockStatement {
        #[serde(default)]
        body: Vec<Node>,
    },
    #[serde(other)]
    Expression,
}

impl FunctionBody {
    pub fn statements(&self) -> Option<&[Node]> {
        match self {
            FunctionBody::BlockStatement { body } => Some(body),
            FunctionBody::Expression => None,
        }
    }
}

/// Parameter descriptor
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    Identifier(Identifier),
    AssignmentPattern { left: Box<Pattern> },
    RestElement { argument: Box<Pattern> },
    ObjectPattern {},
    ArrayPattern {},
    #[serde(other)]
    Other,
}

impl Pattern {
    /// Display name of the parameter.
    ///
    /// Defaults and rest markers are stripped down to the bound name;
    /// destructuring patterns have no single name and render as `{}` / `[]`.
    pub fn name(&self) -> &str {
        match self {
            Pattern::Identifier(id) => &id.name,
            Pattern::AssignmentPattern { left } => left.name(),
            Pattern::RestElement { argument } => argument.name(),
            Pattern::ObjectPattern {} => "{}",
            Pattern::ArrayPattern {} => "[]",
            Pattern::Other => "_",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_tags_are_unsupported() {
        let node: Node = serde_json::from_value(json!({
            "type": "VariableDeclaration",
            "declarations": [],
            "kind": "const",
            "loc": { "start": { "line": 1, "column": 0 } }
        }))
        .unwrap();
        assert_eq!(node, Node::Unsupported);
    }

    #[test]
    fn test_export_aliases() {
        let node: Node = serde_json::from_value(json!({
            "type": "ExportNamedDeclaration",
            "declaration": null,
            "loc": { "start": { "line": 3, "column": 0 } }
        }))
        .unwrap();
        assert!(matches!(node, Node::ExportDeclaration(_)));
    }

    #[test]
    fn test_missing_loc_is_rejected() {
        let result: Result<Node, _> = serde_json::from_value(json!({
            "type": "FunctionDeclaration",
            "id": { "type": "Identifier", "name": "f" },
            "params": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_pattern_names() {
        let params: Vec<Pattern> = serde_json::from_value(json!([
            { "type": "Identifier", "name": "a" },
            { "type": "AssignmentPattern",
              "left": { "type": "Identifier", "name": "b" },
              "right": { "type": "Literal", "value": 1 } },
            { "type": "RestElement", "argument": { "type": "Identifier", "name": "rest" } },
            { "type": "ObjectPattern", "properties": [] },
            { "type": "ArrayPattern", "elements": [] }
        ]))
        .unwrap();
        let names: Vec<&str> = params.iter().map(Pattern::name).collect();
        assert_eq!(names, vec!["a", "b", "rest", "{}", "[]"]);
    }

    #[test]
    fn test_concise_arrow_body_has_no_statements() {
        let expr: Expression = serde_json::from_value(json!({
            "type": "ArrowFunctionExpression",
            "params": [],
            "body": { "type": "Identifier", "name": "x" }
        }))
        .unwrap();
        assert!(expr.function_body().is_none());
    }

    #[test]
    fn test_method_without_body() {
        let node: Node = serde_json::from_value(json!({
            "type": "MethodDefinition",
            "kind": "method",
            "key": { "type": "Identifier", "name": "area" },
            "value": { "type": "TSEmptyBodyFunctionExpression", "params": [], "body": null },
            "loc": { "start": { "line": 2, "column": 2 } }
        }))
        .unwrap();
        let Node::MethodDefinition(def) = node else {
            panic!("expected a method definition");
        };
        assert_eq!(def.value.body, None);
    }

    #[test]
    fn test_babel_class_members() {
        let members: Vec<Node> = serde_json::from_value(json!([
            { "type": "ClassMethod", "kind": "method",
              "key": { "type": "Identifier", "name": "m" },
              "params": [{ "type": "Identifier", "name": "a" }],
              "body": { "type": "BlockStatement", "body": [] },
              "loc": { "start": { "line": 2, "column": 2 } } },
            { "type": "TSDeclareMethod", "kind": "method",
              "key": { "type": "Identifier", "name": "n" },
              "params": [],
              "loc": { "start": { "line": 3, "column": 2 } } }
        ]))
        .unwrap();
        assert_eq!(members[0].kind(), "ClassMethod");
        assert_eq!(members[1].kind(), "ClassMethod");
    }
}
