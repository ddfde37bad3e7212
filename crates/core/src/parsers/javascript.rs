//! JavaScript/TypeScript front end
//!
//! Parses source with Tree-sitter and lowers the concrete syntax tree into the
//! ESTree-shaped [`Program`]. Only the shapes the outline cares about are
//! lowered faithfully; everything else becomes a catch-all variant. Tree-sitter
//! recovers from syntax errors, so broken files still produce an outline.

use crate::ast::{
    self, CallExpression, ClassBody, ClassDeclaration, ExportDeclaration, Expression,
    ExpressionStatement, FunctionBody, FunctionDeclaration, FunctionExpression, Identifier,
    Literal, MethodDefinition, Pattern, Program, SourceLocation,
};
use crate::models::{Language, ParseError};
use crate::parsers::{OutlineParser, ParsedProgram, ParserError};
use ropey::Rope;
use tree_sitter::{Node, Parser, Tree};

/// JavaScript/TypeScript parser implementation
pub struct JavaScriptParser {
    parser: Parser,
    language: Language,
}

impl JavaScriptParser {
    /// Create a parser for JavaScript, TypeScript or TSX
    pub fn new(language: Language) -> Result<Self, ParserError> {
        let grammar = match language {
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::Estree => {
                return Err(ParserError::UnsupportedLanguage(
                    language.display_name().to_string(),
                ))
            }
        };

        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .map_err(|e| ParserError::InitError(e.to_string()))?;

        Ok(Self { parser, language })
    }

    fn parse_tree(&mut self, source: &str) -> Result<Tree, ParserError> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| ParserError::ParseError("Failed to parse source".to_string()))
    }

    /// Collect all error and missing nodes from the tree
    fn collect_errors(node: &Node, errors: &mut Vec<ParseError>) {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            errors.push(ParseError {
                line: pos.row + 1,
                column: pos.column,
                message: if node.is_missing() {
                    format!("Missing: {}", node.kind())
                } else {
                    format!("Syntax error at: {}", node.kind())
                },
                error_type: if node.is_missing() {
                    "missing".to_string()
                } else {
                    "error".to_string()
                },
            });
        }

        if !node.has_error() {
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::collect_errors(&child, errors);
        }
    }
}

impl OutlineParser for JavaScriptParser {
    fn language(&self) -> Language {
        self.language
    }

    fn parse(&mut self, source: &str) -> Result<ParsedProgram, ParserError> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();

        let program = Lowering::new(source).program(&root);
        let mut errors = Vec::new();
        Self::collect_errors(&root, &mut errors);

        Ok(ParsedProgram { program, errors })
    }
}

/// Tree-sitter to ESTree conversion for one source text
struct Lowering<'a> {
    source: &'a str,
    rope: Rope,
}

impl<'a> Lowering<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            rope: Rope::from_str(source),
        }
    }

    fn program(&self, root: &Node) -> Program {
        Program {
            body: self.statements(root),
        }
    }

    fn text(&self, node: &Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// 1-based line, 0-based column counted in characters rather than bytes
    fn loc(&self, node: &Node) -> SourceLocation {
        let pos = node.start_position();
        let byte = node.start_byte().min(self.rope.len_bytes());
        let line_start = byte.saturating_sub(pos.column);
        let column = self.rope.byte_to_char(byte) - self.rope.byte_to_char(line_start);
        SourceLocation::new(pos.row + 1, column)
    }

    fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        let children = node
            .named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .collect();
        children
    }

    fn statements(&self, parent: &Node) -> Vec<ast::Node> {
        Self::named_children(parent)
            .iter()
            .map(|child| self.item(child))
            .collect()
    }

    fn item(&self, node: &Node) -> ast::Node {
        match node.kind() {
            "function_declaration" | "generator_function_declaration" => {
                ast::Node::FunctionDeclaration(FunctionDeclaration {
                    id: self.identifier(node.child_by_field_name("name")),
                    params: self.params(node),
                    loc: self.loc(node),
                })
            }
            "class_declaration" | "abstract_class_declaration" => {
                let body = node
                    .child_by_field_name("body")
                    .map(|b| self.statements(&b))
                    .unwrap_or_default();
                ast::Node::ClassDeclaration(ClassDeclaration {
                    id: self.identifier(node.child_by_field_name("name")),
                    body: ClassBody { body },
                    loc: self.loc(node),
                })
            }
            // Overload signatures have no body, like TS-ESTree's empty-body methods
            "method_definition" | "method_signature" => {
                ast::Node::MethodDefinition(MethodDefinition {
                    key: self.property_key(node.child_by_field_name("name")),
                    value: self.function_expression(node),
                    loc: self.loc(node),
                })
            }
            "export_statement" => ast::Node::ExportDeclaration(ExportDeclaration {
                declaration: node
                    .child_by_field_name("declaration")
                    .map(|d| Box::new(self.item(&d))),
                loc: self.loc(node),
            }),
            "expression_statement" => match Self::named_children(node).first() {
                Some(expression) => ast::Node::ExpressionStatement(ExpressionStatement {
                    expression: self.expression(expression),
                    loc: self.loc(node),
                }),
                None => ast::Node::Unsupported,
            },
            _ => ast::Node::Unsupported,
        }
    }

    fn identifier(&self, node: Option<Node>) -> Option<Identifier> {
        node.map(|n| Identifier::new(self.text(&n)))
    }

    fn property_key(&self, node: Option<Node>) -> Expression {
        match node {
            Some(n) if n.kind() == "property_identifier" => {
                Expression::Identifier(Identifier::new(self.text(&n)))
            }
            Some(n) => self.expression(&n),
            None => Expression::Other,
        }
    }

    fn expression(&self, node: &Node) -> Expression {
        match node.kind() {
            "call_expression" => self.call_expression(node),
            "identifier" => Expression::Identifier(Identifier::new(self.text(node))),
            "string" => Expression::Literal(Literal::string(self.string_value(node))),
            "number" => Expression::Literal(Literal {
                value: self
                    .text(node)
                    .parse::<f64>()
                    .map(serde_json::Value::from)
                    .unwrap_or(serde_json::Value::Null),
            }),
            "arrow_function" => Expression::ArrowFunctionExpression(self.function_expression(node)),
            "function_expression" | "function" => {
                Expression::FunctionExpression(self.function_expression(node))
            }
            "parenthesized_expression" => match Self::named_children(node).first() {
                Some(inner) => self.expression(inner),
                None => Expression::Other,
            },
            _ => Expression::Other,
        }
    }

    /// Cooked value of a string literal, escapes decoded
    fn string_value(&self, node: &Node) -> String {
        let mut units: Vec<u16> = Vec::new();
        for part in Self::named_children(node) {
            let text = self.text(&part);
            match part.kind() {
                "escape_sequence" => push_escape(text, &mut units),
                _ => units.extend(text.encode_utf16()),
            }
        }
        // Escaped surrogate pairs only become valid once joined
        String::from_utf16_lossy(&units)
    }

    fn call_expression(&self, node: &Node) -> Expression {
        let Some(arguments) = node.child_by_field_name("arguments") else {
            return Expression::Other;
        };
        // describe`...` is a tagged template, not a call
        if arguments.kind() != "arguments" {
            return Expression::Other;
        }

        let callee = node
            .child_by_field_name("function")
            .map(|f| self.expression(&f))
            .unwrap_or(Expression::Other);

        Expression::CallExpression(CallExpression {
            callee: Box::new(callee),
            arguments: Self::named_children(&arguments)
                .iter()
                .map(|arg| self.expression(arg))
                .collect(),
        })
    }

    /// Parameters and body of anything function-like
    fn function_expression(&self, node: &Node) -> FunctionExpression {
        let body = node.child_by_field_name("body").map(|b| match b.kind() {
            "statement_block" => FunctionBody::BlockStatement {
                body: self.statements(&b),
            },
            _ => FunctionBody::Expression,
        });

        FunctionExpression {
            params: self.params(node),
            body,
        }
    }

    fn params(&self, node: &Node) -> Vec<Pattern> {
        if let Some(single) = node.child_by_field_name("parameter") {
            return vec![self.pattern(&single)];
        }
        node.child_by_field_name("parameters")
            .map(|list| {
                Self::named_children(&list)
                    .iter()
                    .map(|p| self.pattern(p))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn pattern(&self, node: &Node) -> Pattern {
        match node.kind() {
            "identifier" => Pattern::Identifier(Identifier::new(self.text(node))),
            "assignment_pattern" => match node.child_by_field_name("left") {
                Some(left) => Pattern::AssignmentPattern {
                    left: Box::new(self.pattern(&left)),
                },
                None => Pattern::Other,
            },
            "rest_pattern" => match Self::named_children(node).first() {
                Some(argument) => Pattern::RestElement {
                    argument: Box::new(self.pattern(argument)),
                },
                None => Pattern::Other,
            },
            "object_pattern" => Pattern::ObjectPattern {},
            "array_pattern" => Pattern::ArrayPattern {},
            // TypeScript wraps every parameter to carry its annotation
            "required_parameter" | "optional_parameter" => {
                match node.child_by_field_name("pattern") {
                    Some(inner) => self.pattern(&inner),
                    None => Pattern::Other,
                }
            }
            _ => Pattern::Other,
        }
    }
}

/// Append the UTF-16 code units denoted by one escape sequence (`\n`,
/// `\x41`, `\u{1F600}`, a line continuation, ...)
fn push_escape(raw: &str, units: &mut Vec<u16>) {
    let body = raw.strip_prefix('\\').unwrap_or(raw);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return;
    };
    let rest = chars.as_str();

    let code = match first {
        'n' => Some(0x0a),
        't' => Some(0x09),
        'r' => Some(0x0d),
        'b' => Some(0x08),
        'f' => Some(0x0c),
        'v' => Some(0x0b),
        // Line continuation
        '\r' | '\n' | '\u{2028}' | '\u{2029}' => return,
        '0'..='7' => u32::from_str_radix(body, 8).ok(),
        'x' => u32::from_str_radix(rest, 16).ok(),
        'u' => match rest.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
            Some(braced) => u32::from_str_radix(braced, 16).ok(),
            None => u32::from_str_radix(rest, 16).ok(),
        },
        other => Some(other as u32),
    };

    match code {
        // A lone `\uD83D` is kept as a unit so a following low surrogate can pair with it
        Some(code) if code <= 0xffff => units.push(code as u16),
        Some(code) => match char::from_u32(code) {
            Some(c) => {
                let mut buf = [0u16; 2];
                units.extend_from_slice(c.encode_utf16(&mut buf));
            }
            None => units.extend(raw.encode_utf16()),
        },
        None => units.extend(raw.encode_utf16()),
    }
}
