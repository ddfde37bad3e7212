//! Syntax tree to outline projection
//!
//! Walks the top-level items of a [`Program`] and turns functions, classes,
//! methods, exports and `describe`/`it` test suites into [`OutlineTree`]
//! nodes. Anything that does not match a known shape contributes nothing:
//! an incomplete outline is always preferred over no outline.

use crate::ast::{Expression, ExpressionStatement, Node, Pattern, Program, SourceLocation};
use crate::tokenized_text::{
    class_name, keyword, method, param, plain, string, to_plain_text, whitespace, TokenizedText,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A node of the symbol outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineTree {
    /// Display label
    pub tokenized_text: TokenizedText,
    /// Nested symbols, never containing rejected entries
    #[serde(default)]
    pub children: Vec<OutlineTree>,
    /// Start line (0-indexed)
    pub start_line: usize,
    /// Start column (0-indexed)
    pub start_column: usize,
}

/// Zero-based start position of an outline node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartLocation {
    pub start_line: usize,
    pub start_column: usize,
}

impl OutlineTree {
    pub fn new(
        tokenized_text: TokenizedText,
        children: Vec<OutlineTree>,
        location: StartLocation,
    ) -> Self {
        Self {
            tokenized_text,
            children,
            start_line: location.start_line,
            start_column: location.start_column,
        }
    }

    /// Plain label text, e.g. `function foo(a, b)`
    pub fn label(&self) -> String {
        to_plain_text(&self.tokenized_text)
    }

    /// Count total nodes in this subtree
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(|c| c.total_nodes()).sum::<usize>()
    }

    /// Flatten the tree depth-first, parents before children
    pub fn flatten(&self) -> Vec<&OutlineTree> {
        let mut result = vec![self];
        for child in &self.children {
            result.extend(child.flatten());
        }
        result
    }

    /// Drop descendants nested deeper than `max_depth` (0 keeps only this node)
    pub fn prune(&mut self, max_depth: usize) {
        if max_depth == 0 {
            self.children.clear();
            return;
        }
        for child in &mut self.children {
            child.prune(max_depth - 1);
        }
    }
}

/// Which test-spec calls are recognized in the current scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanContext {
    /// Top level: only `describe` opens a suite
    SuiteOnly,
    /// Inside a suite: both `describe` and `it`
    Nested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecKind {
    Describe,
    It,
}

impl SpecKind {
    fn from_callee(name: &str) -> Option<Self> {
        match name {
            "describe" => Some(SpecKind::Describe),
            "it" => Some(SpecKind::It),
            _ => None,
        }
    }
}

impl ScanContext {
    fn accepts(&self, kind: SpecKind) -> bool {
        match self {
            ScanContext::SuiteOnly => kind == SpecKind::Describe,
            ScanContext::Nested => true,
        }
    }
}

/// Build the outline of a whole program
pub fn ast_to_outline(program: &Program) -> Vec<OutlineTree> {
    program
        .body
        .iter()
        .filter_map(|item| {
            let tree = item_to_tree(item);
            if tree.is_none() {
                trace!(kind = item.kind(), "top-level item has no outline");
            }
            tree
        })
        .collect()
}

/// Convert each item, keeping order and omitting the ones without an outline
pub fn items_to_trees(items: &[Node]) -> Vec<OutlineTree> {
    items.iter().filter_map(item_to_tree).collect()
}

/// Convert a single item into an outline node, if it has one
pub fn item_to_tree(item: &Node) -> Option<OutlineTree> {
    match item {
        Node::FunctionDeclaration(decl) => {
            let id = decl.id.as_ref()?;
            let mut text = vec![
                keyword("function"),
                whitespace(" "),
                method(id.name.as_str()),
                plain("("),
            ];
            text.extend(params_tokenized_text(&decl.params));
            text.push(plain(")"));
            Some(OutlineTree::new(text, Vec::new(), get_location(&decl.loc)))
        }
        Node::ClassDeclaration(decl) => {
            let id = decl.id.as_ref()?;
            let text = vec![keyword("class"), whitespace(" "), class_name(id.name.as_str())];
            Some(OutlineTree::new(
                text,
                items_to_trees(&decl.body.body),
                get_location(&decl.loc),
            ))
        }
        Node::MethodDefinition(def) => method_tree(&def.key, &def.value.params, &def.loc),
        Node::ClassMethod(def) => method_tree(&def.key, &def.params, &def.loc),
        Node::ExportDeclaration(export) => {
            let tree = export.declaration.as_deref().and_then(item_to_tree)?;
            let mut text = vec![keyword("export"), whitespace(" ")];
            text.extend(tree.tokenized_text);
            Some(OutlineTree::new(text, tree.children, get_location(&export.loc)))
        }
        Node::ExpressionStatement(statement) => spec_outline(statement, ScanContext::SuiteOnly),
        Node::Unsupported => None,
    }
}

/// A class member with a plain identifier key; computed and private keys have no outline
fn method_tree(key: &Expression, params: &[Pattern], loc: &SourceLocation) -> Option<OutlineTree> {
    let name = key.identifier_name()?;
    let mut text = vec![method(name), plain("(")];
    text.extend(params_tokenized_text(params));
    text.push(plain(")"));
    Some(OutlineTree::new(text, Vec::new(), get_location(loc)))
}

/// Render parameters as `a, b, c`
pub fn params_tokenized_text(params: &[Pattern]) -> TokenizedText {
    let mut text = Vec::with_capacity(params.len().saturating_mul(3));
    for (index, p) in params.iter().enumerate() {
        if index > 0 {
            text.push(plain(","));
            text.push(whitespace(" "));
        }
        text.push(param(p.name()));
    }
    text
}

/// Convert a 1-based line / 0-based column span start to 0-based on both axes
pub fn get_location(loc: &SourceLocation) -> StartLocation {
    StartLocation {
        start_line: loc.start.line.saturating_sub(1),
        start_column: loc.start.column,
    }
}

/// Recognize a `describe("...", fn)` or `it("...", fn)` call statement
pub fn spec_outline(statement: &ExpressionStatement, context: ScanContext) -> Option<OutlineTree> {
    let Expression::CallExpression(call) = &statement.expression else {
        return None;
    };
    let function_name = call.callee.identifier_name()?;
    let kind = SpecKind::from_callee(function_name)?;
    if !context.accepts(kind) {
        return None;
    }

    let description = call.arguments.first()?.string_value()?;
    let spec_body = call.arguments.get(1)?.function_body()?;

    // A test case is always a leaf
    let children = match kind {
        SpecKind::It => Vec::new(),
        SpecKind::Describe => spec_body
            .iter()
            .filter_map(|item| match item {
                Node::ExpressionStatement(nested) => spec_outline(nested, ScanContext::Nested),
                _ => None,
            })
            .collect(),
    };

    Some(OutlineTree::new(
        vec![method(function_name), whitespace(" "), string(description)],
        children,
        get_location(&statement.loc),
    ))
}
