//! Styled display tokens
//!
//! An outline label is an ordered sequence of small typed text units. The
//! rendering side decides how each kind looks; this crate only orders them.

use serde::{Deserialize, Serialize};

/// Kind of a display token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Keyword,
    ClassName,
    Method,
    Param,
    String,
    Whitespace,
    Plain,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::ClassName => "class-name",
            TokenKind::Method => "method",
            TokenKind::Param => "param",
            TokenKind::String => "string",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Plain => "plain",
        }
    }
}

/// A single immutable (kind, text) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextToken {
    pub kind: TokenKind,
    pub value: String,
}

impl TextToken {
    fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Rendered label of an outline node, insertion order significant
pub type TokenizedText = Vec<TextToken>;

pub fn keyword(value: impl Into<String>) -> TextToken {
    TextToken::new(TokenKind::Keyword, value)
}

pub fn class_name(value: impl Into<String>) -> TextToken {
    TextToken::new(TokenKind::ClassName, value)
}

pub fn method(value: impl Into<String>) -> TextToken {
    TextToken::new(TokenKind::Method, value)
}

pub fn param(value: impl Into<String>) -> TextToken {
    TextToken::new(TokenKind::Param, value)
}

pub fn string(value: impl Into<String>) -> TextToken {
    TextToken::new(TokenKind::String, value)
}

pub fn whitespace(value: impl Into<String>) -> TextToken {
    TextToken::new(TokenKind::Whitespace, value)
}

pub fn plain(value: impl Into<String>) -> TextToken {
    TextToken::new(TokenKind::Plain, value)
}

/// Concatenate token values into the plain label text
pub fn to_plain_text(tokens: &[TextToken]) -> String {
    tokens.iter().map(|t| t.value.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(keyword("class").kind, TokenKind::Keyword);
        assert_eq!(class_name("Foo").kind, TokenKind::ClassName);
        assert_eq!(method("run").kind, TokenKind::Method);
        assert_eq!(param("x").kind, TokenKind::Param);
        assert_eq!(string("suite").kind, TokenKind::String);
        assert_eq!(whitespace(" ").kind, TokenKind::Whitespace);
        assert_eq!(plain("(").kind, TokenKind::Plain);
    }

    #[test]
    fn test_plain_text() {
        let tokens = vec![keyword("class"), whitespace(" "), class_name("Foo")];
        assert_eq!(to_plain_text(&tokens), "class Foo");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&class_name("Foo")).unwrap();
        assert_eq!(json, r#"{"kind":"class-name","value":"Foo"}"#);
    }
}
