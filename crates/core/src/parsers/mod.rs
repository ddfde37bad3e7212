//! Parsers module for outline extraction
//!
//! Every front end produces the same ESTree-shaped [`Program`], so the
//! outline builder never needs to know where a tree came from.

mod estree;
mod javascript;

pub use estree::EstreeParser;
pub use javascript::JavaScriptParser;

use crate::ast::Program;
use crate::models::{Language, ParseError};
use crate::outline::{ast_to_outline, OutlineTree};
use thiserror::Error;

/// Parser errors
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to initialize parser: {0}")]
    InitError(String),

    #[error("Failed to parse source code: {0}")]
    ParseError(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// A parsed program plus the diagnostics the parser recovered from
#[derive(Debug, Clone)]
pub struct ParsedProgram {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

/// Trait for input front ends
pub trait OutlineParser: Send {
    /// Get the language this parser handles
    fn language(&self) -> Language;

    /// Parse source text into a syntax tree
    fn parse(&mut self, source: &str) -> Result<ParsedProgram, ParserError>;

    /// Parse source text and build its outline
    fn parse_outline(&mut self, source: &str) -> Result<Vec<OutlineTree>, ParserError> {
        let parsed = self.parse(source)?;
        Ok(ast_to_outline(&parsed.program))
    }
}

/// Create a parser for the specified language
pub fn create_parser(language: &Language) -> Result<Box<dyn OutlineParser>, ParserError> {
    match language {
        Language::JavaScript | Language::TypeScript | Language::Tsx => {
            Ok(Box::new(JavaScriptParser::new(*language)?))
        }
        Language::Estree => Ok(Box::new(EstreeParser::new())),
    }
}

/// Parse source text with a freshly created parser
pub fn parse_source(source: &str, language: &Language) -> Result<ParsedProgram, ParserError> {
    create_parser(language)?.parse(source)
}
