//! ESTree JSON front end
//!
//! Reads the JSON syntax tree produced by an external parser (`flow ast`,
//! acorn, esprima, `@babel/parser`) with locations enabled.

use crate::ast::Program;
use crate::models::Language;
use crate::parsers::{OutlineParser, ParsedProgram, ParserError};
use serde::Deserialize;
use serde_json::Value;

/// Parser for pre-parsed ESTree JSON
#[derive(Debug, Default)]
pub struct EstreeParser;

impl EstreeParser {
    pub fn new() -> Self {
        Self
    }

    /// Deeply nested suites exceed serde_json's default depth of 128, so the
    /// limit is lifted and the stack grown on demand instead.
    fn read_program(source: &str) -> Result<Program, serde_json::Error> {
        let mut de = serde_json::Deserializer::from_str(source);
        de.disable_recursion_limit();
        let mut root = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;

        // Babel wraps the program in a `File` node
        if root.get("type").and_then(Value::as_str) == Some("File") {
            root = root["program"].take();
        }
        Program::deserialize(serde_stacker::Deserializer::new(root))
    }
}

impl OutlineParser for EstreeParser {
    fn language(&self) -> Language {
        Language::Estree
    }

    fn parse(&mut self, source: &str) -> Result<ParsedProgram, ParserError> {
        let program = Self::read_program(source)
            .map_err(|e| ParserError::ParseError(format!("invalid ESTree JSON: {}", e)))?;

        Ok(ParsedProgram {
            program,
            errors: Vec::new(),
        })
    }
}
