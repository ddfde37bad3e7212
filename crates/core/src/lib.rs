//! mta_outline_core - Core library for JavaScript symbol outlines
//!
//! This crate turns JavaScript/TypeScript source, or a pre-parsed ESTree
//! syntax tree, into a hierarchical outline of functions, classes, methods,
//! exports and `describe`/`it` test suites.
//!
//! # Features
//!
//! - **Resilient Parsing**: Tree-sitter front end that still outlines
//!   incomplete or malformed code.
//! - **ESTree Input**: Accepts the JSON AST of `flow ast`, acorn, esprima or
//!   `@babel/parser`.
//! - **Styled Labels**: Every outline node carries typed display tokens.
//! - **Multiple Output Formats**: JSON, YAML, ANSI-colored terminal output and
//!   a plain-text summary.
//!
//! # Example
//!
//! ```rust,no_run
//! use mta_outline_core::{format_output, OutlineScanner, OutputFormat, ScanConfig};
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(PathBuf::from("."));
//! let scanner = OutlineScanner::new(config).unwrap();
//!
//! let result = scanner.scan().unwrap();
//!
//! let json = format_output(&result, OutputFormat::Json).unwrap();
//! println!("{}", json);
//! ```

pub mod ast;
pub mod config;
pub mod engine;
pub mod models;
pub mod outline;
pub mod output;
pub mod parsers;
pub mod tokenized_text;

// Re-exports for convenience
pub use config::{ConfigError, ScanConfig};
pub use engine::{outline_source, scan_file, scan_file_as, OutlineScanner, ScanError};
pub use models::{FileOutline, Language, OutlineMap, ParseError, ScanMetadata, ScanStats};
pub use outline::{ast_to_outline, OutlineTree, ScanContext};
pub use output::{format_file, format_output, FormatError, OutputFormat};
pub use parsers::{create_parser, OutlineParser, ParserError};
pub use tokenized_text::{TextToken, TokenKind, TokenizedText};
