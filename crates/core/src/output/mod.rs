//! Output formatting module
//!
//! This module provides formatters for JSON, YAML, ANSI and plain-text
//! rendering of outline scans and single-file outlines.

pub mod ansi;
mod json;
mod yaml;

pub use ansi::{format_ansi, format_file_ansi};
pub use json::format_json;
pub use yaml::format_yaml;

use crate::models::{FileOutline, OutlineMap};
use crate::outline::OutlineTree;
use std::fmt::Write;
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Plain text summary
    Summary,
}

/// Format a project scan in the specified format
pub fn format_output(data: &OutlineMap, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
        OutputFormat::Ansi => Ok(format_ansi(data)),
        OutputFormat::Summary => Ok(format_summary(data)),
    }
}

/// Format a single file's outline in the specified format
pub fn format_file(file: &FileOutline, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(file),
        OutputFormat::Yaml => format_yaml(file),
        OutputFormat::Ansi => Ok(format_file_ansi(file)),
        OutputFormat::Summary => {
            let mut output = String::new();
            write_file_summary(&mut output, file);
            Ok(output)
        }
    }
}

/// Format as plain text summary
fn format_summary(data: &OutlineMap) -> String {
    let mut output = String::new();

    output.push_str("Outline Scan Results\n");
    output.push_str("====================\n\n");
    let _ = writeln!(output, "Root: {}", data.root.display());
    let _ = writeln!(output, "Total Files: {}", data.stats.total_files);
    let _ = writeln!(output, "Total Lines: {}", data.stats.total_lines);
    let _ = writeln!(output, "Total Nodes: {}", data.stats.total_nodes);
    output.push_str("\nLanguage Breakdown:\n");
    let _ = writeln!(output, "  JavaScript: {} files", data.stats.javascript_files);
    let _ = writeln!(output, "  TypeScript: {} files", data.stats.typescript_files);
    if data.stats.estree_files > 0 {
        let _ = writeln!(output, "  ESTree JSON: {} files", data.stats.estree_files);
    }

    if data.stats.files_with_errors > 0 {
        let _ = writeln!(
            output,
            "\nFiles with parse errors: {}",
            data.stats.files_with_errors
        );
    }

    output.push('\n');
    for file in &data.files {
        write_file_summary(&mut output, file);
    }

    let _ = writeln!(output, "Scan Duration: {}ms", data.metadata.scan_duration_ms);
    let _ = writeln!(
        output,
        "Processing Speed: {:.2} files/sec",
        data.metadata.files_per_second
    );

    output
}

fn write_file_summary(output: &mut String, file: &FileOutline) {
    let _ = writeln!(output, "{}", file.path.display());
    for tree in &file.outline {
        write_tree_summary(output, tree, 1);
    }
    output.push('\n');
}

fn write_tree_summary(output: &mut String, tree: &OutlineTree, indent: usize) {
    let _ = writeln!(
        output,
        "{}{}  [{}:{}]",
        "  ".repeat(indent),
        tree.label(),
        tree.start_line + 1,
        tree.start_column + 1
    );
    for child in &tree.children {
        write_tree_summary(output, child, indent + 1);
    }
}
