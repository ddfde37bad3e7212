//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for outlines.

use crate::models::{FileOutline, Language, OutlineMap};
use crate::outline::OutlineTree;
use crate::tokenized_text::{TextToken, TokenKind};

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

const BRIGHT_RED: &str = "\x1b[91m";
const BRIGHT_GREEN: &str = "\x1b[92m";
const BRIGHT_YELLOW: &str = "\x1b[93m";
const BRIGHT_BLUE: &str = "\x1b[94m";
const BRIGHT_MAGENTA: &str = "\x1b[95m";
const BRIGHT_CYAN: &str = "\x1b[96m";

const BG_BLUE: &str = "\x1b[44m";

/// Get color for a token kind (None = terminal default)
fn token_color(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Keyword => Some(BRIGHT_MAGENTA),
        TokenKind::ClassName => Some(BRIGHT_YELLOW),
        TokenKind::Method => Some(BRIGHT_CYAN),
        TokenKind::Param => Some(CYAN),
        TokenKind::String => Some(GREEN),
        TokenKind::Whitespace | TokenKind::Plain => None,
    }
}

fn format_token(token: &TextToken) -> String {
    match token_color(token.kind) {
        Some(color) => format!("{}{}{}", color, token.value, RESET),
        None => token.value.clone(),
    }
}

/// Format a project scan as ANSI colored text
pub fn format_ansi(data: &OutlineMap) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!(
        "\n{}{}  Outline Scan Results  {}{}\n\n",
        BOLD, BG_BLUE, RESET, RESET
    ));

    output.push_str(&format!(
        "{}Root:{} {}\n\n",
        BOLD,
        RESET,
        data.root.display()
    ));

    output.push_str(&format!(
        "{}Files:{} {}  {}Lines:{} {}  {}Nodes:{} {}\n\n",
        BOLD,
        RESET,
        data.stats.total_files,
        BOLD,
        RESET,
        data.stats.total_lines,
        BOLD,
        RESET,
        data.stats.total_nodes
    ));

    for file in &data.files {
        output.push_str(&format_file_ansi(file));
    }

    // Footer
    output.push_str(&format!(
        "\n{}Scan completed in {}ms ({:.2} files/sec){}\n",
        DIM, data.metadata.scan_duration_ms, data.metadata.files_per_second, RESET
    ));

    output
}

/// Format a single file's outline
pub fn format_file_ansi(file: &FileOutline) -> String {
    let mut output = String::new();

    let lang_color = match file.language {
        Language::JavaScript => BRIGHT_GREEN,
        Language::TypeScript | Language::Tsx => BRIGHT_BLUE,
        Language::Estree => BRIGHT_YELLOW,
    };

    output.push_str(&format!(
        "{}{}{}{} {}({}){}\n",
        BOLD,
        lang_color,
        file.path.display(),
        RESET,
        DIM,
        file.language.display_name(),
        RESET
    ));

    if file.has_errors() {
        output.push_str(&format!(
            "   {}! {} parse error(s){}\n",
            BRIGHT_RED,
            file.errors.len(),
            RESET
        ));
    }

    for tree in &file.outline {
        output.push_str(&format_tree_ansi(tree, 1));
    }

    output.push('\n');
    output
}

/// Format one outline node and its children, one line each
fn format_tree_ansi(tree: &OutlineTree, indent: usize) -> String {
    let mut output = "   ".repeat(indent);

    for token in &tree.tokenized_text {
        output.push_str(&format_token(token));
    }

    // Positions are shown 1-based, like an editor status bar
    output.push_str(&format!(
        " {}:{}:{}{}\n",
        DIM,
        tree.start_line + 1,
        tree.start_column + 1,
        RESET
    ));

    for child in &tree.children {
        output.push_str(&format_tree_ansi(child, indent + 1));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParseError;
    use crate::outline::StartLocation;
    use crate::tokenized_text::{class_name, keyword, method, plain, string, whitespace};
    use std::path::PathBuf;

    fn suite() -> OutlineTree {
        let it = OutlineTree::new(
            vec![keyword("it"), whitespace(" "), string("works")],
            vec![],
            StartLocation {
                start_line: 1,
                start_column: 2,
            },
        );
        OutlineTree::new(
            vec![keyword("describe"), whitespace(" "), string("Widget")],
            vec![it],
            StartLocation {
                start_line: 0,
                start_column: 0,
            },
        )
    }

    #[test]
    fn test_token_colors() {
        assert_eq!(format_token(&keyword("class")), format!("{}class{}", BRIGHT_MAGENTA, RESET));
        assert_eq!(format_token(&class_name("A")), format!("{}A{}", BRIGHT_YELLOW, RESET));
        assert_eq!(format_token(&method("run")), format!("{}run{}", BRIGHT_CYAN, RESET));
        assert_eq!(format_token(&plain("(")), "(");
    }

    #[test]
    fn test_tree_lines_are_indented_and_one_based() {
        let output = format_tree_ansi(&suite(), 1);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("   \x1b[95mdescribe"));
        assert!(lines[0].ends_with(&format!("{}1:1{}", DIM, RESET)));
        assert!(lines[1].starts_with("      \x1b[95mit"));
        assert!(lines[1].ends_with(&format!("{}2:3{}", DIM, RESET)));
    }

    #[test]
    fn test_format_ansi_basic() {
        let file = FileOutline {
            path: PathBuf::from("widget.spec.js"),
            absolute_path: PathBuf::from("/test/widget.spec.js"),
            language: Language::JavaScript,
            total_lines: 3,
            outline: vec![suite()],
            errors: vec![ParseError {
                line: 3,
                column: 0,
                message: "Missing: )".to_string(),
                error_type: "missing".to_string(),
            }],
        };
        let data = OutlineMap::single(file);

        let output = format_ansi(&data);
        assert!(output.contains("Outline Scan Results"));
        assert!(output.contains("widget.spec.js"));
        assert!(output.contains("1 parse error(s)"));
        assert!(output.contains("Widget"));
    }
}
