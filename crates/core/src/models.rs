//! Data models for outline scans
//!
//! This module defines the file- and project-level structures that wrap the
//! per-file outline trees produced by [`crate::outline`].

use crate::outline::OutlineTree;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Supported inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    JavaScript,
    TypeScript,
    /// TypeScript with JSX (`.tsx`)
    Tsx,
    /// Pre-parsed ESTree JSON (e.g. `flow ast` output)
    Estree,
}

impl Language {
    /// Determine language from file extension.
    ///
    /// ESTree input is never inferred: arbitrary `.json` files are not syntax trees.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            _ => None,
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TSX",
            Language::Estree => "ESTree JSON",
        }
    }
}

/// Parse diagnostic reported by the source parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (0-indexed)
    pub column: usize,

    /// Error message
    pub message: String,

    /// Error type (missing, error)
    pub error_type: String,
}

/// Outline of one source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutline {
    /// Path to the source file
    pub path: PathBuf,

    /// Absolute path to the source file
    pub absolute_path: PathBuf,

    pub language: Language,

    /// Total number of lines in the file
    pub total_lines: usize,

    /// Top-level outline nodes
    pub outline: Vec<OutlineTree>,

    /// Parse errors encountered (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ParseError>,
}

impl FileOutline {
    /// Get total number of outline nodes
    pub fn total_nodes(&self) -> usize {
        self.outline.iter().map(|n| n.total_nodes()).sum()
    }

    /// Flatten all nodes into a list
    pub fn flatten(&self) -> Vec<&OutlineTree> {
        self.outline.iter().flat_map(|n| n.flatten()).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of scanning a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineMap {
    /// Project root directory
    pub root: PathBuf,

    /// All source files
    pub files: Vec<FileOutline>,

    /// Summary statistics
    pub stats: ScanStats,

    /// Scan metadata
    pub metadata: ScanMetadata,
}

impl OutlineMap {
    /// Wrap a single file outline, e.g. for the `file` command
    pub fn single(outline: FileOutline) -> Self {
        let root = outline
            .path
            .parent()
            .unwrap_or(&outline.path)
            .to_path_buf();
        let files = vec![outline];
        Self {
            root,
            stats: ScanStats::from_files(&files),
            files,
            metadata: ScanMetadata::default(),
        }
    }
}

/// Summary statistics for a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_nodes: usize,
    pub javascript_files: usize,
    pub typescript_files: usize,
    pub estree_files: usize,
    pub files_with_errors: usize,
}

impl ScanStats {
    pub fn from_files(files: &[FileOutline]) -> Self {
        let count = |lang: Language| files.iter().filter(|f| f.language == lang).count();

        Self {
            total_files: files.len(),
            total_lines: files.iter().map(|f| f.total_lines).sum(),
            total_nodes: files.iter().map(|f| f.total_nodes()).sum(),
            javascript_files: count(Language::JavaScript),
            typescript_files: count(Language::TypeScript) + count(Language::Tsx),
            estree_files: count(Language::Estree),
            files_with_errors: files.iter().filter(|f| f.has_errors()).count(),
        }
    }
}

/// Metadata about the scan operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Duration of scan in milliseconds
    pub scan_duration_ms: u64,

    /// Files processed per second
    pub files_per_second: f64,

    /// ISO timestamp of scan
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

impl Default for ScanMetadata {
    fn default() -> Self {
        Self {
            scan_duration_ms: 0,
            files_per_second: 0.0,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
