//! Configuration module for the outline scanner
//!
//! This module provides the scan configuration and the ignore filtering
//! that decides which files of a project get outlined.

use crate::models::Language;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),
}

/// Paths skipped in every JavaScript/TypeScript project
const DEFAULT_IGNORES: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/dist/**",
    "**/build/**",
    "**/out/**",
    "**/coverage/**",
    "**/.next/**",
    "**/.nuxt/**",
    "**/.cache/**",
    "**/vendor/**",
    "**/*.min.js",
    "**/*.bundle.js",
    "**/*.d.ts",
];

/// Configuration for the outline scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,

    /// Language filter (None = all languages)
    pub language_filter: Option<Vec<Language>>,

    /// Custom ignore patterns
    pub ignore_patterns: Vec<String>,

    /// Number of threads for parallel processing
    pub threads: usize,

    /// Maximum file size to process (bytes)
    pub max_file_size: usize,

    /// Maximum outline depth kept (None = unlimited, 0 = top level only)
    pub max_depth: Option<usize>,

    /// Whether to follow symlinks
    pub follow_symlinks: bool,

    /// Whether to include hidden files
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            language_filter: None,
            ignore_patterns: Vec::new(),
            threads: num_cpus(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
            max_depth: None,
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

impl ScanConfig {
    /// Create new config with root directory
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_language_filter(mut self, languages: Vec<Language>) -> Self {
        self.language_filter = Some(languages);
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Filter for ignoring files and directories
pub struct IgnoreFilter {
    root: PathBuf,
    gitignore: Option<Gitignore>,
    custom_globs: GlobSet,
    default_ignores: GlobSet,
    include_hidden: bool,
}

impl IgnoreFilter {
    /// Create a new ignore filter from config
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        let default_patterns: Vec<String> = DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect();

        Ok(Self {
            root: config.root.clone(),
            gitignore: Self::build_gitignore(&config.root),
            custom_globs: Self::build_globset(&config.ignore_patterns)?,
            default_ignores: Self::build_globset(&default_patterns)?,
            include_hidden: config.include_hidden,
        })
    }

    /// Build gitignore from root directory; a broken .gitignore is not fatal
    fn build_gitignore(root: &Path) -> Option<Gitignore> {
        let gitignore_path = root.join(".gitignore");
        if !gitignore_path.exists() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&gitignore_path) {
            warn!(path = %gitignore_path.display(), error = %err, "partially invalid .gitignore");
        }

        match builder.build() {
            Ok(gi) => Some(gi),
            Err(err) => {
                warn!(path = %gitignore_path.display(), error = %err, "ignoring unreadable .gitignore");
                None
            }
        }
    }

    fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob(e.to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| ConfigError::InvalidGlob(e.to_string()))
    }

    /// Check if a path should be ignored.
    ///
    /// Globs see the path relative to the scan root, so directories above the
    /// root (say a checkout under `~/build/`) never match.
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative.to_string_lossy();

        if !self.include_hidden {
            if let Some(name) = relative.file_name() {
                let name = name.to_string_lossy();
                if name.starts_with('.') && name != "." && name != ".." {
                    return true;
                }
            }
        }

        if self.default_ignores.is_match(&*path_str) || self.custom_globs.is_match(&*path_str) {
            return true;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }

    /// Language of a path if it passes the language filter
    pub fn detect_language(&self, path: &Path, filter: &Option<Vec<Language>>) -> Option<Language> {
        let ext = path.extension()?.to_string_lossy();
        let lang = Language::from_extension(&ext)?;

        match filter {
            Some(langs) if !langs.contains(&lang) => None,
            _ => Some(lang),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::new(PathBuf::from("/test"))
            .with_threads(0)
            .with_language_filter(vec![Language::TypeScript])
            .with_max_file_size(1024)
            .with_max_depth(2);

        assert_eq!(config.threads, 1);
        assert_eq!(config.language_filter, Some(vec![Language::TypeScript]));
        assert_eq!(config.max_file_size, 1024);
        assert_eq!(config.max_depth, Some(2));
    }

    #[test]
    fn test_language_filter() {
        let config = ScanConfig::new(PathBuf::from("."));
        let filter = IgnoreFilter::new(&config).unwrap();

        assert_eq!(
            filter.detect_language(Path::new("app.ts"), &Some(vec![Language::TypeScript])),
            Some(Language::TypeScript)
        );
        assert_eq!(
            filter.detect_language(Path::new("app.js"), &Some(vec![Language::TypeScript])),
            None
        );
        assert_eq!(filter.detect_language(Path::new("app.jsx"), &None), Some(Language::JavaScript));
        assert_eq!(filter.detect_language(Path::new("README.md"), &None), None);
    }

    #[test]
    fn test_default_and_custom_ignores() {
        let config = ScanConfig::new(PathBuf::from("/nonexistent"))
            .with_ignore_patterns(vec!["**/fixtures/**".to_string()]);
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(filter.should_ignore(Path::new("/p/node_modules/lib/index.js"), false));
        assert!(filter.should_ignore(Path::new("/p/dist/app.min.js"), false));
        assert!(filter.should_ignore(Path::new("/p/test/fixtures/a.js"), false));
        assert!(filter.should_ignore(Path::new("/p/.eslintrc.js"), false));
        assert!(!filter.should_ignore(Path::new("/p/src/index.js"), false));
    }

    #[test]
    fn test_globs_ignore_ancestors_of_root() {
        let config = ScanConfig::new(PathBuf::from("/work/build/proj"))
            .with_ignore_patterns(vec!["**/generated/**".to_string()]);
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(!filter.should_ignore(Path::new("/work/build/proj/src/a.js"), false));
        assert!(!filter.should_ignore(Path::new("/work/build/proj/src"), true));
        assert!(filter.should_ignore(Path::new("/work/build/proj/build/a.js"), false));
        assert!(filter.should_ignore(Path::new("/work/build/proj/generated/b.js"), false));
        assert!(filter.should_ignore(Path::new("/work/build/proj/lib/node_modules/x.js"), false));
    }

    #[test]
    fn test_invalid_glob() {
        let config = ScanConfig::new(PathBuf::from(".")).with_ignore_patterns(vec!["[".to_string()]);
        assert!(matches!(IgnoreFilter::new(&config), Err(ConfigError::InvalidGlob(_))));
    }
}
