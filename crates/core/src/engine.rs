//! Outline engine module
//!
//! This module provides the project scanner and the single-file entry points
//! that turn source files into [`FileOutline`]s.

use crate::config::{IgnoreFilter, ScanConfig};
use crate::models::{FileOutline, Language, OutlineMap, ScanMetadata, ScanStats};
use crate::outline::ast_to_outline;
use crate::parsers::{parse_source, ParserError};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Scanner errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("Parser error: {0}")]
    ParserError(#[from] ParserError),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// Main outline scanner
pub struct OutlineScanner {
    config: ScanConfig,
    ignore_filter: IgnoreFilter,
}

impl OutlineScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Scan the configured directory and return the outline map
    pub fn scan(&self) -> Result<OutlineMap, ScanError> {
        let start = Instant::now();

        let source_files = self.find_source_files();
        info!(root = %self.config.root.display(), files = source_files.len(), "scanning");

        // Each document is independent, so files are outlined in parallel
        let files: Vec<FileOutline> = if self.config.threads == 1 {
            source_files
                .iter()
                .filter_map(|(path, lang)| self.outline_file(path, *lang))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()
                .map_err(|e| ScanError::ThreadPoolError(e.to_string()))?;

            pool.install(|| {
                source_files
                    .par_iter()
                    .filter_map(|(path, lang)| self.outline_file(path, *lang))
                    .collect()
            })
        };

        let stats = ScanStats::from_files(&files);

        let duration = start.elapsed();
        let file_count = files.len();
        let metadata = ScanMetadata {
            scan_duration_ms: duration.as_millis() as u64,
            files_per_second: if duration.as_secs_f64() > 0.0 {
                file_count as f64 / duration.as_secs_f64()
            } else {
                file_count as f64
            },
            ..ScanMetadata::default()
        };

        Ok(OutlineMap {
            root: self.config.root.clone(),
            files,
            stats,
            metadata,
        })
    }

    /// Find all source files matching the configuration, sorted by path
    fn find_source_files(&self) -> Vec<(PathBuf, Language)> {
        let walker = WalkDir::new(&self.config.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // The root itself is never filtered, even if it looks hidden
                if e.depth() > 0 && e.file_type().is_dir() {
                    return !self.ignore_filter.should_ignore(e.path(), true);
                }
                true
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if self.ignore_filter.should_ignore(path, false) {
                continue;
            }

            let Some(lang) = self
                .ignore_filter
                .detect_language(path, &self.config.language_filter)
            else {
                continue;
            };

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() as usize > self.config.max_file_size {
                    debug!(path = %path.display(), size = metadata.len(), "skipping large file");
                    continue;
                }
            }

            files.push((path.to_path_buf(), lang));
        }

        files
    }

    /// Outline one file of the scan; failures are logged and the file skipped
    fn outline_file(&self, path: &Path, language: Language) -> Option<FileOutline> {
        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable file");
                return None;
            }
        };

        let relative_path = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf();

        match outline_source(&source, language, &self.config) {
            Ok(mut outline) => {
                debug!(path = %relative_path.display(), nodes = outline.total_nodes(), "outlined");
                outline.absolute_path =
                    path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
                outline.path = relative_path;
                Some(outline)
            }
            Err(err) => {
                warn!(path = %relative_path.display(), error = %err, "skipping unparsable file");
                None
            }
        }
    }
}

/// Outline in-memory source text.
///
/// The returned outline has empty paths; callers that read from disk fill them in.
pub fn outline_source(
    source: &str,
    language: Language,
    config: &ScanConfig,
) -> Result<FileOutline, ScanError> {
    let parsed = parse_source(source, &language)?;
    let mut outline = ast_to_outline(&parsed.program);

    if let Some(max_depth) = config.max_depth {
        for tree in &mut outline {
            tree.prune(max_depth);
        }
    }

    Ok(FileOutline {
        path: PathBuf::new(),
        absolute_path: PathBuf::new(),
        language,
        total_lines: source.lines().count(),
        outline,
        errors: parsed.errors,
    })
}

/// Scan a single file, detecting its language from the extension
pub fn scan_file(path: &Path, config: &ScanConfig) -> Result<FileOutline, ScanError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let language = Language::from_extension(ext)
        .ok_or_else(|| ParserError::UnsupportedLanguage(format!("{}", path.display())))?;

    scan_file_as(path, language, config)
}

/// Scan a single file with an explicit language
pub fn scan_file_as(
    path: &Path,
    language: Language,
    config: &ScanConfig,
) -> Result<FileOutline, ScanError> {
    let source = fs::read_to_string(path)?;
    let mut outline = outline_source(&source, language, config)?;

    outline.path = path.to_path_buf();
    outline.absolute_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    Ok(outline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_project() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();

        let js_path = root.join("service.js");
        let mut js_file = fs::File::create(&js_path).unwrap();
        writeln!(
            js_file,
            r#"
function greet(name) {{
    console.log(`Hello, ${{name}}!`);
}}

export class UserService {{
    getUser(id) {{
        return {{ id }};
    }}
}}
"#
        )
        .unwrap();

        fs::create_dir(root.join("spec")).unwrap();
        let ts_path = root.join("spec").join("service.spec.ts");
        let mut ts_file = fs::File::create(&ts_path).unwrap();
        writeln!(
            ts_file,
            r#"
describe('UserService', () => {{
  it('finds users', () => {{}});
}});
"#
        )
        .unwrap();

        fs::create_dir(root.join("node_modules")).unwrap();
        fs::write(root.join("node_modules").join("dep.js"), "function dep() {}\n").unwrap();
        fs::write(root.join("README.md"), "# readme\n").unwrap();

        (dir, root)
    }

    #[test]
    fn test_scan_directory() {
        let (_dir, root) = create_test_project();
        let config = ScanConfig::new(root);
        let scanner = OutlineScanner::new(config).unwrap();
        let result = scanner.scan().unwrap();

        assert_eq!(result.stats.total_files, 2);
        assert_eq!(result.stats.javascript_files, 1);
        assert_eq!(result.stats.typescript_files, 1);
        assert_eq!(result.stats.total_nodes, 5);
    }

    #[test]
    fn test_scan_single_threaded_matches_parallel() {
        let (_dir, root) = create_test_project();
        let serial = OutlineScanner::new(ScanConfig::new(root.clone()).with_threads(1))
            .unwrap()
            .scan()
            .unwrap();
        let parallel = OutlineScanner::new(ScanConfig::new(root).with_threads(4))
            .unwrap()
            .scan()
            .unwrap();

        let outlines = |map: &OutlineMap| {
            map.files
                .iter()
                .map(|f| (f.path.clone(), f.outline.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(outlines(&serial), outlines(&parallel));
    }

    #[test]
    fn test_scan_single_file() {
        let (_dir, root) = create_test_project();
        let result = scan_file(&root.join("service.js"), &ScanConfig::default()).unwrap();

        assert_eq!(result.language, Language::JavaScript);
        let labels: Vec<String> = result.outline.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["function greet(name)", "export class UserService"]);
        assert_eq!(result.outline[1].children[0].label(), "getUser(id)");
    }

    #[test]
    fn test_scan_file_unknown_extension() {
        let (_dir, root) = create_test_project();
        let result = scan_file(&root.join("README.md"), &ScanConfig::default());
        assert!(matches!(
            result,
            Err(ScanError::ParserError(ParserError::UnsupportedLanguage(_)))
        ));
    }

    #[test]
    fn test_language_filter() {
        let (_dir, root) = create_test_project();
        let config = ScanConfig::new(root).with_language_filter(vec![Language::TypeScript]);
        let result = OutlineScanner::new(config).unwrap().scan().unwrap();

        assert_eq!(result.stats.javascript_files, 0);
        assert_eq!(result.stats.typescript_files, 1);
        assert_eq!(result.files[0].outline[0].label(), "describe UserService");
    }

    #[test]
    fn test_max_depth_prunes_children() {
        let source = "describe('a', () => { it('b', () => {}); });\nclass C { m() {} }\n";
        let config = ScanConfig::default().with_max_depth(0);
        let outline = outline_source(source, Language::JavaScript, &config).unwrap();

        assert_eq!(outline.outline.len(), 2);
        assert!(outline.outline.iter().all(|t| t.children.is_empty()));
    }

    #[test]
    fn test_project_below_ignored_directory_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("build").join("proj");
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("a.js"), "function a() {}\n").unwrap();
        fs::write(root.join("dist").join("a.js"), "function a() {}\n").unwrap();

        let result = OutlineScanner::new(ScanConfig::new(root)).unwrap().scan().unwrap();

        assert_eq!(result.stats.total_files, 1);
        assert_eq!(result.files[0].path, PathBuf::from("a.js"));
    }

    #[test]
    fn test_tsx_file_parses_jsx_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App.tsx");
        fs::write(
            &path,
            "export function App(props: { x: string }) {\n  return <div className=\"a\">{props.x}</div>;\n}\n",
        )
        .unwrap();

        let outline = scan_file(&path, &ScanConfig::default()).unwrap();
        assert_eq!(outline.language, Language::Tsx);
        assert!(outline.errors.is_empty());
        assert_eq!(outline.outline[0].label(), "export function App(props)");

        let map = OutlineMap::single(outline);
        assert_eq!(map.stats.typescript_files, 1);
        assert_eq!(map.stats.files_with_errors, 0);
    }

    #[test]
    fn test_estree_file_with_explicit_language() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ast.json");
        fs::write(
            &path,
            r#"{"type":"Program","body":[{"type":"FunctionDeclaration",
                "id":{"type":"Identifier","name":"main"},"params":[],
                "loc":{"start":{"line":3,"column":0}}}]}"#,
        )
        .unwrap();

        assert!(scan_file(&path, &ScanConfig::default()).is_err());
        let outline = scan_file_as(&path, Language::Estree, &ScanConfig::default()).unwrap();
        assert_eq!(outline.outline[0].label(), "function main()");
        assert_eq!(outline.outline[0].start_line, 2);
    }
}
