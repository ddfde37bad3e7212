//! mta-outline CLI
//!
//! Symbol outlines (functions, classes, methods, exports and test suites)
//! for JavaScript and TypeScript projects.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mta_outline_core::{
    format_file, format_output, scan_file, scan_file_as, Language, OutlineScanner, OutputFormat,
    ScanConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Symbol outlines for JavaScript and TypeScript projects
#[derive(Parser)]
#[command(name = "mta-outline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Symbol outlines for JavaScript and TypeScript projects")]
#[command(long_about = r#"
mta-outline: Symbol Outlines for JavaScript and TypeScript

Lists the functions, classes, methods, exports and describe/it test suites
of source files, with the position where each one starts. Uses Tree-sitter
for resilient parsing, so incomplete files still produce an outline.

Supports:
  - JavaScript (.js, .mjs, .cjs, .jsx)
  - TypeScript (.ts, .mts, .cts)
  - TSX (.tsx)
  - ESTree JSON (file command with --language estree)

Output formats:
  - JSON (default) - Structured JSON for programmatic use
  - YAML - Human-readable YAML format
  - ANSI - Colorful terminal output
  - Summary - Plain text tree

Examples:
  mta-outline .                                 # Scan current directory
  mta-outline --format ansi                     # Colorful terminal output
  mta-outline --language typescript             # Only TypeScript files
  mta-outline --max-depth 0                     # Top-level symbols only
  mta-outline file src/app.js                   # Single file outline
  mta-outline file ast.json --language estree   # Outline of a parsed AST
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Json, global = true)]
    pub format: OutputFormatArg,

    /// Language filter, or the input language for the file command
    #[arg(short, long, value_enum, global = true)]
    pub language: Option<LanguageArg>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Maximum outline depth to include (0 = top level only)
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Ignore patterns (can be specified multiple times)
    #[arg(long, action = ArgAction::Append, global = true)]
    pub ignore: Vec<String>,

    /// Number of threads for parallel processing (default: auto)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory for outlines
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Get outline for a single file
    File {
        /// Path to file
        path: PathBuf,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Ansi,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

/// Language argument
#[derive(ValueEnum, Clone, Debug)]
pub enum LanguageArg {
    /// JavaScript and TypeScript
    Node,
    Javascript,
    /// TypeScript, with and without JSX
    Typescript,
    Tsx,
    /// Pre-parsed ESTree JSON (file command only)
    Estree,
}

impl LanguageArg {
    fn languages(&self) -> Vec<Language> {
        match self {
            LanguageArg::Node => vec![Language::JavaScript, Language::TypeScript, Language::Tsx],
            LanguageArg::Javascript => vec![Language::JavaScript],
            LanguageArg::Typescript => vec![Language::TypeScript, Language::Tsx],
            LanguageArg::Tsx => vec![Language::Tsx],
            LanguageArg::Estree => vec![Language::Estree],
        }
    }
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    let result = match &args.command {
        Some(Commands::Scan { path }) => run_scan(path, &args),
        Some(Commands::File { path }) => run_file(path, &args),
        None => run_scan(&args.path, &args),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Install the stderr subscriber; RUST_LOG overrides the -v count
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Build common configuration from args
fn build_config(path: &Path, args: &Args) -> ScanConfig {
    let mut config = ScanConfig::new(path.to_path_buf()).with_ignore_patterns(args.ignore.clone());

    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }

    if let Some(language) = &args.language {
        config = config.with_language_filter(language.languages());
    }

    config
}

fn new_spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

fn run_scan(path: &Path, args: &Args) -> Result<()> {
    if matches!(args.language, Some(LanguageArg::Estree)) {
        anyhow::bail!("ESTree input is only supported by the file command");
    }
    if !path.is_dir() {
        anyhow::bail!("Not a directory: {}", path.display());
    }

    let config = build_config(path, args);

    let spinner = if args.verbose > 0 && atty::is(atty::Stream::Stderr) {
        Some(new_spinner("Scanning project...")?)
    } else {
        None
    };

    let scanner = OutlineScanner::new(config).context("Failed to create scanner")?;
    let result = scanner.scan().context("Failed to scan directory")?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} files in {}ms",
            result.stats.total_files, result.metadata.scan_duration_ms
        ));
    }

    let output = format_output(&result, args.format.clone().into())?;
    write_output(&output, args.output.as_deref())
}

fn run_file(path: &Path, args: &Args) -> Result<()> {
    let config = build_config(path, args);

    let forced = match args.language {
        Some(LanguageArg::Javascript) => Some(Language::JavaScript),
        Some(LanguageArg::Typescript) => Some(Language::TypeScript),
        Some(LanguageArg::Tsx) => Some(Language::Tsx),
        Some(LanguageArg::Estree) => Some(Language::Estree),
        Some(LanguageArg::Node) | None => None,
    };

    let outline = match forced {
        Some(language) => {
            debug!(path = %path.display(), language = language.display_name(), "forced language");
            scan_file_as(path, language, &config)
        }
        None => scan_file(path, &config),
    }
    .with_context(|| format!("Failed to outline {}", path.display()))?;

    let output = format_file(&outline, args.format.clone().into())?;
    write_output(&output, args.output.as_deref())
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output)
            .with_context(|| format!("Failed to write output file {}", path.display()))?;
    } else {
        println!("{}", output);
    }
    Ok(())
}
