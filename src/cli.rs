//! Command-line interface for exportlens.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::config::{self, ScanConfig};
use crate::report;
use crate::scan;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// List the exports of TypeScript and JavaScript modules.
///
/// For every exported function, class and binding, exportlens reports its name,
/// whether it is a class or the default export, and the name, type and
/// optionality of each parameter. The JSON output feeds test-stub generators.
#[derive(Parser)]
#[command(name = "exportlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the exports of a file or directory
    #[command(visible_alias = "scan")]
    Exports(ExportsArgs),
    /// Write a default exportlens config file
    Init(InitArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Arguments for the exports command.
#[derive(Parser)]
pub struct ExportsArgs {
    /// Path to scan (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Scan files that look like generated tests (e.g. `*.test.ts`)
    #[arg(long)]
    pub include_tests: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "exportlens.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks the level.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("exportlens={}", default_level)));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Collect the files a scan of `root` considers.
pub fn collect_files(root: &Path, config: &ScanConfig) -> anyhow::Result<Vec<PathBuf>> {
    let exclusions = config.exclusions()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories
            if e.file_type().is_dir() && name.starts_with('.') {
                return false;
            }
            !(e.file_type().is_dir() && name == "node_modules")
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let rel = path.strip_prefix(root).unwrap_or(path);
        if exclusions.is_match(rel) || exclusions.is_match(path) {
            debug!(path = %rel.display(), "excluded");
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !config.handles_extension(ext) {
            continue;
        }

        // Skip generated test files unless explicitly included
        if !config.include_test_files {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if config.is_test_file(name) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Run the exports command.
pub fn run_exports(args: &ExportsArgs) -> anyhow::Result<i32> {
    // Load config
    let (mut config, config_path) = match ScanConfig::load(args.config.as_deref(), Path::new("."))
    {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if args.include_tests {
        config.include_test_files = true;
    }

    // Resolve path
    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    // Collect files to scan
    let files = if abs_path.is_dir() {
        collect_files(&abs_path, &config)?
    } else {
        vec![abs_path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }
    info!(files = files.len(), root = %abs_path.display(), "scanning");

    let result = scan::scan_paths(&abs_path, &files, &config);

    // Output results
    let path_str = args.path.to_string_lossy().to_string();
    let config_str = config_path.map(|p| p.to_string_lossy().to_string());

    match args.format {
        OutputFormat::Json => report::write_json(&path_str, config_str.as_deref(), &result)?,
        OutputFormat::Pretty => report::write_pretty(&path_str, config_str.as_deref(), &result),
    }

    if result.has_failures() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite it or --output to pick another path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!("  2. Run: exportlens exports . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
