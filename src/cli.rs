//! Command-line interface for wpscope.

use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::report::{self, Report};
use crate::scan::Analyzer;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Pattern-based static analyzer for WordPress plugin PHP source trees.
///
/// Scans every `.php` file under the given root and reports functions,
/// classes, hook registrations, database call sites, AJAX handlers, REST
/// routes, and known security anti-patterns as one JSON document on
/// stdout. A short human-readable summary goes to stderr.
#[derive(Parser)]
#[command(name = "wpscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory of the plugin to analyze
    pub path: Option<PathBuf>,

    /// Output format: json or pretty
    #[arg(short, long, default_value = "json")]
    pub format: String,
}

/// Collect all PHP files under the root, recursively.
///
/// Traversal errors on individual entries (permissions, dangling
/// symlinks) are reported on stderr and the walk continues.
fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Error walking tree: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("php") {
                files.push(path.to_path_buf());
            }
        }
    }

    files
}

/// Run the analysis.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let path = match &cli.path {
        Some(p) => p,
        None => {
            eprintln!("Usage: wpscope <plugin-path> [--format json|pretty]");
            return Ok(EXIT_ERROR);
        }
    };

    if cli.format != "json" && cli.format != "pretty" {
        eprintln!(
            "Error: invalid format {:?}, must be 'json' or 'pretty'",
            cli.format
        );
        return Ok(EXIT_ERROR);
    }

    if !path.exists() {
        eprintln!("Error: plugin path {:?} does not exist", path);
        return Ok(EXIT_ERROR);
    }

    let files = collect_files(path);

    let analyzer = Analyzer::new(path);
    let metrics = analyzer.analyze(&files);
    let report = Report::from_metrics(metrics);

    match cli.format.as_str() {
        "pretty" => report::write_pretty(&path.to_string_lossy(), &report),
        _ => report::write_json(&report)?,
    }
    report::write_summary(&report);

    Ok(EXIT_SUCCESS)
}
