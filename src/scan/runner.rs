//! Analysis driver: runs every extractor over each file and merges the
//! per-file results into one cross-file model.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::classes::extract_classes;
use super::functions::extract_functions;
use super::security::scan_security;
use super::types::{
    ClassRecord, DatabaseOpRecord, FunctionRecord, HookBuckets, SecurityFinding,
};
use super::wordpress::{
    extract_ajax_handlers, extract_database_ops, extract_hooks, extract_rest_routes,
};

/// Recoverable per-file analysis failure.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Aggregate model for one analysis run. Append-only; records carry no
/// cross-file identity.
#[derive(Debug, Default, Clone)]
pub struct Metrics {
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub hooks: HookBuckets,
    pub database_ops: Vec<DatabaseOpRecord>,
    pub ajax_handlers: Vec<String>,
    pub rest_endpoints: Vec<String>,
    pub security_issues: Vec<SecurityFinding>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another (per-file) result into this one, preserving order.
    pub fn merge(&mut self, other: Metrics) {
        self.functions.extend(other.functions);
        self.classes.extend(other.classes);
        self.hooks.merge(other.hooks);
        self.database_ops.extend(other.database_ops);
        self.ajax_handlers.extend(other.ajax_handlers);
        self.rest_endpoints.extend(other.rest_endpoints);
        self.security_issues.extend(other.security_issues);
    }

    /// Number of critical security findings.
    pub fn critical_count(&self) -> usize {
        self.security_issues
            .iter()
            .filter(|f| f.severity == super::types::Severity::Critical)
            .count()
    }
}

/// Drives one pass over a set of files and owns the resulting model.
pub struct Analyzer {
    root: PathBuf,
}

impl Analyzer {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Analyze all files and merge results.
    ///
    /// Per-file analysis runs in parallel; files are sorted by path first
    /// and partial results merged in that order, so output is
    /// reproducible. A file that fails to read is reported on stderr and
    /// skipped; the run always continues.
    pub fn analyze(&self, files: &[PathBuf]) -> Metrics {
        let mut sorted: Vec<&PathBuf> = files.iter().collect();
        sorted.sort();

        let partials: Vec<(&PathBuf, Result<Metrics, ScanError>)> = sorted
            .par_iter()
            .map(|path| (*path, self.analyze_file(path)))
            .collect();

        let mut metrics = Metrics::new();
        for (path, partial) in partials {
            match partial {
                Ok(m) => metrics.merge(m),
                Err(e) => eprintln!("Error analyzing {}: {}", path.display(), e),
            }
        }
        metrics
    }

    /// Analyze one file. Pure with respect to the aggregate model: all
    /// state lives in the returned `Metrics`.
    fn analyze_file(&self, path: &Path) -> Result<Metrics, ScanError> {
        let bytes = std::fs::read(path).map_err(|e| ScanError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        // Invalid UTF-8 is replaced, never fatal.
        let content = String::from_utf8_lossy(&bytes);

        let rel = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        Ok(Metrics {
            functions: extract_functions(&content, &rel),
            classes: extract_classes(&content, &rel),
            hooks: extract_hooks(&content, &rel),
            database_ops: extract_database_ops(&content, &rel),
            ajax_handlers: extract_ajax_handlers(&content),
            rest_endpoints: extract_rest_routes(&content),
            security_issues: scan_security(&content, &rel),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_analyze_merges_per_file_results() {
        let temp = TempDir::new().unwrap();
        let a = write(
            &temp,
            "a.php",
            "<?php\nfunction alpha() {}\nadd_action('init', 'alpha');\n",
        );
        let b = write(
            &temp,
            "b.php",
            "<?php\nclass Beta {}\n$wpdb->query($sql);\n",
        );

        let analyzer = Analyzer::new(temp.path());
        let metrics = analyzer.analyze(&[a, b]);

        assert_eq!(metrics.functions.len(), 1);
        assert_eq!(metrics.functions[0].file, "a.php");
        assert_eq!(metrics.classes.len(), 1);
        assert_eq!(metrics.classes[0].file, "b.php");
        assert_eq!(metrics.hooks.actions.len(), 1);
        assert_eq!(metrics.database_ops.len(), 1);
    }

    #[test]
    fn test_merge_order_is_path_sorted() {
        let temp = TempDir::new().unwrap();
        let z = write(&temp, "z.php", "<?php\nfunction from_z() {}\n");
        let a = write(&temp, "a.php", "<?php\nfunction from_a() {}\n");

        let analyzer = Analyzer::new(temp.path());
        // Pass files out of order; results come back path-sorted.
        let metrics = analyzer.analyze(&[z, a]);

        assert_eq!(metrics.functions.len(), 2);
        assert_eq!(metrics.functions[0].name, "from_a");
        assert_eq!(metrics.functions[1].name, "from_z");
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let good = write(&temp, "good.php", "<?php\nfunction ok() {}\n");
        let missing = temp.path().join("missing.php");

        let analyzer = Analyzer::new(temp.path());
        let metrics = analyzer.analyze(&[missing, good]);

        // The missing file contributes nothing; the run continues.
        assert_eq!(metrics.functions.len(), 1);
        assert_eq!(metrics.functions[0].name, "ok");
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("latin1.php");
        let mut bytes = b"<?php\n// caf".to_vec();
        bytes.push(0xe9); // lone Latin-1 'é'
        bytes.extend_from_slice(b" menu\nfunction cafe_menu() {}\n");
        std::fs::write(&path, bytes).unwrap();

        let analyzer = Analyzer::new(temp.path());
        let metrics = analyzer.analyze(&[path]);

        // The stray byte is replaced during decoding; the file still
        // yields its records rather than an error.
        assert_eq!(metrics.functions.len(), 1);
        assert_eq!(metrics.functions[0].name, "cafe_menu");
        assert_eq!(metrics.functions[0].line, 3);
    }

    #[test]
    fn test_critical_count() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "bad.php",
            "<?php\neval($x);\nunserialize($y);\n",
        );

        let analyzer = Analyzer::new(temp.path());
        let metrics = analyzer.analyze(&[path]);

        assert_eq!(metrics.security_issues.len(), 2);
        assert_eq!(metrics.critical_count(), 1);
    }
}
