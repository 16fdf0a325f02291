//! Report model and output formatting.
//!
//! Two formats: the JSON document on stdout for programmatic
//! consumption, and a colored pretty rendering for humans. A short
//! summary always goes to stderr so it never mixes with the document.

use colored::*;
use serde::{Deserialize, Serialize};

use crate::scan::{
    ClassRecord, DatabaseOpRecord, FunctionRecord, HookBuckets, Metrics, SecurityFinding, Severity,
};

/// Functions with complexity above this are listed separately.
pub const HIGH_COMPLEXITY_THRESHOLD: u32 = 10;

/// Top-level counters of the report.
#[derive(Debug, Serialize, Deserialize)]
pub struct Summary {
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_hooks: usize,
    pub database_operations: usize,
    pub ajax_handlers: usize,
    pub rest_endpoints: usize,
    pub security_issues: usize,
    pub critical_issues: usize,
}

/// A function exceeding the complexity threshold, summarized.
#[derive(Debug, Serialize, Deserialize)]
pub struct HighComplexityFunction {
    pub name: String,
    pub file: String,
    pub complexity: u32,
}

/// Derived complexity statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    pub average_complexity: f64,
    /// Omitted entirely when there are no functions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_complexity: Option<u32>,
    pub high_complexity_functions: Vec<HighComplexityFunction>,
}

impl ComplexityAnalysis {
    fn compute(functions: &[FunctionRecord]) -> Self {
        if functions.is_empty() {
            return Self {
                average_complexity: 0.0,
                max_complexity: None,
                high_complexity_functions: Vec::new(),
            };
        }

        let total: u64 = functions.iter().map(|f| f.complexity as u64).sum();
        let average = total as f64 / functions.len() as f64;
        let max = functions.iter().map(|f| f.complexity).max();

        let high = functions
            .iter()
            .filter(|f| f.complexity > HIGH_COMPLEXITY_THRESHOLD)
            .map(|f| HighComplexityFunction {
                name: f.name.clone(),
                file: f.file.clone(),
                complexity: f.complexity,
            })
            .collect();

        Self {
            average_complexity: average,
            max_complexity: max,
            high_complexity_functions: high,
        }
    }
}

/// The full structured report document. Field order fixes the key order
/// in the serialized output.
#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub hooks: HookBuckets,
    pub database_operations: Vec<DatabaseOpRecord>,
    pub ajax_handlers: Vec<String>,
    pub rest_endpoints: Vec<String>,
    pub security_issues: Vec<SecurityFinding>,
    pub complexity_analysis: ComplexityAnalysis,
}

impl Report {
    /// Build the report document from the aggregate model.
    pub fn from_metrics(metrics: Metrics) -> Self {
        let critical_issues = metrics.critical_count();
        let summary = Summary {
            total_functions: metrics.functions.len(),
            total_classes: metrics.classes.len(),
            total_hooks: metrics.hooks.total(),
            database_operations: metrics.database_ops.len(),
            ajax_handlers: metrics.ajax_handlers.len(),
            rest_endpoints: metrics.rest_endpoints.len(),
            security_issues: metrics.security_issues.len(),
            critical_issues,
        };
        let complexity_analysis = ComplexityAnalysis::compute(&metrics.functions);

        Self {
            summary,
            functions: metrics.functions,
            classes: metrics.classes,
            hooks: metrics.hooks,
            database_operations: metrics.database_ops,
            ajax_handlers: metrics.ajax_handlers,
            rest_endpoints: metrics.rest_endpoints,
            security_issues: metrics.security_issues,
            complexity_analysis,
        }
    }
}

/// Write the report as pretty-printed JSON on stdout.
pub fn write_json(report: &Report) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

/// Write a colored human-readable rendering of the report on stdout.
pub fn write_pretty(path: &str, report: &Report) {
    println!();
    print!("  {}", "wpscope".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    println!();

    let s = &report.summary;
    println!("  Functions:      {}", s.total_functions);
    println!("  Classes:        {}", s.total_classes);
    println!("  Hooks:          {}", s.total_hooks);
    println!("  Database ops:   {}", s.database_operations);
    println!("  AJAX handlers:  {}", s.ajax_handlers);
    println!("  REST routes:    {}", s.rest_endpoints);
    println!();

    write_security_section(report);
    write_complexity_section(report);
}

fn write_security_section(report: &Report) {
    let s = &report.summary;
    if report.security_issues.is_empty() {
        println!("  {}", "✓ No security issues found".green());
        println!();
        return;
    }

    println!(
        "  {} ({} critical)",
        format!("✗ {} security issue(s)", s.security_issues).red(),
        s.critical_issues
    );
    for finding in &report.security_issues {
        let severity = match finding.severity {
            Severity::Critical => finding.severity.to_string().red().bold(),
            Severity::High => finding.severity.to_string().yellow(),
            Severity::Low => finding.severity.to_string().dimmed(),
        };
        println!(
            "    [{}] {}:{} {} ({})",
            severity, finding.file, finding.line, finding.description, finding.kind
        );
    }
    println!();
}

fn write_complexity_section(report: &Report) {
    let c = &report.complexity_analysis;
    print!("  Complexity: avg {:.2}", c.average_complexity);
    if let Some(max) = c.max_complexity {
        print!(", max {}", max);
    }
    println!();

    if !c.high_complexity_functions.is_empty() {
        println!(
            "  {}",
            format!(
                "{} function(s) above complexity {}",
                c.high_complexity_functions.len(),
                HIGH_COMPLEXITY_THRESHOLD
            )
            .yellow()
        );
        for f in &c.high_complexity_functions {
            println!("    {} ({}) complexity {}", f.name, f.file, f.complexity);
        }
    }
    println!();
}

/// Write the short human-readable summary on stderr.
pub fn write_summary(report: &Report) {
    let s = &report.summary;
    eprintln!();
    eprintln!("=== Analysis Summary ===");
    eprintln!("Functions: {}", s.total_functions);
    eprintln!("Classes: {}", s.total_classes);
    eprintln!("Hooks: {}", s.total_hooks);
    eprintln!(
        "Security Issues: {} ({} critical)",
        s.security_issues, s.critical_issues
    );
}
