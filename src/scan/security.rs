//! Scanning for a fixed catalogue of dangerous PHP constructs.
//!
//! Every rule runs over the full file content, unscoped. Findings are
//! not deduplicated or escalated across overlapping rules; one line can
//! legitimately trigger several. The snippet is the exact substring
//! spanned by the match.

use lazy_static::lazy_static;
use regex::Regex;

use super::source::line_number;
use super::types::{IssueKind, SecurityFinding, Severity};

struct SecurityRule {
    kind: IssueKind,
    pattern: Regex,
    severity: Severity,
    description: &'static str,
}

lazy_static! {
    static ref SECURITY_RULES: Vec<SecurityRule> = vec![
        SecurityRule {
            kind: IssueKind::Eval,
            pattern: Regex::new(r"eval\s*\(").unwrap(),
            severity: Severity::Critical,
            description: "Dangerous eval() usage",
        },
        SecurityRule {
            kind: IssueKind::Exec,
            pattern: Regex::new(r"exec\s*\(").unwrap(),
            severity: Severity::Critical,
            description: "Command execution vulnerability",
        },
        SecurityRule {
            kind: IssueKind::System,
            pattern: Regex::new(r"system\s*\(").unwrap(),
            severity: Severity::Critical,
            description: "System command execution",
        },
        SecurityRule {
            kind: IssueKind::Unserialize,
            pattern: Regex::new(r"unserialize\s*\(").unwrap(),
            severity: Severity::High,
            description: "Unsafe unserialization",
        },
        SecurityRule {
            kind: IssueKind::DirectInput,
            pattern: Regex::new(r"echo\s+\$_(?:GET|POST|REQUEST)").unwrap(),
            severity: Severity::High,
            description: "Potential XSS vulnerability",
        },
        SecurityRule {
            kind: IssueKind::SqlInjection,
            pattern: Regex::new(r"\$wpdb->.*\$_(?:GET|POST|REQUEST)").unwrap(),
            severity: Severity::Critical,
            description: "Potential SQL injection",
        },
        SecurityRule {
            kind: IssueKind::FileInclusion,
            pattern: Regex::new(r"(?:include|require)(?:_once)?\s*\(\s*\$_").unwrap(),
            severity: Severity::Critical,
            description: "File inclusion vulnerability",
        },
        SecurityRule {
            kind: IssueKind::WeakComparison,
            pattern: Regex::new(r#"==\s*['"](?:admin|true|1)['"]"#).unwrap(),
            severity: Severity::Low,
            description: "Weak comparison",
        },
    ];
}

/// Scan file content against the security rule table.
pub fn scan_security(content: &str, file: &str) -> Vec<SecurityFinding> {
    let mut findings = Vec::new();

    for rule in SECURITY_RULES.iter() {
        for mat in rule.pattern.find_iter(content) {
            findings.push(SecurityFinding {
                kind: rule.kind,
                severity: rule.severity,
                description: rule.description.to_string(),
                file: file.to_string(),
                line: line_number(content, mat.start()),
                code_snippet: mat.as_str().to_string(),
            });
        }
    }

    findings
}
