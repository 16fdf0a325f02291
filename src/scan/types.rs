//! Core record types produced by the extractors.

use serde::{Deserialize, Serialize};

/// Visibility of a function or method declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Protected => write!(f, "protected"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "protected" => Ok(Visibility::Protected),
            _ => Err(format!("unknown visibility: {}", s)),
        }
    }
}

/// A function or method declaration found in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub file: String,
    pub line: usize,
    pub visibility: Visibility,
    pub is_static: bool,
    pub parameters: Vec<String>,
    pub return_type: Option<String>,
    /// Declared in the report schema but never extracted; always null.
    pub docblock: Option<String>,
    pub complexity: u32,
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    #[serde(rename = "class")]
    Class,
    #[serde(rename = "interface")]
    Interface,
    #[serde(rename = "trait")]
    Trait,
    #[serde(rename = "abstract_class")]
    AbstractClass,
    #[serde(rename = "final_class")]
    FinalClass,
}

impl ClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Trait => "trait",
            ClassKind::AbstractClass => "abstract_class",
            ClassKind::FinalClass => "final_class",
        }
    }

    /// Parse the raw keyword text from a declaration match, which may
    /// contain internal whitespace ("abstract   class").
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join("_");
        match normalized.as_str() {
            "class" => Some(ClassKind::Class),
            "interface" => Some(ClassKind::Interface),
            "trait" => Some(ClassKind::Trait),
            "abstract_class" => Some(ClassKind::AbstractClass),
            "final_class" => Some(ClassKind::FinalClass),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A class, interface, or trait declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: ClassKind,
    pub extends: Option<String>,
    pub implements: Option<Vec<String>>,
    pub methods_count: usize,
    pub properties_count: usize,
}

/// A single hook registration or invocation site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookRecord {
    pub name: String,
    pub file: String,
    pub line: usize,
}

/// Hook records grouped by call shape. Field order fixes the category
/// order in the serialized report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookBuckets {
    pub actions: Vec<HookRecord>,
    pub filters: Vec<HookRecord>,
    pub do_actions: Vec<HookRecord>,
    pub apply_filters: Vec<HookRecord>,
}

impl HookBuckets {
    /// Total number of hook records across all categories.
    pub fn total(&self) -> usize {
        self.actions.len() + self.filters.len() + self.do_actions.len() + self.apply_filters.len()
    }

    /// Merge another set of buckets into this one, preserving order.
    pub fn merge(&mut self, other: HookBuckets) {
        self.actions.extend(other.actions);
        self.filters.extend(other.filters);
        self.do_actions.extend(other.do_actions);
        self.apply_filters.extend(other.apply_filters);
    }
}

/// A call site on the global `$wpdb` handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseOpRecord {
    pub method: String,
    pub file: String,
    pub line: usize,
}

/// Severity levels for security findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// The fixed catalogue of dangerous-construct kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    #[serde(rename = "eval")]
    Eval,
    #[serde(rename = "exec")]
    Exec,
    #[serde(rename = "system")]
    System,
    #[serde(rename = "unserialize")]
    Unserialize,
    #[serde(rename = "direct_input")]
    DirectInput,
    #[serde(rename = "sql_injection")]
    SqlInjection,
    #[serde(rename = "file_inclusion")]
    FileInclusion,
    #[serde(rename = "weak_comparison")]
    WeakComparison,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Eval => "eval",
            IssueKind::Exec => "exec",
            IssueKind::System => "system",
            IssueKind::Unserialize => "unserialize",
            IssueKind::DirectInput => "direct_input",
            IssueKind::SqlInjection => "sql_injection",
            IssueKind::FileInclusion => "file_inclusion",
            IssueKind::WeakComparison => "weak_comparison",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected security issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityFinding {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub description: String,
    pub file: String,
    pub line: usize,
    /// Exact substring spanned by the match; never truncated.
    pub code_snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_roundtrip() {
        assert_eq!("private".parse::<Visibility>().unwrap(), Visibility::Private);
        assert_eq!(Visibility::Protected.to_string(), "protected");
        assert!("static".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_class_kind_parse() {
        assert_eq!(ClassKind::parse("class"), Some(ClassKind::Class));
        assert_eq!(ClassKind::parse("abstract class"), Some(ClassKind::AbstractClass));
        assert_eq!(ClassKind::parse("final  class"), Some(ClassKind::FinalClass));
        assert_eq!(ClassKind::parse("enum"), None);
    }

    #[test]
    fn test_hook_buckets_total() {
        let mut buckets = HookBuckets::default();
        buckets.actions.push(HookRecord {
            name: "init".to_string(),
            file: "a.php".to_string(),
            line: 1,
        });
        buckets.filters.push(HookRecord {
            name: "the_content".to_string(),
            file: "a.php".to_string(),
            line: 2,
        });
        assert_eq!(buckets.total(), 2);

        let mut other = HookBuckets::default();
        other.actions.push(HookRecord {
            name: "admin_init".to_string(),
            file: "b.php".to_string(),
            line: 5,
        });
        buckets.merge(other);
        assert_eq!(buckets.total(), 3);
        assert_eq!(buckets.actions[1].name, "admin_init");
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    #[test]
    fn test_issue_kind_rename() {
        let json = serde_json::to_string(&IssueKind::SqlInjection).unwrap();
        assert_eq!(json, "\"sql_injection\"");
    }
}
