//! Wpscope - pattern-based static analyzer for WordPress plugin PHP.
//!
//! Wpscope scans a plugin source tree and extracts structural facts
//! without a full PHP grammar: regex matching over raw file content plus
//! brace counting for scope boundaries. Deliberately approximate; each
//! extraction rule is isolated so a heuristic can be swapped for a real
//! parser without touching the aggregation layer.
//!
//! # Architecture
//!
//! - `scan`: the extraction engine - text primitives, the per-shape
//!   extractors (functions, classes, WordPress patterns, security), and
//!   the analysis driver that merges per-file results
//! - `report`: the JSON report document and terminal output
//! - `cli`: argument handling and the top-level run function

pub mod cli;
pub mod report;
pub mod scan;

pub use report::{Report, HIGH_COMPLEXITY_THRESHOLD};
pub use scan::{
    Analyzer, ClassKind, ClassRecord, DatabaseOpRecord, FunctionRecord, HookBuckets, HookRecord,
    IssueKind, Metrics, SecurityFinding, Severity, Visibility,
};
