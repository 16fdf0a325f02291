//! Pattern-based extraction of structural facts from PHP source text.

mod classes;
mod functions;
mod runner;
mod security;
mod source;
mod types;
mod wordpress;

pub use classes::extract_classes;
pub use functions::{extract_functions, FunctionShape};
pub use runner::{Analyzer, Metrics, ScanError};
pub use security::scan_security;
pub use source::{align_to_char_boundary, find_scope_end, line_number};
pub use types::{
    ClassKind, ClassRecord, DatabaseOpRecord, FunctionRecord, HookBuckets, HookRecord, IssueKind,
    SecurityFinding, Severity, Visibility,
};
pub use wordpress::{
    extract_ajax_handlers, extract_database_ops, extract_hooks, extract_rest_routes,
};
