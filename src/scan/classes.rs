//! Extraction of class, interface, and trait declarations.

use lazy_static::lazy_static;
use regex::Regex;

use super::source::{align_to_char_boundary, line_number};
use super::types::{ClassKind, ClassRecord};

lazy_static! {
    static ref CLASS_DECL: Regex = Regex::new(
        r"(?P<kind>class|interface|trait|abstract\s+class|final\s+class)\s+(?P<name>[a-zA-Z_\x7f-\xff][a-zA-Z0-9_\x7f-\xff]*)(?:\s+extends\s+(?P<extends>\S+))?(?:\s+implements\s+(?P<implements>[^{]+))?"
    )
    .unwrap();

    static ref NEXT_TYPE_KEYWORD: Regex = Regex::new(r"\b(?:class|interface|trait)\b").unwrap();
    static ref METHOD_DECL: Regex = Regex::new(r"\bfunction\s+\w+\s*\(").unwrap();
    static ref PROPERTY_DECL: Regex = Regex::new(r"(?:public|private|protected|static)\s+\$\w+").unwrap();
}

/// Extract type declarations from file content.
pub fn extract_classes(content: &str, file: &str) -> Vec<ClassRecord> {
    let mut records = Vec::new();

    for caps in CLASS_DECL.captures_iter(content) {
        let kind = match ClassKind::parse(&caps["kind"]) {
            Some(k) => k,
            None => continue,
        };
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);

        // Capability names are split on commas only; surrounding
        // whitespace stays with each entry for output compatibility.
        let implements = caps
            .name("implements")
            .map(|m| m.as_str().split(',').map(str::to_string).collect());

        let body = class_body_slice(content, start);

        records.push(ClassRecord {
            name: caps["name"].to_string(),
            file: file.to_string(),
            line: line_number(content, start),
            kind,
            extends: caps.name("extends").map(|m| m.as_str().to_string()),
            implements,
            methods_count: METHOD_DECL.find_iter(body).count(),
            properties_count: PROPERTY_DECL.find_iter(body).count(),
        });
    }

    records
}

/// Approximate body of the class starting at `class_start`: the text up
/// to the next class/interface/trait keyword found past a small fixed
/// offset, or the rest of the file if there is none. This is a heuristic
/// proxy for a real scope boundary and deliberately does not use brace
/// matching.
fn class_body_slice(content: &str, class_start: usize) -> &str {
    let probe = align_to_char_boundary(content, class_start + 10);
    match NEXT_TYPE_KEYWORD.find(&content[probe..]) {
        Some(m) => &content[class_start..probe + m.start()],
        None => &content[class_start..],
    }
}
