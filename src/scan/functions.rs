//! Extraction of function and method declarations.
//!
//! Three declaration shapes are recognized. Which shapes produce a named
//! record is an explicit policy decision in the shape table below: only
//! the named shape does. Anonymous assignments and arrow functions are
//! pattern-matched but carry no name capture, so they yield nothing.
//! The shape families run independently over the same content and are
//! not deduplicated against each other.

use lazy_static::lazy_static;
use regex::Regex;

use super::source::{find_scope_end, line_number};
use super::types::{FunctionRecord, Visibility};

/// The closed set of declaration shapes the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionShape {
    /// `function name(...)`, with optional visibility/static modifiers
    /// and an optional declared return type.
    Named,
    /// `$var = function (...)`.
    AnonymousAssignment,
    /// `fn (...) =>`.
    Arrow,
}

/// A declaration shape with its match pattern and record policy.
struct ShapeRule {
    #[allow(dead_code)]
    shape: FunctionShape,
    pattern: Regex,
    /// Whether matches of this shape produce a `FunctionRecord`.
    yields_record: bool,
}

lazy_static! {
    static ref SHAPE_RULES: Vec<ShapeRule> = vec![
        ShapeRule {
            shape: FunctionShape::Named,
            pattern: Regex::new(
                r"(?P<modifiers>(?:(?:public|private|protected|static)\s+)+)?function\s+(?P<name>[a-zA-Z_\x7f-\xff][a-zA-Z0-9_\x7f-\xff]*)\s*\((?P<params>[^)]*)\)(?:\s*:\s*(?P<return>\S+))?"
            )
            .unwrap(),
            yields_record: true,
        },
        ShapeRule {
            shape: FunctionShape::AnonymousAssignment,
            pattern: Regex::new(r"\$\w+\s*=\s*function\s*\((?P<params>[^)]*)\)").unwrap(),
            yields_record: false,
        },
        ShapeRule {
            shape: FunctionShape::Arrow,
            pattern: Regex::new(r"fn\s*\((?P<params>[^)]*)\)\s*=>").unwrap(),
            yields_record: false,
        },
    ];

    /// Idiomatic PHP variable name: `$` sigil followed by a word.
    static ref PARAM_NAME: Regex = Regex::new(r"\$\w+").unwrap();

    /// Decision-point tokens counted for cyclomatic complexity.
    static ref DECISION_PATTERNS: Vec<Regex> = [
        r"\bif\b",
        r"\belseif\b",
        r"\bfor\b",
        r"\bforeach\b",
        r"\bwhile\b",
        r"\bcase\b",
        r"\bcatch\b",
        r"\?\s*:",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Extract function declarations from file content.
pub fn extract_functions(content: &str, file: &str) -> Vec<FunctionRecord> {
    let mut records = Vec::new();

    for rule in SHAPE_RULES.iter() {
        if !rule.yields_record {
            continue;
        }

        for caps in rule.pattern.captures_iter(content) {
            let name = match caps.name("name") {
                Some(m) if !m.as_str().is_empty() => m.as_str().to_string(),
                _ => continue,
            };

            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);

            let mut visibility = Visibility::default();
            let mut is_static = false;
            if let Some(mods) = caps.name("modifiers") {
                for token in mods.as_str().split_whitespace() {
                    if token == "static" {
                        is_static = true;
                    } else if let Ok(v) = token.parse::<Visibility>() {
                        visibility = v;
                    }
                }
            }

            let parameters = caps
                .name("params")
                .map(|m| parse_parameters(m.as_str()))
                .unwrap_or_default();

            records.push(FunctionRecord {
                name,
                file: file.to_string(),
                line: line_number(content, start),
                visibility,
                is_static,
                parameters,
                return_type: caps.name("return").map(|m| m.as_str().to_string()),
                docblock: None,
                complexity: calculate_complexity(content, start),
            });
        }
    }

    records
}

/// Parse a raw parameter list into variable names.
///
/// Splits on commas and keeps the first `$name` token of each entry,
/// discarding type hints, default values, and by-reference/variadic
/// markers.
fn parse_parameters(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|param| {
            let param = param.trim();
            if param.is_empty() {
                return None;
            }
            PARAM_NAME.find(param).map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Cyclomatic complexity of the function starting at `start`.
///
/// Base of 1 plus one per decision-point token inside the brace-bounded
/// body. A function whose body never closes scores the base 1.
fn calculate_complexity(content: &str, start: usize) -> u32 {
    match find_scope_end(content, start) {
        Some(end) if end > start => {
            let body = &content[start..end];
            DECISION_PATTERNS
                .iter()
                .map(|p| p.find_iter(body).count() as u32)
                .sum::<u32>()
                + 1
        }
        _ => 1,
    }
}
