//! Human-editable text format for rule mappings and the service list.
//!
//! Mappings are written one `key = value` (or `key: value`) per line. Blank
//! lines and lines starting with `#` or `//` are ignored, and any line whose
//! value is not a finite number is dropped on its own without affecting the
//! rest of the text.
//!
//! ```text
//! # group multipliers
//! Sede Personalizado = 1
//! Musigym: 2.5
//! ```
//!
//! Service lists are one name per line, trimmed, deduplicated by their
//! normalized form.

use super::dedupe_service_names;
use std::collections::BTreeMap;

/// Parse every valid `key = number` line, in input order.
pub fn parse_mapping_lines(text: &str) -> Vec<(String, f64)> {
    text.lines().filter_map(parse_mapping_line).collect()
}

fn parse_mapping_line(line: &str) -> Option<(String, f64)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
        return None;
    }
    let (key, value) = line.split_once(['=', ':'])?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((key.to_string(), value))
}

/// Parse a mapping keyed by name. Later lines override earlier ones.
pub fn parse_named_mapping(text: &str) -> BTreeMap<String, f64> {
    parse_mapping_lines(text).into_iter().collect()
}

/// Parse a mapping keyed by a positive integer (pack size, months).
/// Lines whose key is not a positive integer are dropped.
pub fn parse_numeric_mapping(text: &str) -> BTreeMap<u32, f64> {
    parse_mapping_lines(text)
        .into_iter()
        .filter_map(|(key, value)| {
            let key = key.parse::<u32>().ok().filter(|n| *n > 0)?;
            Some((key, value))
        })
        .collect()
}

pub fn format_named_mapping(mapping: &BTreeMap<String, f64>) -> String {
    mapping
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_numeric_mapping(mapping: &BTreeMap<u32, f64>) -> String {
    mapping
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One name per line; blanks skipped, duplicates removed.
pub fn parse_service_list(text: &str) -> Vec<String> {
    dedupe_service_names(text.lines())
}

pub fn format_service_list(names: &[String]) -> String {
    names.join("\n")
}
