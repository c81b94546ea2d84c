//! Validity checker — strict JSON parse of a transformed catalog.
//!
//! Runs once, after a full transform; a parse failure is reported with
//! location context and is non-fatal (the caller persists a debug artifact
//! and keeps the primary output for manual repair).

use std::path::{Path, PathBuf};

use serde_json::Value;

/// At most this many characters of the offending line are echoed back.
const SNIPPET_MAX_CHARS: usize = 200;

/// Counts reported after a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Top-level records in the catalog.
    pub records: usize,
    /// Total entries across every `patterns` member found under the records'
    /// array-valued members (`log_type` in the original data).
    pub patterns: usize,
}

/// A reported, non-fatal parse failure with location context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// 1-based line of the failure, as reported by the parser.
    pub line: usize,
    /// 1-based column of the failure.
    pub column: usize,
    /// The parser's own message.
    pub message: String,
    /// Leading text of the offending line, bounded to a readable length.
    pub snippet: String,
}

/// Attempt a strict parse of `text`. On success, return the parsed document
/// and its derived counts; on failure, return location context for the
/// report.
pub fn check(text: &str) -> Result<(Value, CatalogStats), ParseFailure> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => {
            let stats = stats_of(&value);
            Ok((value, stats))
        }
        Err(err) => {
            let line = err.line();
            let snippet = text
                .lines()
                .nth(line.saturating_sub(1))
                .unwrap_or("")
                .chars()
                .take(SNIPPET_MAX_CHARS)
                .collect();
            Err(ParseFailure {
                line,
                column: err.column(),
                message: err.to_string(),
                snippet,
            })
        }
    }
}

/// Derive record and pattern counts from a parsed catalog.
pub fn stats_of(value: &Value) -> CatalogStats {
    let records: &[Value] = match value {
        Value::Array(records) => records,
        other => std::slice::from_ref(other),
    };
    let patterns = records.iter().map(record_pattern_count).sum();
    CatalogStats {
        records: records.len(),
        patterns,
    }
}

/// Sum of `patterns` lengths over every array-valued member's entries.
fn record_pattern_count(record: &Value) -> usize {
    let Some(members) = record.as_object() else {
        return 0;
    };
    members
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|entry| entry.get("patterns"))
        .filter_map(Value::as_array)
        .map(Vec::len)
        .sum()
}

/// Sibling path for the unparsed-output debug artifact:
/// `GROK-PATTERN-CONVERTER-FIXED.json` → `GROK-PATTERN-CONVERTER-FIXED.debug.json`.
pub fn debug_artifact_path(output: &Path) -> PathBuf {
    output.with_extension("debug.json")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
