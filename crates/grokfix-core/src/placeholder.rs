//! Placeholder fixer — normalizes dangling Grok placeholder annotations in
//! `grok_exp` fields.
//!
//! Two malformed shapes occur in the hand-maintained catalog:
//!
//! - `%{PATTERN:FIELD:}` — dangling type annotation → `%{PATTERN:FIELD}`
//! - `%{PATTERN:}` — dangling field annotation → `%{PATTERN}`
//!
//! Well-formed placeholders (`%{WORD:method}`) are left untouched. Unlike the
//! lexical scanner, this fixer consumes *parsed* records: the catalog must
//! already be valid JSON.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::Error;

static DOUBLE_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\{([^:}]+:[^:}]*?):\}").unwrap());
static EMPTY_TYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%\{([^:}]+):\}").unwrap());

/// Fixes applied to a single record, for the per-record report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFix {
    /// The record's `format_id`, rendered as text (`?` if absent).
    pub format_id: String,
    /// `PATTERN:FIELD` bodies of the `%{PATTERN:FIELD:}` occurrences found.
    pub double_colon: Vec<String>,
    /// `PATTERN` bodies of the `%{PATTERN:}` occurrences found.
    pub empty_type: Vec<String>,
}

/// Report for one placeholder-fixing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderReport {
    /// One entry per record whose `grok_exp` changed, in catalog order.
    pub fixes: Vec<RecordFix>,
}

impl PlaceholderReport {
    /// Number of records that were modified.
    pub fn total_fixed(&self) -> usize {
        self.fixes.len()
    }
}

/// Rewrite malformed placeholders in every record's `grok_exp`, in place.
///
/// `catalog` must be a top-level JSON array of record objects; records
/// without a string `grok_exp` member are skipped.
pub fn fix_placeholders(catalog: &mut Value) -> Result<PlaceholderReport, Error> {
    let records = catalog.as_array_mut().ok_or(Error::NotACatalog)?;
    let mut report = PlaceholderReport::default();

    for record in records.iter_mut() {
        let Some(original) = record.get("grok_exp").and_then(Value::as_str) else {
            continue;
        };
        let fixed = fix_grok_exp(original);
        if fixed == original {
            continue;
        }

        report.fixes.push(RecordFix {
            format_id: format_id_of(record),
            double_colon: capture_bodies(&DOUBLE_COLON, original),
            empty_type: capture_bodies(&EMPTY_TYPE, original),
        });
        record["grok_exp"] = Value::String(fixed);
    }

    tracing::debug!(records_fixed = report.total_fixed(), "placeholder pass complete");

    Ok(report)
}

/// Rewrite malformed placeholders in one expression.
pub fn fix_grok_exp(grok_exp: &str) -> String {
    let fixed = DOUBLE_COLON.replace_all(grok_exp, "%{${1}}");
    EMPTY_TYPE.replace_all(&fixed, "%{${1}}").into_owned()
}

fn capture_bodies(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn format_id_of(record: &Value) -> String {
    match record.get("format_id") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => "?".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
