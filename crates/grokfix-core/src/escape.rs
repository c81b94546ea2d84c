//! Escape fixer — repairs malformed backslash escapes in `grok_exp` and
//! `samplelog` string values so the catalog parses as strict JSON.
//!
//! The repair is line-oriented: only lines of the shape
//! `"grok_exp": "…"` / `"samplelog": "…"` are touched, and only their string
//! value is rewritten. Within a value, the already-correct two-character
//! escapes `\\` and `\"` are preserved and every remaining lone backslash is
//! doubled. The rewrite is a single forward scan; a value containing only
//! correct escapes is a fixpoint.

use std::sync::LazyLock;

use regex::Regex;

/// Lines carrying a repairable string field: captures the `"name": ` prefix
/// (1), the field name (2), and the raw value between the outer quotes (3).
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s*"(grok_exp|samplelog)"\s*:\s*)"(.*)",?\s*$"#).unwrap()
});

/// Outcome of one escape-fixing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeOutcome {
    /// Repaired document text (not yet guaranteed to parse).
    pub output: String,
    /// Number of lines whose value actually changed.
    pub lines_changed: usize,
}

/// Repair escapes across the whole document, line by line. Lines that do not
/// match the field shape pass through byte-for-byte.
pub fn fix_escapes(input: &str) -> EscapeOutcome {
    let mut out = String::with_capacity(input.len());
    let mut lines_changed = 0usize;

    for raw in input.split_inclusive('\n') {
        let (content, terminator) = split_terminator(raw);

        // Cheap gate before the regex, as most lines are not field lines.
        let hit = (content.contains("\"grok_exp\"") || content.contains("\"samplelog\""))
            .then(|| FIELD_LINE.captures(content))
            .flatten();

        let Some(caps) = hit else {
            out.push_str(raw);
            continue;
        };

        let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let value = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
        let fixed = fix_escape_value(value);

        if fixed == value {
            out.push_str(raw);
            continue;
        }

        lines_changed += 1;
        out.push_str(prefix);
        out.push('"');
        out.push_str(&fixed);
        out.push('"');
        if content.trim_end().ends_with(',') {
            out.push(',');
        }
        out.push_str(terminator);
    }

    tracing::debug!(lines_changed, "escape pass complete");

    EscapeOutcome {
        output: out,
        lines_changed,
    }
}

/// Repair one string value: keep `\\` and `\"` pairs, double every other
/// backslash (including one at end of value).
pub fn fix_escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                chars.next();
                out.push_str(r"\\");
            }
            Some('"') => {
                chars.next();
                out.push_str(r#"\""#);
            }
            _ => out.push_str(r"\\"),
        }
    }
    out
}

fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(content) = raw.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = raw.strip_suffix('\n') {
        (content, "\n")
    } else {
        (raw, "")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::lone_backslash(r"%{IP:ip} \d+", r"%{IP:ip} \\d+")]
    #[case::preserved_double(r"a \\ b", r"a \\ b")]
    #[case::preserved_quote(r#"a \" b"#, r#"a \" b"#)]
    #[case::trailing_backslash("tail\\", r"tail\\")]
    #[case::mixed(r#"\\ \" \w"#, r#"\\ \" \\w"#)]
    #[case::no_backslash("plain text", "plain text")]
    fn value_repair(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fix_escape_value(input), expected);
    }

    #[test]
    fn repair_is_a_fixpoint() {
        let once = fix_escape_value(r"%{NUMBER:n} \s \\ end\");
        let twice = fix_escape_value(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn grok_exp_line_is_rewritten_keeping_comma() {
        let input = "  \"grok_exp\": \"%{IP:ip} \\d+\",\n";
        let outcome = fix_escapes(input);
        assert_eq!(outcome.output, "  \"grok_exp\": \"%{IP:ip} \\\\d+\",\n");
        assert_eq!(outcome.lines_changed, 1);
    }

    #[test]
    fn samplelog_line_without_comma() {
        let input = "  \"samplelog\": \"GET \\path HTTP/1.1\"\n";
        let outcome = fix_escapes(input);
        assert_eq!(outcome.output, "  \"samplelog\": \"GET \\\\path HTTP/1.1\"\n");
    }

    #[test]
    fn other_lines_pass_through_byte_for_byte() {
        let input = "{\n  \"format_id\": 3,\n  \"name\": \"has \\ backslash but wrong field\"\n}\n";
        let outcome = fix_escapes(input);
        assert_eq!(outcome.output, input);
        assert_eq!(outcome.lines_changed, 0);
    }

    #[test]
    fn already_valid_field_line_is_unchanged() {
        let input = "  \"grok_exp\": \"%{WORD:w} \\\\d+\",\n";
        let outcome = fix_escapes(input);
        assert_eq!(outcome.output, input);
        assert_eq!(outcome.lines_changed, 0);
    }

    #[test]
    fn fixed_document_parses() {
        let input = "[\n  {\n    \"format_id\": 1,\n    \"grok_exp\": \"%{IP:ip} \\d+\",\n    \"samplelog\": \"10.0.0.1 42\"\n  }\n]\n";
        assert!(serde_json::from_str::<serde_json::Value>(input).is_err());
        let outcome = fix_escapes(input);
        let value: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(value[0]["grok_exp"], "%{IP:ip} \\d+");
    }
}
