//! Lexical scanner — removes `data_table` spans from a JSON-like text stream.
//!
//! The input is *not yet valid JSON* when this runs, so no parser is available:
//! the scanner works line by line, locating the target key token lexically and
//! consuming its value by brace/bracket balance counting. Everything outside a
//! span is passed through byte-for-byte (line terminators included); the only
//! other mutation is the removal of the one field separator left dangling
//! after a deleted span.
//!
//! Bracket counting is deliberately blind — it does not understand string
//! literals. Content inside a span is opaque, so a key token occurring in
//! nested data never re-triggers span entry; a miscount caused by unbalanced
//! brackets inside string values surfaces later in the validity check.

use crate::error::Error;

/// The field this tool exists to remove.
pub const DEFAULT_TARGET_FIELD: &str = "data_table";

/// Result of a strip run over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    /// Transformed document text.
    pub output: String,
    /// Number of target-field spans removed.
    pub spans_removed: usize,
    /// Number of input lines dropped entirely.
    pub lines_removed: usize,
}

// ---------------------------------------------------------------------------
// Scan state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Not inside any span; lines pass through.
    Outside,
    /// Consuming a span. `depth` is the running bracket balance; `opened` is
    /// false until the value's first opener has been seen, so a bracket-less
    /// line under a not-yet-opened span cannot close it. `opened_at` is the
    /// 1-based line the key appeared on, for the unterminated-span report.
    InsideSpan {
        depth: usize,
        opened: bool,
        opened_at: usize,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Remove every full occurrence of `key` (the quoted member name plus its
/// entire array/object value span) from `input`.
///
/// Fails with [`Error::UnterminatedSpan`] if the document ends while a span
/// is still open, and with [`Error::AmbiguousSpanBoundary`] if a line that
/// closes a span contains the key token again (see module docs).
pub fn strip_str(input: &str, key: &str) -> Result<StripOutcome, Error> {
    let token = format!("\"{key}\"");
    let mut out = String::with_capacity(input.len());
    let mut state = ScanState::Outside;
    let mut pending_separator = false;
    let mut spans_removed = 0usize;
    let mut lines_removed = 0usize;

    for (idx, raw) in input.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        let (content, terminator) = split_terminator(raw);

        match state {
            ScanState::Outside => {
                let Some(found) = find_key(content, &token) else {
                    // Plain line: pass through, fixing a dangling separator
                    // left by a span that closed at end-of-line above.
                    if pending_separator {
                        pending_separator = false;
                        out.push_str(&remove_leading_separator(content));
                        out.push_str(terminator);
                    } else {
                        out.push_str(raw);
                    }
                    continue;
                };

                // Span entry. Text before the key survives; the key and its
                // value do not.
                let mut prefix = content[..found.key_start].to_string();
                if pending_separator {
                    pending_separator = false;
                    prefix = remove_leading_separator(&prefix);
                }

                match scan_for_close(&content[found.value_start..], 0, false) {
                    ScanStep::Closed { consumed } => {
                        spans_removed += 1;
                        let suffix = &content[found.value_start + consumed..];
                        if suffix.contains(&token) {
                            return Err(Error::AmbiguousSpanBoundary {
                                key: key.to_string(),
                                line: line_no,
                            });
                        }
                        let rest = remove_leading_separator(suffix);
                        emit_or_drop(
                            &mut out,
                            &format!("{prefix}{rest}"),
                            terminator,
                            &mut lines_removed,
                        );
                        if suffix.trim().is_empty() {
                            // Nothing after the close to inspect; the fix
                            // carries over to the next emitted line.
                            pending_separator = true;
                        }
                    }
                    ScanStep::Open { depth, opened } => {
                        state = ScanState::InsideSpan {
                            depth,
                            opened,
                            opened_at: line_no,
                        };
                        emit_or_drop(&mut out, &prefix, terminator, &mut lines_removed);
                    }
                }
            }

            ScanState::InsideSpan {
                depth,
                opened,
                opened_at,
            } => match scan_for_close(content, depth, opened) {
                ScanStep::Closed { consumed } => {
                    state = ScanState::Outside;
                    spans_removed += 1;
                    let suffix = &content[consumed..];
                    if suffix.contains(&token) {
                        return Err(Error::AmbiguousSpanBoundary {
                            key: key.to_string(),
                            line: line_no,
                        });
                    }
                    let rest = remove_leading_separator(suffix);
                    emit_or_drop(&mut out, &rest, terminator, &mut lines_removed);
                    if suffix.trim().is_empty() {
                        pending_separator = true;
                    }
                }
                ScanStep::Open {
                    depth: d,
                    opened: o,
                } => {
                    state = ScanState::InsideSpan {
                        depth: d,
                        opened: o,
                        opened_at,
                    };
                    lines_removed += 1;
                }
            },
        }
    }

    if let ScanState::InsideSpan { opened_at, .. } = state {
        return Err(Error::UnterminatedSpan {
            key: key.to_string(),
            opened_at,
        });
    }

    tracing::debug!(spans_removed, lines_removed, "strip pass complete");

    Ok(StripOutcome {
        output: out,
        spans_removed,
        lines_removed,
    })
}

// ---------------------------------------------------------------------------
// Lexical helpers
// ---------------------------------------------------------------------------

struct KeyHit {
    /// Byte offset of the opening quote of the key token.
    key_start: usize,
    /// Byte offset just past the key/value separator (`:`).
    value_start: usize,
}

/// Locate the quoted key token followed (after optional whitespace) by `:`.
/// An occurrence without the separator (the key name as a string value, say)
/// is skipped and the search continues on the same line.
fn find_key(line: &str, token: &str) -> Option<KeyHit> {
    let mut from = 0;
    while let Some(pos) = line[from..].find(token) {
        let key_start = from + pos;
        let after = &line[key_start + token.len()..];
        let ws = after.len() - after.trim_start().len();
        if after[ws..].starts_with(':') {
            return Some(KeyHit {
                key_start,
                value_start: key_start + token.len() + ws + 1,
            });
        }
        from = key_start + token.len();
    }
    None
}

enum ScanStep {
    /// A closer returned an opened span to depth 0. `consumed` is the byte
    /// length of `text` up to and including that closer.
    Closed { consumed: usize },
    /// End of line reached with the span still open (or not yet opened).
    Open { depth: usize, opened: bool },
}

/// Advance the bracket balance across `text`, starting from `depth`/`opened`.
fn scan_for_close(text: &str, mut depth: usize, mut opened: bool) -> ScanStep {
    for (i, ch) in text.char_indices() {
        match ch {
            '[' | '{' => {
                depth += 1;
                opened = true;
            }
            ']' | '}' => {
                depth = depth.saturating_sub(1);
                if opened && depth == 0 {
                    return ScanStep::Closed {
                        consumed: i + ch.len_utf8(),
                    };
                }
            }
            _ => {}
        }
    }
    ScanStep::Open { depth, opened }
}

/// Remove exactly one separator if the first non-whitespace character is `,`.
/// A missing separator is not an error: the removed field may have been the
/// last member.
fn remove_leading_separator(text: &str) -> String {
    if text.trim_start().starts_with(',') {
        text.replacen(',', "", 1)
    } else {
        text.to_string()
    }
}

/// Emit `content` with its original terminator, unless it is whitespace-only
/// (the pretty-printed common case, where the whole line belonged to the
/// span and nothing of it survives).
fn emit_or_drop(out: &mut String, content: &str, terminator: &str, lines_removed: &mut usize) {
    if content.trim().is_empty() {
        *lines_removed += 1;
    } else {
        out.push_str(content);
        out.push_str(terminator);
    }
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
