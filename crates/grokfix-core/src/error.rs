//! Error taxonomy for grokfix-core.
//!
//! Structural errors from the lexical scanner are fatal for the strip run;
//! parse failures are *not* errors here — they travel as
//! [`ParseFailure`](crate::validate::ParseFailure) values because the
//! validity check is reported, non-fatal.

use thiserror::Error;

/// Errors produced by the core transforms.
#[derive(Debug, Error)]
pub enum Error {
    /// The target field's value span opened but never closed before end of
    /// input: the file is truncated or the brackets are unbalanced. Output
    /// produced under this condition is unreliable and must not be trusted.
    #[error("span of field \"{key}\" opened on line {opened_at} never closes before end of input")]
    UnterminatedSpan { key: String, opened_at: usize },

    /// A line both closes a span and contains another occurrence of the
    /// target key. The scanner never re-scans text it has already decided to
    /// emit, so it cannot tell a new top-level member from nested content.
    /// Unsupported input; refuse rather than guess.
    #[error("line {line} closes a \"{key}\" span and contains the key again; refusing to guess")]
    AmbiguousSpanBoundary { key: String, line: usize },

    /// The placeholder fixer needs a parsed catalog: a top-level JSON array
    /// of record objects.
    #[error("expected a top-level JSON array of records")]
    NotACatalog,
}
