//! grokfix-core — batch transforms for Grok log-format catalogs.
//!
//! The catalog is a large, hand-maintained JSON-like file of log-format
//! records. It arrives *invalid*: an auxiliary `data_table` member bloats
//! every record, backslashes in pattern strings are under-escaped, and some
//! Grok placeholders carry dangling annotations. The transforms run as
//! separate one-shot passes:
//!
//! ```text
//! strip ──► validate        lexical, no JSON parser available yet
//! escape ──► validate       line-oriented string repair
//! placeholder               operates on parsed records
//! ```
//!
//! Every pass is a pure function over text (or a parsed document); all file
//! I/O and reporting lives in the `grokfix` binary.

pub mod error;
pub mod escape;
pub mod placeholder;
pub mod strip;
pub mod validate;

pub use error::Error;
pub use escape::EscapeOutcome;
pub use placeholder::PlaceholderReport;
pub use strip::{StripOutcome, DEFAULT_TARGET_FIELD};
pub use validate::{CatalogStats, ParseFailure};
