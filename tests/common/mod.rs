//! Shared test utilities for grokfix integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Fixtures are static catalog texts; the only helper
//! touching the filesystem writes a fixture into a caller-owned tempdir.

pub mod fixtures;

pub use fixtures::*;

use std::path::{Path, PathBuf};

/// Write `content` under `dir` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("writing fixture file");
    path
}
