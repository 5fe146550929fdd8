//! Crate-internal plumbing errors that are not source diagnostics — I/O
//! failures reading a file, a missing external tool. These surface through
//! `anyhow` at the CLI boundary; they are never raised for bugs *in* the
//! source program, which are always [`crate::Diagnostic`] values instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UtilError {
    #[error("could not read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}
