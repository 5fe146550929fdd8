//! Driver-level error type. Per-phase diagnostics travel through
//! `npc_util::Handler` as values, never as `Result` errors; this enum only
//! covers plumbing failures outside the diagnostic system: I/O, the target
//! machine, and the external `clang` link step.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read '{0}': {1}")]
    Io(PathBuf, std::io::Error),

    #[error("compilation failed: {0} diagnostic(s) reported")]
    DiagnosticsReported(usize),

    #[error("failed to resolve target machine for '{0}'")]
    TargetUnavailable(String),

    #[error("failed to write output: {0}")]
    EmitFailed(String),

    #[error("link failed: clang exited with status {0}")]
    LinkFailed(i32),

    #[error("failed to invoke clang: {0}")]
    ClangNotFound(std::io::Error),
}

pub type Result<T> = std::result::Result<T, CompileError>;
