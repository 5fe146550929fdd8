//! Uniform diagnostic values.
//!
//! A diagnostic is a plain value: `{kind, message, location?}` plus the
//! severity it was raised at. Phases never throw; each phase accumulates
//! diagnostics into a `Handler` that is merged into the driver's own at the
//! end of the phase.

mod builder;
mod codes;
mod level;

pub use builder::DiagnosticBuilder;
pub use codes::*;
pub use level::{DiagnosticKind, Level};

use crate::Span;
use std::fmt;

/// A single diagnostic: an error, warning, note, or help.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub level: Level,
    pub message: String,
    pub location: Option<Span>,
    pub code: Option<DiagnosticCode>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, location: Option<Span>) -> Self {
        Self {
            level: kind.default_level(),
            kind,
            message: message.into(),
            location,
            code: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.level, self.kind, self.message)?;
        if let Some(loc) = self.location {
            if !loc.is_dummy() {
                write!(f, " [at {}:{}]", loc.line, loc.column)?;
            }
        }
        Ok(())
    }
}

/// Accumulates diagnostics for one phase (or one whole compilation).
///
/// Severity demotion happens here, not in each phase: any `SemanticError`
/// whose message contains "unused" is always downgraded to a `Warning` on
/// the way in, regardless of which pass raised it.
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, mut diag: Diagnostic) {
        if diag.kind == DiagnosticKind::SemanticError
            && diag.message.to_lowercase().contains("unused")
        {
            diag.level = Level::Warning;
        }
        self.diagnostics.push(diag);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Merge another handler's diagnostics into this one, preserving
    /// source order within each and appending the other's after this
    /// one's.
    pub fn merge(&mut self, other: Handler) {
        self.diagnostics.extend(other.diagnostics);
    }
}
