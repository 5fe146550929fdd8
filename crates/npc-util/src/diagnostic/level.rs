use std::fmt;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Fatal for the current phase; suppresses later phases.
    Error,
    /// Non-fatal. `SemanticError`s whose message contains "unused" are
    /// always demoted to this level regardless of how they were raised.
    Warning,
    Note,
    Help,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

/// The closed set of diagnostic kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    LexError,
    ParseError,
    TypeError,
    UndefinedVariable,
    UndefinedFunction,
    UndefinedType,
    Redefinition,
    InvalidOperation,
    SemanticError,
    IoError,
}

impl DiagnosticKind {
    /// The severity a diagnostic of this kind has when first raised.
    /// `SemanticError` defaults to `Error` but is demoted to `Warning` by
    /// the driver for "unused"-flavored messages.
    pub fn default_level(self) -> Level {
        Level::Error
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::LexError => "LexError",
            DiagnosticKind::ParseError => "ParseError",
            DiagnosticKind::TypeError => "TypeError",
            DiagnosticKind::UndefinedVariable => "UndefinedVariable",
            DiagnosticKind::UndefinedFunction => "UndefinedFunction",
            DiagnosticKind::UndefinedType => "UndefinedType",
            DiagnosticKind::Redefinition => "Redefinition",
            DiagnosticKind::InvalidOperation => "InvalidOperation",
            DiagnosticKind::SemanticError => "SemanticError",
            DiagnosticKind::IoError => "IOError",
        };
        write!(f, "{name}")
    }
}
