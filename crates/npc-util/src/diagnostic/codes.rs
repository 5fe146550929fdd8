use std::fmt;

/// A stable, numeric diagnostic code paired with a short machine-readable
/// name (e.g. `E0001 unexpected_token`). Attaching a code is optional;
/// every diagnostic already carries a `kind`, `message`, and an optional
/// location on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticCode {
    pub number: u32,
    pub name: &'static str,
}

impl DiagnosticCode {
    pub const fn new(number: u32, name: &'static str) -> Self {
        Self { number, name }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.number)
    }
}

pub const E_LEXER_UNTERMINATED_STRING: DiagnosticCode =
    DiagnosticCode::new(1001, "unterminated_string");
pub const E_LEXER_UNKNOWN_BYTE: DiagnosticCode = DiagnosticCode::new(1002, "unknown_byte");

pub const E_PARSER_UNEXPECTED_TOKEN: DiagnosticCode =
    DiagnosticCode::new(2001, "unexpected_token");

pub const E_SEMANTIC_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode::new(3001, "type_mismatch");
pub const E_SEMANTIC_UNDEFINED_VAR: DiagnosticCode = DiagnosticCode::new(3002, "undefined_var");
pub const E_SEMANTIC_UNDEFINED_FN: DiagnosticCode = DiagnosticCode::new(3003, "undefined_fn");
pub const E_SEMANTIC_UNDEFINED_TYPE: DiagnosticCode = DiagnosticCode::new(3004, "undefined_type");
pub const E_SEMANTIC_REDEFINITION: DiagnosticCode = DiagnosticCode::new(3005, "redefinition");

pub const W_UNUSED_VARIABLE: DiagnosticCode = DiagnosticCode::new(4001, "unused_variable");
