use super::{Diagnostic, DiagnosticCode, DiagnosticKind, Handler, Level};
use crate::Span;

/// Fluent constructor for a `Diagnostic`.
///
/// ```
/// use npc_util::diagnostic::{DiagnosticBuilder, DiagnosticKind};
/// use npc_util::Span;
///
/// let diag = DiagnosticBuilder::new(DiagnosticKind::ParseError, "unexpected token")
///     .span(Span::DUMMY)
///     .build();
/// assert_eq!(diag.kind, DiagnosticKind::ParseError);
/// ```
pub struct DiagnosticBuilder {
    kind: DiagnosticKind,
    message: String,
    level: Option<Level>,
    span: Option<Span>,
    code: Option<DiagnosticCode>,
}

impl DiagnosticBuilder {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            level: None,
            span: None,
            code: None,
        }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn build(self) -> Diagnostic {
        let level = self.level.unwrap_or_else(|| self.kind.default_level());
        Diagnostic {
            kind: self.kind,
            level,
            message: self.message,
            location: self.span,
            code: self.code,
        }
    }

    /// Build and immediately hand the diagnostic to `handler`.
    pub fn emit(self, handler: &mut Handler) {
        handler.emit(self.build());
    }
}
