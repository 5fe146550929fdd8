//! npc-util - core types shared by every compiler phase.
//!
//! Small, dependency-light foundations: source [`Span`]s, interned
//! [`Symbol`]s, the uniform [`diagnostic`] currency phases report errors
//! with, and a typed [`IndexVec`] for arena-style storage (scopes, basic
//! blocks).

pub mod diagnostic;
mod error;
mod index_vec;
mod span;
mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticKind, Handler, Level};
pub use error::UtilError;
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;
