//! Diagnostic system for error reporting.
//!
//! - Error codes for searchability (`metroc explain E2002`)
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes and suggestions (how to fix it)
//!
//! The compiler core never prints: it hands [`Diagnostic`]s to the driver,
//! which renders them through an [`emitter::DiagnosticEmitter`].

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::{ErrorCode, Phase};
