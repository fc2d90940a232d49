//! Diagnostic Emitters
//!
//! Only a terminal emitter exists: colored, human-readable output. Emitters
//! implement [`DiagnosticEmitter`] so the driver does not depend on the
//! output format.

mod terminal;

pub use terminal::{ColorMode, SourceFile, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Closing line after all diagnostics; silent when there were none.
    fn emit_summary(&mut self, error_count: usize);
}
