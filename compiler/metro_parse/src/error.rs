//! Parse error records.
//!
//! A [`ParseError`] is what the parser hands over on the diagnostics channel:
//! where (byte span and line/column span), what (code and message), and
//! optionally the underlying cause. The driver turns it into a
//! [`Diagnostic`] for rendering.

use std::fmt;

use metro_diagnostic::{Diagnostic, ErrorCode};
use metro_ir::{LinePositionSpan, Span};
use metro_lexer::{LexError, Token};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Location of the error.
    pub span: Span,
    /// The same location as line/column pairs.
    pub position: LinePositionSpan,
    /// Lower-level error that triggered this one.
    pub cause: Option<String>,
    /// How the text might be fixed.
    pub help: Option<String>,
}

impl ParseError {
    /// Error reported at `token`.
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, token: &Token) -> Self {
        ParseError {
            code,
            message: message.into(),
            span: token.span,
            position: token.position,
            cause: None,
            help: None,
        }
    }

    /// Error for a lexer error token that stopped a statement.
    #[cold]
    pub fn lexical(error: LexError, text: &str, token: &Token) -> Self {
        ParseError::new(
            lex_error_code(error),
            format!("'{text}': {}.", error.message()),
            token,
        )
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, "here");
        if let Some(cause) = &self.cause {
            diag = diag.with_note(cause);
        }
        if let Some(help) = &self.help {
            diag = diag.with_suggestion(help);
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

fn lex_error_code(error: LexError) -> ErrorCode {
    match error {
        LexError::UnterminatedString => ErrorCode::E0001,
        LexError::UnrecognizedToken | LexError::InvalidIdentifier => ErrorCode::E0002,
        LexError::InvalidNumber => ErrorCode::E0003,
        LexError::UnterminatedBlockComment => ErrorCode::E0004,
        LexError::SourceTooLarge => ErrorCode::E0005,
    }
}
