//! Recursive descent parser for unit and scale definitions.
//!
//! Statements are parsed one at a time. An accepted statement is compiled,
//! normalized and bound, then registered before the next one starts, so later
//! definitions can refer to earlier units. A failed statement is reported and
//! skipped; it leaves nothing behind in the [`Registry`].

mod cancel;
pub mod compile;
mod cursor;
mod error;
mod grammar;
mod options;
mod recovery;
mod suggest;

#[cfg(test)]
mod tests;

pub use cancel::CancellationToken;
pub use compile::{CompileError, ExprCompiler};
pub use error::ParseError;
pub use options::CompileOptions;

use metro_diagnostic::ErrorCode;
use metro_ir::{ExprArena, MeasureId, Registry};
use metro_lexer::{TokenKind, TokenList};
use tracing::debug;

use crate::cursor::Cursor;
use crate::recovery::{synchronize, SCALE_KEYWORD, UNIT_KEYWORD};

/// Parser state for one pass over a definition text.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    registry: &'a mut Registry,
    arena: ExprArena,
    /// Errors that did not stop their statement (rejected symbols).
    errors: Vec<ParseError>,
    /// Name of the unit or scale being defined, for message prefixes.
    entity: String,
}

/// Everything one pass produced besides the registry entries themselves.
#[derive(Debug, Default)]
pub struct ParseOutput {
    /// Units and scales registered by this pass, in definition order.
    pub definitions: Vec<MeasureId>,
    pub errors: Vec<ParseError>,
    /// The pass stopped early because cancellation was requested.
    pub cancelled: bool,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The whole text was processed without a single error.
    pub fn is_success(&self) -> bool {
        !self.cancelled && self.errors.is_empty()
    }
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: &'a TokenList, registry: &'a mut Registry) -> Self {
        Parser {
            cursor: Cursor::new(source, tokens),
            registry,
            arena: ExprArena::new(),
            errors: Vec::new(),
            entity: String::new(),
        }
    }

    /// Parse every statement, registering the ones that succeed.
    ///
    /// `cancel` is polled before each statement.
    pub fn parse_definitions(mut self, cancel: &CancellationToken) -> ParseOutput {
        let mut output = ParseOutput::default();

        while !self.cursor.is_at_end() {
            if cancel.is_cancelled() {
                debug!(
                    parsed = output.definitions.len(),
                    "cancelled, stopping before next statement"
                );
                output.cancelled = true;
                break;
            }

            self.entity.clear();
            let result = if self.cursor.check_keyword(UNIT_KEYWORD) {
                self.cursor.advance();
                self.parse_unit()
            } else if self.cursor.check_keyword(SCALE_KEYWORD) {
                self.cursor.advance();
                self.parse_scale()
            } else {
                Err(ParseError::new(
                    ErrorCode::E1001,
                    format!(
                        "found \"{}\" while expected \"{UNIT_KEYWORD}\" or \"{SCALE_KEYWORD}\" keyword.",
                        self.cursor.found()
                    ),
                    &self.cursor.current(),
                ))
            };

            output.errors.append(&mut self.errors);
            match result {
                Ok(id) => {
                    debug!(name = self.registry.name(id), ?id, "definition accepted");
                    output.definitions.push(id);
                }
                Err(err) => {
                    debug!(code = %err.code, message = %err.message, "statement rejected");
                    self.recover(err, &mut output.errors);
                }
            }
        }

        output
    }

    /// Skip the rest of a failed statement and record why it failed.
    ///
    /// When the statement stumbled over a lexer error token, the lexical
    /// error is the one reported.
    fn recover(&mut self, err: ParseError, errors: &mut Vec<ParseError>) {
        let at_error_token = matches!(self.cursor.current_kind(), TokenKind::Error(_))
            && self.cursor.current_span() == err.span;
        let pending = synchronize(&mut self.cursor);
        if !at_error_token {
            errors.push(err);
        }
        errors.extend(pending);
    }
}

/// Parse `source` into `registry`, which may already hold seeded measures.
pub fn parse(source: &str, registry: &mut Registry, cancel: &CancellationToken) -> ParseOutput {
    let tokens = metro_lexer::lex(source);
    Parser::new(source, &tokens, registry).parse_definitions(cancel)
}

/// Result of compiling a definition text into a fresh registry.
#[derive(Debug)]
pub struct Compilation {
    pub registry: Registry,
    pub output: ParseOutput,
}

/// Compile `source` on its own, with an empty registry.
pub fn compile(
    source: &str,
    options: &CompileOptions,
    cancel: &CancellationToken,
) -> Compilation {
    let mut registry = options.registry();
    let output = parse(source, &mut registry, cancel);
    Compilation { registry, output }
}
