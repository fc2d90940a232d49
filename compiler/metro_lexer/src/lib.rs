//! Lexer for metro definition files using logos.
//!
//! Produces a [`TokenList`] whose tokens carry both a byte span and a
//! line/column span. Comments and whitespace are dropped. Malformed input
//! becomes [`TokenKind::Error`] tokens; lexing itself never fails, the parser
//! reports the errors and recovers.

mod raw_token;
mod token;

use logos::Logos;
use metro_ir::{LineOffsetTable, LinePosition, LinePositionSpan, Span};
use tracing::trace;

use raw_token::RawToken;

pub use token::{LexError, Token, TokenKind, TokenList};

/// Lex `source` into tokens.
///
/// Spans are `u32`, so a source longer than `u32::MAX` bytes is not lexed:
/// it yields a single [`LexError::SourceTooLarge`] token before EOF.
pub fn lex(source: &str) -> TokenList {
    let Some(end) = addressable_len(source.len()) else {
        let mut result = TokenList::with_capacity(2);
        let start = LinePositionSpan::new(LinePosition::new(1, 1), LinePosition::new(1, 1));
        result.push(Token::new(
            TokenKind::Error(LexError::SourceTooLarge),
            Span::point(0),
            start,
        ));
        result.push(Token::new(TokenKind::Eof, Span::point(0), start));
        return result;
    };

    let lines = LineOffsetTable::build(source);
    let mut result = TokenList::with_capacity(source.len() / 4 + 1);
    let mut logos = RawToken::lexer(source);

    let mut push = |kind: TokenKind, span: Span| {
        result.push(Token::new(kind, span, lines.span_position(source, span)));
    };

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        match token_result {
            Ok(raw) => {
                if let Some(kind) = convert_token(raw) {
                    push(kind, span);
                }
            }
            Err(()) => push(TokenKind::Error(LexError::UnrecognizedToken), span),
        }
    }

    push(TokenKind::Eof, Span::point(end));

    trace!(tokens = result.len(), "lexed");
    result
}

/// Byte length as a span offset, if it fits.
fn addressable_len(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

/// Cooked kind of a raw token; `None` for comments.
fn convert_token(raw: RawToken) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::Ident => TokenKind::Ident,
        RawToken::Int => TokenKind::Int,
        RawToken::Real => TokenKind::Real,
        RawToken::String => TokenKind::Str,

        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Eq => TokenKind::Eq,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,

        RawToken::UnterminatedBlockComment => {
            TokenKind::Error(LexError::UnterminatedBlockComment)
        }
        RawToken::UnterminatedString => TokenKind::Error(LexError::UnterminatedString),
        RawToken::LoneAt => TokenKind::Error(LexError::InvalidIdentifier),
        RawToken::MalformedNumber => TokenKind::Error(LexError::InvalidNumber),

        RawToken::LineComment | RawToken::BlockComment => return None,
    };
    Some(kind)
}
