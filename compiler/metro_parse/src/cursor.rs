//! Token cursor for navigating the token stream.

use metro_ir::Span;
use metro_lexer::{Token, TokenKind, TokenList};

/// Cursor over a [`TokenList`] and the source it was lexed from.
///
/// The last token is always EOF and the cursor never moves past it.
pub struct Cursor<'a> {
    source: &'a str,
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, tokens: &'a TokenList) -> Self {
        debug_assert!(
            tokens.as_slice().last().map(|t| t.kind) == Some(TokenKind::Eof),
            "token list must end with EOF"
        );
        Cursor {
            source,
            tokens,
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Source text of the current token.
    #[inline]
    pub fn current_text(&self) -> &'a str {
        self.current().text(self.source)
    }

    /// Current string literal without its quotes.
    #[inline]
    pub fn current_body(&self) -> &'a str {
        self.current().body(self.source)
    }

    /// What to call the current token in "found ..." messages.
    pub fn found(&self) -> &'a str {
        match self.current_kind() {
            TokenKind::Eof => "end of file",
            _ => self.current_text(),
        }
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Identifier spelled exactly `keyword`.
    #[inline]
    pub fn check_keyword(&self, keyword: &str) -> bool {
        self.check(TokenKind::Ident) && self.current_text() == keyword
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Move to the next token; returns the one just left.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tracing::trace!(kind = ?token.kind, pos = self.pos, "advance");
        token
    }
}
