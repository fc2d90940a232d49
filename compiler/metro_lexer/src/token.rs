//! Cooked tokens.

use std::fmt;

use metro_ir::{LinePositionSpan, Span};

/// What the lexer could not make sense of.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexError {
    /// A character no token starts with.
    UnrecognizedToken,
    /// `/*` without a closing `*/`.
    UnterminatedBlockComment,
    /// `"` without a closing `"` on the same line.
    UnterminatedString,
    /// `@` not followed by an identifier.
    InvalidIdentifier,
    /// `1.`, `1e`, `1.5e+` and the like.
    InvalidNumber,
    /// The text is longer than a `u32` offset can address.
    SourceTooLarge,
}

impl LexError {
    pub fn message(self) -> &'static str {
        match self {
            LexError::UnrecognizedToken => "unrecognized token",
            LexError::UnterminatedBlockComment => {
                "unexpected EOF while looking for characters \"*/\" closing block comment"
            }
            LexError::UnterminatedString => {
                "unexpected EOL/EOF while looking for the quotation mark (\") closing string literal"
            }
            LexError::InvalidIdentifier => "invalid identifier",
            LexError::InvalidNumber => {
                "invalid number (not of the form: \"{digit}+ | {digit}+'.'{digit}+(('e'|'E')('+'|'-')?{digit}+)?\")"
            }
            LexError::SourceTooLarge => "source text exceeds 4 GiB and was not lexed",
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Token kinds of the definition language.
///
/// `unit` and `scale` are plain identifiers here: they are keywords only in
/// statement position, so a unit may still be called `scale`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    Ident,
    Int,
    Real,
    /// Double-quoted literal; [`Token::body`] strips the quotes.
    Str,

    Lt,
    Gt,
    Eq,
    LParen,
    RParen,
    Pipe,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Colon,
    Semicolon,

    Error(LexError),
    Eof,
}

impl TokenKind {
    /// Short name used in token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Real => "real",
            TokenKind::Str => "string",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Eq => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Pipe => "'|'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Error(_) => "error",
            TokenKind::Eof => "end of file",
        }
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, TokenKind::Error(_))
    }

    #[inline]
    pub fn is_number(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Real)
    }
}

/// A token with its byte span and its line/column span.
///
/// Tokens do not own text; [`Token::text`] slices it out of the source the
/// token list was built from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub position: LinePositionSpan,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, position: LinePositionSpan) -> Self {
        Token {
            kind,
            span,
            position,
        }
    }

    /// Source text of the token; empty for EOF.
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.to_range()).unwrap_or("")
    }

    /// Text with the surrounding quotes removed for string literals.
    /// Escapes are kept as written: the body is target-language code.
    pub fn body<'src>(&self, source: &'src str) -> &'src str {
        let text = self.text(source);
        match self.kind {
            TokenKind::Str => text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(text),
            _ => text,
        }
    }
}

/// Lexer output; always ends with exactly one [`TokenKind::Eof`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Error tokens in source order.
    pub fn errors(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.kind.is_error())
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
