//! Raw tokens recognized by logos, before spans and positions are attached.
//!
//! Malformed input that still has a recognizable shape (an unclosed string,
//! an unclosed block comment, `1.` or `1e`) gets its own variant so the
//! error token covers the whole malformed lexeme, not a single character.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\**")]
    UnterminatedBlockComment,

    #[regex(r"@?[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    #[token("@")]
    LoneAt,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Real,

    #[regex(r"[0-9]+\.")]
    #[regex(r"[0-9]+(\.[0-9]+)?[eE][+-]?")]
    MalformedNumber,

    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    String,

    #[regex(r#""([^"\\\r\n]|\\.)*\\?"#)]
    UnterminatedString,

    // Operators
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("|")]
    Pipe,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
}
