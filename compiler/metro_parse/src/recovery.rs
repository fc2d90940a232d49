//! Error recovery for the parser.
//!
//! After a failed statement the parser skips to a point where analysis can
//! resume: just past the next `;`, or at the next `unit`/`scale` keyword.

use metro_lexer::TokenKind;

use crate::cursor::Cursor;
use crate::ParseError;

pub(crate) const UNIT_KEYWORD: &str = "unit";
pub(crate) const SCALE_KEYWORD: &str = "scale";

/// True at an identifier that starts a statement.
pub(crate) fn at_statement_start(cursor: &Cursor<'_>) -> bool {
    cursor.check_keyword(UNIT_KEYWORD) || cursor.check_keyword(SCALE_KEYWORD)
}

/// Skip to the next statement.
///
/// A lexer error token under the cursor is consumed first and returned as
/// an error; it is usually what made the statement fail.
pub(crate) fn synchronize(cursor: &mut Cursor<'_>) -> Option<ParseError> {
    let pending = match cursor.current_kind() {
        TokenKind::Error(error) => {
            let token = cursor.current();
            let err = ParseError::lexical(error, cursor.current_text(), &token);
            cursor.advance();
            Some(err)
        }
        _ => None,
    };

    while !cursor.is_at_end() {
        if cursor.check(TokenKind::Semicolon) {
            cursor.advance();
            break;
        }
        if at_statement_start(cursor) {
            break;
        }
        cursor.advance();
    }
    pending
}
