//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the compiler phase. Used for `metroc explain` lookups.

use std::fmt;
use std::str::FromStr;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Semantic errors (names, symbols, consistency)
/// - E3xxx: Dimension algebra errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Unterminated block comment
    E0004,
    /// Source text too large to address
    E0005,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected name
    E1004,
    /// Expected numeric type
    E1005,
    /// Missing unit symbol
    E1006,
    /// Invalid format string
    E1007,
    /// Expected dimension keyword
    E1008,

    // Semantic Errors (E2xxx)
    /// Duplicate definition
    E2001,
    /// Undefined unit
    E2002,
    /// Duplicate unit symbol
    E2003,
    /// Empty unit symbol
    E2004,
    /// Numeric type mismatch
    E2005,
    /// Inconsistent dimensions between alternatives
    E2006,
    /// Inconsistent conversion factors between alternatives
    E2007,
    /// Invalid wedge product
    E2008,
    /// Ambiguous unit-to-scale mapping
    E2009,
    /// Sum or difference of different dimensions
    E2010,

    // Dimension Errors (E3xxx)
    /// Dimension exponent overflow
    E3001,
    /// Invalid dimension power
    E3002,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive (Rust match enforces it).
    pub const ALL: &[ErrorCode] = &[
        // Lexer
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        // Parser
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        // Semantic
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        // Dimension
        ErrorCode::E3001,
        ErrorCode::E3002,
        // Internal
        ErrorCode::E9001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            // Semantic
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            // Dimension
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line explanation, shown by `metroc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => {
                "a string literal is not closed with `\"` before the end of the line"
            }
            ErrorCode::E0002 => "the source contains a character that starts no token",
            ErrorCode::E0003 => "a number has no digits after its `.` or its exponent",
            ErrorCode::E0004 => "a `/*` comment is not closed with `*/`",
            ErrorCode::E0005 => "a definition text may not exceed 4 GiB",
            ErrorCode::E1001 => "a token appears where the grammar does not allow it",
            ErrorCode::E1002 => {
                "an expression was expected: <dimension>, unit, number, (expression) or \"literal\""
            }
            ErrorCode::E1003 => "a `(` is not matched by a `)`",
            ErrorCode::E1004 => "a unit, scale or reference-point name was expected",
            ErrorCode::E1005 => "`<...>` after `unit` must name a numeric type of the target",
            ErrorCode::E1006 => "a unit needs at least one string symbol, e.g. \"m\"",
            ErrorCode::E1007 => "the format after `:` must be a non-empty string",
            ErrorCode::E1008 => "`<...>` in a definition must name a dimension, or be `<>`",
            ErrorCode::E2001 => "units and scales share one namespace; every name must be unique",
            ErrorCode::E2002 => "a definition refers to a unit that has not been defined yet",
            ErrorCode::E2003 => "a unit symbol is already used by another unit",
            ErrorCode::E2004 => "an empty string cannot be a unit symbol",
            ErrorCode::E2005 => "a unit refers to a unit declared over another numeric type",
            ErrorCode::E2006 => "alternative definitions (`|`) of a unit differ in dimension",
            ErrorCode::E2007 => "alternative definitions (`|`) of a unit differ in factor",
            ErrorCode::E2008 => "`^` may only multiply units (or units scaled by numbers)",
            ErrorCode::E2009 => "two scales map the same unit at the same reference point",
            ErrorCode::E2010 => "`+` and `-` need operands of the same dimension",
            ErrorCode::E3001 => "a dimension exponent leaves the range [-128, 127]",
            ErrorCode::E3002 => "a dimension power or root has no integral result",
            ErrorCode::E9001 => "the compiler reached a state it cannot handle; please report it",
        }
    }

    /// Compiler phase that reports this code.
    pub fn phase(&self) -> Phase {
        match self.as_str().as_bytes().get(1) {
            Some(b'0') => Phase::Lexical,
            Some(b'1') => Phase::Syntax,
            Some(b'2') => Phase::Semantic,
            Some(b'3') => Phase::Dimension,
            _ => Phase::Internal,
        }
    }
}

/// Phase named by the first digit of an error code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
    Dimension,
    Internal,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Lexical => "lexical",
            Phase::Syntax => "syntax",
            Phase::Semantic => "semantic",
            Phase::Dimension => "dimension",
            Phase::Internal => "internal",
        })
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = ();

    /// Parse `E1001` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}
