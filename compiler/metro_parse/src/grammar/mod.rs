//! Grammar productions.
//!
//! Each module extends [`Parser`] with the methods for one statement kind:
//!
//! - [`unit`]: `unit [<type>] Name "tag"+ [: "format"] = DimExpr (| DimExpr)* ;`
//! - [`scale`]: `scale Name [: "format"] [RefPoint] = Unit NumExpr ;`
//!
//! The productions shared by both live here.

mod scale;
mod unit;

use metro_diagnostic::ErrorCode;
use metro_ir::{DimExpr, DimensionError, ExprId, NumExpr, NumericType};
use metro_lexer::{Token, TokenKind};

use crate::compile::{CompileError, ExprCompiler};
use crate::suggest::suggest_similar;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Error at the current token, prefixed with the name being defined.
    #[cold]
    fn error_here(&self, code: ErrorCode, message: impl std::fmt::Display) -> ParseError {
        self.error_at(code, message, &self.cursor.current())
    }

    #[cold]
    fn error_at(
        &self,
        code: ErrorCode,
        message: impl std::fmt::Display,
        token: &Token,
    ) -> ParseError {
        ParseError::new(code, format!("{}: {message}", self.entity), token)
    }

    /// E2002 at the current token, with the closest known unit as a hint.
    fn undefined_unit(&self, name: &str) -> ParseError {
        let err = self.error_here(ErrorCode::E2002, format_args!("undefined unit \"{name}\"."));
        let units = self.registry.units().map(|(_, measure, _)| measure.name());
        match suggest_similar(name, units) {
            Some(similar) => err.with_help(format!("did you mean `{similar}`?")),
            None => err,
        }
    }

    /// Name of a new unit or scale. Names are unique across both kinds.
    fn parse_entity_name(&mut self, what: &str) -> Result<String, ParseError> {
        if !self.cursor.check(TokenKind::Ident) {
            return Err(ParseError::new(
                ErrorCode::E1004,
                format!(
                    "found \"{}\" while expected {what} name.",
                    self.cursor.found()
                ),
                &self.cursor.current(),
            ));
        }
        let name = self.cursor.current_text().to_owned();
        self.entity.clone_from(&name);
        if self.registry.find_measure(&name).is_some() {
            return Err(self.error_here(
                ErrorCode::E2001,
                "redefinition is not allowed (units/scales must have unique names).",
            ));
        }
        self.cursor.advance();
        Ok(name)
    }

    /// `: "format"`, or `default` when there is no colon.
    fn parse_format(&mut self, default: &str) -> Result<String, ParseError> {
        if !self.cursor.check(TokenKind::Colon) {
            return Ok(default.to_owned());
        }
        self.cursor.advance();
        if !self.cursor.check(TokenKind::Str) {
            return Err(self.error_here(
                ErrorCode::E1007,
                format_args!(
                    "found \"{}\", while a format string (e.g. \"{{0}} {{1}}\" or \"%f %s\") was expected.",
                    self.cursor.found()
                ),
            ));
        }
        let format = self.cursor.current_body();
        if format.trim().is_empty() {
            return Err(self.error_here(ErrorCode::E1007, "empty format string."));
        }
        self.cursor.advance();
        Ok(format.to_owned())
    }

    fn expect_equals(&mut self) -> Result<(), ParseError> {
        if !self.cursor.check(TokenKind::Eq) {
            return Err(self.error_here(
                ErrorCode::E1001,
                format_args!(
                    "found \"{}\" while expected equal sign \"=\".",
                    self.cursor.found()
                ),
            ));
        }
        self.cursor.advance();
        Ok(())
    }

    fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        if !self.cursor.check(TokenKind::Semicolon) {
            return Err(self.error_here(
                ErrorCode::E1001,
                format_args!(
                    "found \"{}\", while a definition terminated with semicolon (\";\") was expected.",
                    self.cursor.found()
                ),
            ));
        }
        self.cursor.advance();
        Ok(())
    }

    /// `)` closing an expression opened at an earlier `(`.
    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        if !self.cursor.check(TokenKind::RParen) {
            return Err(self.error_here(
                ErrorCode::E1003,
                format_args!(
                    "found \"{}\" while expected expression in parentheses ().",
                    self.cursor.found()
                ),
            ));
        }
        self.cursor.advance();
        Ok(())
    }

    /// Compile the tree at `id`; errors point at `start`, the token the
    /// expression began with.
    fn compile_tree(
        &self,
        id: ExprId,
        numeric: NumericType,
        start: &Token,
    ) -> Result<(DimExpr, NumExpr), ParseError> {
        ExprCompiler::new(&self.arena, self.registry, numeric)
            .compile(id)
            .map_err(|err| {
                let tree = self.arena.display(id, self.registry);
                match &err {
                    CompileError::Dimension(
                        DimensionError::ZeroDenominator { .. }
                        | DimensionError::FractionalExponent { .. },
                    ) => self.error_at(
                        ErrorCode::E3002,
                        format_args!("invalid dimension power while encoding {tree}"),
                        start,
                    ),
                    CompileError::Dimension(_) => self.error_at(
                        ErrorCode::E3001,
                        format_args!("overflow exception while encoding {tree}"),
                        start,
                    ),
                    CompileError::MixedDimensions { .. } => {
                        self.error_at(ErrorCode::E2010, format_args!("{err} in {tree}."), start)
                    }
                    CompileError::InvalidNumber(text) => self.error_at(
                        ErrorCode::E0003,
                        format_args!("invalid number \"{text}\"."),
                        start,
                    ),
                    CompileError::NotAUnit(_) => {
                        self.error_at(ErrorCode::E9001, format_args!("{err}."), start)
                    }
                }
                .with_cause(err.to_string())
            })
    }
}
