//! Scale statements.
//!
//! ```text
//! Scale     ::= 'scale' Name [':' Format] [RefPoint] '=' UnitName NumExpr ';'
//! NumExpr   ::= NumExpr ('+' | '-') NumTerm | NumTerm
//! NumTerm   ::= NumTerm ('*' | '/') NumUnary | NumUnary
//! NumUnary  ::= ('+' | '-')? NumFactor
//! NumFactor ::= Number | String | '(' NumExpr ')'
//! ```

use metro_diagnostic::ErrorCode;
use metro_ir::{ensure_sufficient_stack, ExprId, ExprKind, MeasureId, ScaleDef};
use metro_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the rest of a `scale` statement and register the scale.
    pub(crate) fn parse_scale(&mut self) -> Result<MeasureId, ParseError> {
        let name = self.parse_entity_name("scale")?;
        let format = self.parse_format("")?;
        let refpoint = self.parse_refpoint()?;
        self.expect_equals()?;
        let unit = self.parse_scale_unit(&refpoint)?;

        let numeric = self.registry.measure(unit).numeric;
        let start = self.cursor.current();
        let tree = self.parse_num_expr()?;
        let (_, offset) = self.compile_tree(tree, numeric, &start)?;

        self.expect_semicolon()?;

        let format = if format.is_empty() {
            self.registry
                .unit(unit)
                .map(|u| u.format.clone())
                .unwrap_or_default()
        } else {
            format
        };
        Ok(self.registry.add_scale(ScaleDef {
            name,
            refpoint,
            unit,
            offset,
            format,
        }))
    }

    /// Reference point name, or empty for the common reference point.
    fn parse_refpoint(&mut self) -> Result<String, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident => {
                let refpoint = self.cursor.current_text().to_owned();
                self.cursor.advance();
                Ok(refpoint)
            }
            TokenKind::Eq => Ok(String::new()),
            _ => Err(self.error_here(
                ErrorCode::E1001,
                format_args!(
                    "found \"{}\" while expected a name of reference-point or equal sign \"=\".",
                    self.cursor.found()
                ),
            )),
        }
    }

    /// The unit a scale is laid on; at most one scale per unit and
    /// reference point.
    fn parse_scale_unit(&mut self, refpoint: &str) -> Result<MeasureId, ParseError> {
        if !self.cursor.check(TokenKind::Ident) {
            return Err(self.error_here(
                ErrorCode::E1004,
                format_args!(
                    "found \"{}\" while expected unit name.",
                    self.cursor.found()
                ),
            ));
        }
        let name = self.cursor.current_text();
        let Some(unit) = self.registry.find_unit(name) else {
            return Err(self.undefined_unit(name));
        };
        if let Some(existing) = self.registry.find_scale_for(refpoint, unit) {
            return Err(self.error_here(
                ErrorCode::E2009,
                format_args!(
                    "same unit {name} as in scale {} (ambiguous unit-to-scale mapping).",
                    self.registry.name(existing)
                ),
            ));
        }
        self.cursor.advance();
        Ok(unit)
    }

    fn parse_num_expr(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_num_term()?;
        loop {
            let minus = match self.cursor.current_kind() {
                TokenKind::Plus => false,
                TokenKind::Minus => true,
                _ => return Ok(lhs),
            };
            self.cursor.advance();
            let rhs = self.parse_num_term()?;
            lhs = self.arena.alloc(if minus {
                ExprKind::Difference { lhs, rhs }
            } else {
                ExprKind::Sum { lhs, rhs }
            });
        }
    }

    fn parse_num_term(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_num_unary()?;
        loop {
            let divide = match self.cursor.current_kind() {
                TokenKind::Star => false,
                TokenKind::Slash => true,
                _ => return Ok(lhs),
            };
            self.cursor.advance();
            let rhs = self.parse_num_unary()?;
            lhs = self.arena.alloc(if divide {
                ExprKind::Quotient { lhs, rhs }
            } else {
                ExprKind::Product {
                    lhs,
                    rhs,
                    wedge: false,
                }
            });
        }
    }

    fn parse_num_unary(&mut self) -> Result<ExprId, ParseError> {
        let plus = match self.cursor.current_kind() {
            TokenKind::Plus => true,
            TokenKind::Minus => false,
            _ => return self.parse_num_factor(),
        };
        self.cursor.advance();
        let operand = self.parse_num_factor()?;
        Ok(self.arena.alloc(ExprKind::Unary { plus, operand }))
    }

    fn parse_num_factor(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_num_expr()?;
                self.expect_rparen()?;
                Ok(self.arena.alloc(ExprKind::Parenthesized(inner)))
            }
            TokenKind::Int | TokenKind::Real => {
                let text = self.cursor.current_text().to_owned();
                self.cursor.advance();
                Ok(self.arena.alloc(ExprKind::Number(text)))
            }
            TokenKind::Str => {
                let body = self.cursor.current_body().to_owned();
                self.cursor.advance();
                Ok(self.arena.alloc(ExprKind::Literal(body)))
            }
            _ => Err(self.error_here(
                ErrorCode::E1002,
                format_args!(
                    "found \"{}\" while expected numeric factor: number | (expression) | \"literal\".",
                    self.cursor.found()
                ),
            )),
        })
    }
}
