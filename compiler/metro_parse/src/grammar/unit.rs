//! Unit statements.
//!
//! ```text
//! Unit      ::= 'unit' ['<' NumericType '>'] Name Tag+ [':' Format] '=' DimExpr ('|' DimExpr)* ';'
//! DimExpr   ::= DimExpr ('*' | '/' | '^') DimFactor | DimFactor
//! DimFactor ::= '<' Magnitude? '>' | UnitName | Number | String | '(' DimExpr ')'
//! ```

use metro_diagnostic::ErrorCode;
use metro_ir::{
    ensure_sufficient_stack, BindPlan, DimExpr, ExprId, ExprKind, Magnitude, MeasureId, NumExpr,
    NumericType, UnitDef,
};
use metro_lexer::TokenKind;
use smallvec::SmallVec;
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the rest of a `unit` statement and register the unit.
    pub(crate) fn parse_unit(&mut self) -> Result<MeasureId, ParseError> {
        let numeric = self.parse_numeric_type()?;
        let name = self.parse_entity_name("unit")?;
        let tags = self.parse_tags()?;
        let format = self.parse_format(self.registry.target().quantity_format())?;
        self.expect_equals()?;

        let mut plan = BindPlan::new(self.registry.next_id());
        let (sense, factor) = self.parse_definition(numeric, &mut plan)?;

        while self.cursor.check(TokenKind::Pipe) {
            self.cursor.advance();
            let start = self.cursor.current();
            let (alt_sense, alt_factor) = self.parse_definition(numeric, &mut plan)?;
            if sense.value != alt_sense.value {
                return Err(self.error_at(
                    ErrorCode::E2006,
                    format_args!(
                        "inconsistent dimensions: {} == {} != {} == {}.",
                        sense.simple, sense.value, alt_sense.value, alt_sense.simple
                    ),
                    &start,
                ));
            }
            if factor.is_real && alt_factor.is_real && !factor.value_equals(&alt_factor) {
                return Err(self.error_at(
                    ErrorCode::E2007,
                    format_args!(
                        "inconsistent conversion factors: {} == {} != {} == {}.",
                        factor.simple,
                        factor.precise(numeric),
                        alt_factor.precise(numeric),
                        alt_factor.simple
                    ),
                    &start,
                ));
            }
        }

        self.expect_semicolon()?;

        Ok(self.registry.add_unit(
            UnitDef {
                name,
                numeric,
                sense,
                factor,
                format,
                tags,
            },
            plan,
        ))
    }

    /// Optional `<type>` after the `unit` keyword.
    fn parse_numeric_type(&mut self) -> Result<NumericType, ParseError> {
        let target = self.registry.target();
        if !self.cursor.check(TokenKind::Lt) {
            return Ok(target.default_numeric());
        }
        self.cursor.advance();

        let numeric = if self.cursor.check(TokenKind::Ident) {
            target.numeric_from_keyword(self.cursor.current_text())
        } else {
            None
        };
        let Some(numeric) = numeric else {
            let names: Vec<&str> = target
                .numeric_types()
                .iter()
                .map(|n| n.source_keyword())
                .collect();
            return Err(ParseError::new(
                ErrorCode::E1005,
                format!(
                    "found \"{}\" while expected name of the numeric type: \"{}\".",
                    self.cursor.found(),
                    names.join("\", \"")
                ),
                &self.cursor.current(),
            ));
        };
        self.cursor.advance();

        if !self.cursor.check(TokenKind::Gt) {
            return Err(ParseError::new(
                ErrorCode::E1005,
                format!(
                    "found \"{}\", while expected a numeric type name in angle brackets <>.",
                    self.cursor.found()
                ),
                &self.cursor.current(),
            ));
        }
        self.cursor.advance();
        Ok(numeric)
    }

    /// One or more symbol strings.
    ///
    /// A rejected symbol is reported but does not stop the statement; only
    /// ending up with no symbol at all does.
    fn parse_tags(&mut self) -> Result<SmallVec<[String; 2]>, ParseError> {
        let mut tags: SmallVec<[String; 2]> = SmallVec::new();
        while self.cursor.check(TokenKind::Str) {
            let tag = self.cursor.current_body();
            if tag.is_empty() {
                let err = self.error_here(
                    ErrorCode::E2004,
                    "an empty string cannot be a unit symbol.",
                );
                self.errors.push(err);
            } else if let Some(owner) = self.registry.unit_with_symbol(tag) {
                let err = self.error_here(
                    ErrorCode::E2003,
                    format_args!(
                        "unit symbol \"{tag}\" rejected (it has already been used in the {} unit).",
                        self.registry.name(owner)
                    ),
                );
                self.errors.push(err);
            } else if tags.iter().any(|t| t == tag) {
                let err = self.error_here(
                    ErrorCode::E2003,
                    format_args!(
                        "unit symbol \"{tag}\" rejected (it has already been used in the {} unit).",
                        self.entity
                    ),
                );
                self.errors.push(err);
            } else {
                tags.push(tag.to_owned());
            }
            self.cursor.advance();
        }

        if tags.is_empty() {
            return Err(self.error_here(ErrorCode::E1006, "missing unit symbol(s)."));
        }
        Ok(tags)
    }

    /// One definition: parse, compile, then bind its normal form into `plan`.
    fn parse_definition(
        &mut self,
        numeric: NumericType,
        plan: &mut BindPlan,
    ) -> Result<(DimExpr, NumExpr), ParseError> {
        let start = self.cursor.current();
        let tree = self.parse_dim_term(numeric)?;
        let compiled = self.compile_tree(tree, numeric, &start)?;

        let normalized = self.arena.normalized(tree);
        trace!(
            tree = %self.arena.display(tree, self.registry),
            normalized = %self.arena.display(normalized, self.registry),
            "binding definition"
        );
        self.arena.bind(normalized, self.registry, plan);
        Ok(compiled)
    }

    /// Left-associative `*`, `/` and `^` chain.
    fn parse_dim_term(&mut self, numeric: NumericType) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_dim_factor(numeric)?;
        loop {
            let operator = self.cursor.current();
            let kind = operator.kind;
            if !matches!(kind, TokenKind::Star | TokenKind::Slash | TokenKind::Caret) {
                return Ok(lhs);
            }
            self.cursor.advance();
            let rhs = self.parse_dim_factor(numeric)?;

            let node = match kind {
                TokenKind::Slash => ExprKind::Quotient { lhs, rhs },
                TokenKind::Caret => {
                    if !self.arena.is_wedge_compatible(lhs) || !self.arena.is_wedge_compatible(rhs)
                    {
                        return Err(self.error_at(
                            ErrorCode::E2008,
                            format_args!(
                                "invalid wedge-product \"{} ^ {}\" (^-operator can only be used to multiply units).",
                                self.arena.display(lhs, self.registry),
                                self.arena.display(rhs, self.registry)
                            ),
                            &operator,
                        ));
                    }
                    ExprKind::Product {
                        lhs,
                        rhs,
                        wedge: true,
                    }
                }
                _ => ExprKind::Product {
                    lhs,
                    rhs,
                    wedge: false,
                },
            };
            lhs = self.arena.alloc(node);
        }
    }

    fn parse_dim_factor(&mut self, numeric: NumericType) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::Lt => self.parse_magnitude(),
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_dim_term(numeric)?;
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
            TokenKind::Ident => self.parse_unit_ref(numeric),
            _ => Err(self.error_here(
                ErrorCode::E1002,
                format_args!(
                    "found \"{}\" while expected: <dimension> | unit | number | (expression) | \"literal\".",
                    self.cursor.found()
                ),
            )),
        })
    }

    /// `<Magnitude>` or `<>`.
    fn parse_magnitude(&mut self) -> Result<ExprId, ParseError> {
        self.cursor.advance();
        let magnitude = match self.cursor.current_kind() {
            TokenKind::Gt => Some(None),
            TokenKind::Ident => Magnitude::from_name(self.cursor.current_text()).map(Some),
            _ => None,
        };
        if let Some(Some(_)) = magnitude {
            self.cursor.advance();
        }

        match magnitude {
            Some(magnitude) if self.cursor.check(TokenKind::Gt) => {
                self.cursor.advance();
                Ok(self.arena.alloc(ExprKind::Magnitude(magnitude)))
            }
            _ => {
                let keywords: Vec<&str> = Magnitude::keywords().collect();
                Err(self.error_here(
                    ErrorCode::E1008,
                    format_args!(
                        "found \"{}\" while expected a dimension keyword (in angle brackets): <{}> or <> for dimensionless unit.",
                        self.cursor.found(),
                        keywords.join(">, <")
                    ),
                ))
            }
        }
    }

    /// Reference to an already registered unit of the same numeric type.
    fn parse_unit_ref(&mut self, numeric: NumericType) -> Result<ExprId, ParseError> {
        let name = self.cursor.current_text();
        let Some(unit) = self.registry.find_unit(name) else {
            return Err(self.undefined_unit(name));
        };
        let used = self.registry.measure(unit).numeric;
        if used != numeric {
            return Err(self.error_here(
                ErrorCode::E2005,
                format_args!(
                    "numeric type <{numeric}> is not compatible with the type <{used}> used in the \"{name}\" unit."
                ),
            ));
        }
        self.cursor.advance();
        Ok(self.arena.alloc(ExprKind::UnitRef(unit)))
    }
}
