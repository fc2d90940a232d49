//! Expression compiler.
//!
//! Walks a definition tree bottom-up and produces, for every subtree, the
//! pair of a [`DimExpr`] (its dimension) and a [`NumExpr`] (its value). Both
//! carry code in the target language: `simple` refers to other units through
//! their `Sense`/`Factor` properties, `unfolded` spells everything out.

use metro_ir::{
    ensure_sufficient_stack, math_constant, DimExpr, Dimension, DimensionError, ExprArena, ExprId,
    ExprKind, NumExpr, NumericType, Registry,
};

/// Why a tree could not be compiled.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error("cannot add or subtract terms of different dimensions: {lhs} and {rhs}")]
    MixedDimensions { lhs: Dimension, rhs: Dimension },

    #[error("invalid number \"{0}\"")]
    InvalidNumber(String),

    #[error("\"{0}\" is not a unit")]
    NotAUnit(String),
}

/// Compiles trees of one statement, over one numeric type.
pub struct ExprCompiler<'a> {
    arena: &'a ExprArena,
    registry: &'a Registry,
    numeric: NumericType,
}

impl<'a> ExprCompiler<'a> {
    pub fn new(arena: &'a ExprArena, registry: &'a Registry, numeric: NumericType) -> Self {
        ExprCompiler {
            arena,
            registry,
            numeric,
        }
    }

    pub fn compile(&self, id: ExprId) -> Result<(DimExpr, NumExpr), CompileError> {
        ensure_sufficient_stack(|| self.compile_node(id))
    }

    fn compile_node(&self, id: ExprId) -> Result<(DimExpr, NumExpr), CompileError> {
        let target = self.registry.target();
        let numeric = self.numeric;
        match self.arena.get(id) {
            ExprKind::Number(text) => {
                let value = numeric
                    .parse(text)
                    .ok_or_else(|| CompileError::InvalidNumber(text.clone()))?;
                Ok((
                    self.dimensionless(),
                    NumExpr::new(true, value, target.literal(numeric, value)),
                ))
            }
            ExprKind::Literal(literal) => {
                let num = if let Some((value, code)) = math_constant(literal) {
                    NumExpr::new(true, numeric.round(value), code)
                } else if let Some(value) = numeric.parse(literal) {
                    NumExpr::new(true, value, literal.as_str())
                } else {
                    // Opaque constant: the backend evaluates it.
                    NumExpr::new(false, 1.0, literal.as_str())
                };
                Ok((self.dimensionless(), num))
            }
            ExprKind::Magnitude(magnitude) => {
                let value = magnitude.map_or(Dimension::NONE, Dimension::of);
                Ok((
                    DimExpr::new(value, target.dimension_code(*magnitude)),
                    NumExpr::new(true, 1.0, target.literal(numeric, 1.0)),
                ))
            }
            ExprKind::UnitRef(unit_id) => {
                let measure = self.registry.measure(*unit_id);
                let unit = measure
                    .as_unit()
                    .ok_or_else(|| CompileError::NotAUnit(measure.name().to_owned()))?;
                Ok((
                    DimExpr::with_unfolded(
                        unit.sense.value,
                        target.sense_code(&measure.term),
                        unit.sense.unfolded.as_str(),
                    ),
                    NumExpr::with_unfolded(
                        unit.factor.is_real,
                        unit.factor.value,
                        target.factor_code(&measure.term),
                        unit.factor.unfolded.as_str(),
                    ),
                ))
            }
            ExprKind::Unary { plus, operand } => {
                let (dim, num) = self.compile(*operand)?;
                let (sign, value) = if *plus {
                    ('+', num.value)
                } else {
                    ('-', -num.value)
                };
                Ok((
                    dim,
                    NumExpr::with_unfolded(
                        num.is_real,
                        value,
                        format!("{sign}{}", num.simple),
                        format!("{sign}{}", num.unfolded),
                    ),
                ))
            }
            ExprKind::Parenthesized(inner) => {
                let (dim, num) = self.compile(*inner)?;
                Ok((
                    DimExpr::with_unfolded(
                        dim.value,
                        parenthesize(&dim.simple),
                        parenthesize(&dim.unfolded),
                    ),
                    NumExpr::with_unfolded(
                        num.is_real,
                        num.value,
                        parenthesize(&num.simple),
                        parenthesize(&num.unfolded),
                    ),
                ))
            }
            ExprKind::Product { lhs, rhs, .. } => {
                let (ldim, lnum) = self.compile(*lhs)?;
                let (rdim, rnum) = self.compile(*rhs)?;
                let dim = if ldim.value.is_none() {
                    rdim
                } else if rdim.value.is_none() {
                    ldim
                } else {
                    let value = ldim.value.checked_mul(rdim.value)?;
                    combine_dim(value, &ldim, " * ", &rdim)
                };
                let value = numeric.mul(lnum.value, rnum.value);
                Ok((dim, combine_num(value, &lnum, " * ", &rnum)))
            }
            ExprKind::Quotient { lhs, rhs } => {
                let (ldim, lnum) = self.compile(*lhs)?;
                let (rdim, rnum) = self.compile(*rhs)?;
                let dim = if rdim.value.is_none() {
                    ldim
                } else {
                    let value = ldim.value.checked_div(rdim.value)?;
                    combine_dim(value, &ldim, " / ", &rdim)
                };
                let value = numeric.div(lnum.value, rnum.value);
                Ok((dim, combine_num(value, &lnum, " / ", &rnum)))
            }
            ExprKind::Sum { lhs, rhs } => {
                let (ldim, lnum) = self.compile(*lhs)?;
                let (rdim, rnum) = self.compile(*rhs)?;
                let dim = same_dimension(ldim, rdim)?;
                let value = numeric.add(lnum.value, rnum.value);
                Ok((dim, combine_num(value, &lnum, " + ", &rnum)))
            }
            ExprKind::Difference { lhs, rhs } => {
                let (ldim, lnum) = self.compile(*lhs)?;
                let (rdim, rnum) = self.compile(*rhs)?;
                let dim = same_dimension(ldim, rdim)?;
                let value = numeric.sub(lnum.value, rnum.value);
                Ok((dim, combine_num(value, &lnum, " - ", &rnum)))
            }
        }
    }

    fn dimensionless(&self) -> DimExpr {
        DimExpr::new(Dimension::NONE, self.registry.target().dimension_code(None))
    }
}

fn same_dimension(lhs: DimExpr, rhs: DimExpr) -> Result<DimExpr, CompileError> {
    if lhs.value == rhs.value {
        Ok(rhs)
    } else {
        Err(CompileError::MixedDimensions {
            lhs: lhs.value,
            rhs: rhs.value,
        })
    }
}

fn combine_dim(value: Dimension, lhs: &DimExpr, op: &str, rhs: &DimExpr) -> DimExpr {
    DimExpr::with_unfolded(
        value,
        format!("{}{op}{}", lhs.simple, rhs.simple),
        format!("({}{op}{})", lhs.unfolded, rhs.unfolded),
    )
}

fn combine_num(value: f64, lhs: &NumExpr, op: &str, rhs: &NumExpr) -> NumExpr {
    NumExpr::with_unfolded(
        lhs.is_real && rhs.is_real,
        value,
        format!("{}{op}{}", lhs.simple, rhs.simple),
        format!("({}{op}{})", lhs.unfolded, rhs.unfolded),
    )
}

/// Wrap `code` in parentheses unless it is already enclosed as a whole.
fn parenthesize(code: &str) -> String {
    let mut depth = 0i32;
    for c in code.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ' ' => {}
            _ if depth == 0 => return format!("({code})"),
            _ => {}
        }
    }
    code.to_owned()
}

#[cfg(test)]
mod tests;
