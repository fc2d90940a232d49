//! Operator signatures derived while binding unit definitions.

use std::fmt;

use crate::{MeasureId, NumericType};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    Multiply,
    Divide,
    /// `^`: multiplication producing a distinct family (torque vs energy).
    Wedge,
    /// Explicit conversion between two members of one family.
    Convert,
}

impl Operator {
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Wedge => "^",
            Operator::Convert => "->",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One side of a [`BinaryOperation`]: a unit, or the bare numeric type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operand {
    Measure(MeasureId),
    Numeric(NumericType),
}

impl Operand {
    #[inline]
    pub fn measure(self) -> Option<MeasureId> {
        match self {
            Operand::Measure(id) => Some(id),
            Operand::Numeric(_) => None,
        }
    }
}

impl From<MeasureId> for Operand {
    fn from(id: MeasureId) -> Self {
        Operand::Measure(id)
    }
}

impl From<NumericType> for Operand {
    fn from(numeric: NumericType) -> Self {
        Operand::Numeric(numeric)
    }
}

/// `result = lhs op rhs`, recorded on the unit that will host the operator.
///
/// For [`Operator::Convert`], `lhs` is the source unit and `rhs` repeats the
/// target (`result`), whose factor ratio against `lhs` scales the value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BinaryOperation {
    pub result: Operand,
    pub op: Operator,
    pub lhs: Operand,
    pub rhs: Operand,
}

impl BinaryOperation {
    pub fn new(
        result: impl Into<Operand>,
        op: Operator,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Self {
        BinaryOperation {
            result: result.into(),
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Conversion from `from` into `to`.
    pub fn conversion(to: MeasureId, from: MeasureId) -> Self {
        BinaryOperation::new(to, Operator::Convert, from, to)
    }
}
