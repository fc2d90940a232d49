//! Definition expression trees.
//!
//! Nodes live in an [`ExprArena`] and refer to their children by [`ExprId`].
//! A node is never changed after allocation; normalization allocates new
//! nodes and leaves the parsed tree intact.

mod bind;
mod normalize;


use std::fmt;

use crate::stack::ensure_sufficient_stack;
use crate::{Magnitude, MeasureId, Registry};

pub use bind::BindPlan;

/// Index of a node in an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Numeral as written (`0.3048`).
    Number(String),
    /// Body of a string literal (`Math.PI`, or an opaque constant).
    Literal(String),
    /// `<Length>`; `None` for `<>` (dimensionless).
    Magnitude(Option<Magnitude>),
    UnitRef(MeasureId),
    Unary { plus: bool, operand: ExprId },
    Parenthesized(ExprId),
    /// `*`, or `^` when `wedge`.
    Product { lhs: ExprId, rhs: ExprId, wedge: bool },
    Quotient { lhs: ExprId, rhs: ExprId },
    Sum { lhs: ExprId, rhs: ExprId },
    Difference { lhs: ExprId, rhs: ExprId },
}

/// Flat storage for the expression nodes of one compilation.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<ExprKind>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(kind);
        id
    }

    /// # Panics
    /// Panics if `id` was allocated by another arena.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// True when the subtree involves no units or magnitudes.
    pub fn is_numeric(&self, id: ExprId) -> bool {
        ensure_sufficient_stack(|| match *self.get(id) {
            ExprKind::Number(_) | ExprKind::Literal(_) => true,
            ExprKind::Magnitude(_) | ExprKind::UnitRef(_) => false,
            ExprKind::Unary { operand, .. } | ExprKind::Parenthesized(operand) => {
                self.is_numeric(operand)
            }
            ExprKind::Product { lhs, rhs, .. }
            | ExprKind::Quotient { lhs, rhs }
            | ExprKind::Sum { lhs, rhs }
            | ExprKind::Difference { lhs, rhs } => self.is_numeric(lhs) && self.is_numeric(rhs),
        })
    }

    /// The unit this node stands for: a unit reference, possibly parenthesized.
    pub fn unit(&self, id: ExprId) -> Option<MeasureId> {
        ensure_sufficient_stack(|| match *self.get(id) {
            ExprKind::UnitRef(unit) => Some(unit),
            ExprKind::Parenthesized(inner) => self.unit(inner),
            _ => None,
        })
    }

    /// True when the node may be an operand of `^`: a unit, or a product or
    /// quotient built only from units and numbers.
    pub fn is_wedge_compatible(&self, id: ExprId) -> bool {
        ensure_sufficient_stack(|| match *self.get(id) {
            ExprKind::UnitRef(_) => true,
            ExprKind::Parenthesized(inner) => self.is_wedge_compatible(inner),
            ExprKind::Product { lhs, rhs, wedge } => {
                wedge
                    || (self.is_numeric(lhs) && self.is_wedge_compatible(rhs))
                    || (self.is_wedge_compatible(lhs) && self.is_numeric(rhs))
            }
            ExprKind::Quotient { lhs, rhs } => {
                let lhs_wedge = self.is_wedge_compatible(lhs);
                let rhs_wedge = self.is_wedge_compatible(rhs);
                (lhs_wedge && rhs_wedge)
                    || (self.is_numeric(lhs) && rhs_wedge)
                    || (lhs_wedge && self.is_numeric(rhs))
            }
            ExprKind::Number(_)
            | ExprKind::Literal(_)
            | ExprKind::Magnitude(_)
            | ExprKind::Unary { .. }
            | ExprKind::Sum { .. }
            | ExprKind::Difference { .. } => false,
        })
    }

    /// Render a subtree the way it would be written in a definition.
    pub fn display<'a>(&'a self, id: ExprId, registry: &'a Registry) -> ExprDisplay<'a> {
        ExprDisplay {
            arena: self,
            registry,
            id,
        }
    }
}

pub struct ExprDisplay<'a> {
    arena: &'a ExprArena,
    registry: &'a Registry,
    id: ExprId,
}

impl ExprDisplay<'_> {
    fn child(&self, id: ExprId) -> Self {
        ExprDisplay { id, ..*self }
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self.arena.get(self.id) {
            ExprKind::Number(number) => f.write_str(number),
            ExprKind::Literal(literal) => write!(f, "\"{literal}\""),
            ExprKind::Magnitude(Some(magnitude)) => write!(f, "<{magnitude}>"),
            ExprKind::Magnitude(None) => f.write_str("<>"),
            ExprKind::UnitRef(unit) => f.write_str(&self.registry.measure(*unit).term.target),
            ExprKind::Unary { plus, operand } => {
                let sign = if *plus { '+' } else { '-' };
                write!(f, "{sign}{}", self.child(*operand))
            }
            ExprKind::Parenthesized(inner) => write!(f, "({})", self.child(*inner)),
            ExprKind::Product { lhs, rhs, wedge } => {
                let op = if *wedge { '^' } else { '*' };
                write!(f, "{}{op}{}", self.child(*lhs), self.child(*rhs))
            }
            ExprKind::Quotient { lhs, rhs } => {
                write!(f, "{}/{}", self.child(*lhs), self.child(*rhs))
            }
            ExprKind::Sum { lhs, rhs } => write!(f, "{}+{}", self.child(*lhs), self.child(*rhs)),
            ExprKind::Difference { lhs, rhs } => {
                write!(f, "{}-{}", self.child(*lhs), self.child(*rhs))
            }
        })
    }
}
