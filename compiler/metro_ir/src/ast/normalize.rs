//! Rewriting unit definitions into a shape the binder can read.
//!
//! The target shapes are `ξ*u`, `u*ξ`, `ξ/u`, `u/ξ` and `u/v`, where `ξ` is a
//! purely numeric subtree and `u`, `v` involve units. Numeric factors are
//! pushed down towards the single unit operand; whatever cannot be rewritten
//! is left as written.
//!
//! `try_*` return `None` when the node cannot absorb the rewrite. Rebuilt
//! products are plain (`*`) products.

use super::{ExprArena, ExprId, ExprKind};
use crate::stack::ensure_sufficient_stack;

impl ExprArena {
    /// Normal form of `id`, or `id` itself when it has none.
    pub fn normalized(&mut self, id: ExprId) -> ExprId {
        self.try_normalize(id).unwrap_or(id)
    }

    pub fn try_normalize(&mut self, id: ExprId) -> Option<ExprId> {
        ensure_sufficient_stack(|| match *self.get(id) {
            ExprKind::Product { lhs, rhs, .. } => {
                if self.is_numeric(lhs) {
                    self.try_multiply(rhs, lhs)
                } else if self.is_numeric(rhs) {
                    self.try_multiply(lhs, rhs)
                } else {
                    None
                }
            }
            ExprKind::Quotient { lhs, rhs } if self.is_numeric(rhs) => self.try_divide(lhs, rhs),
            ExprKind::Parenthesized(inner) => {
                let normalized = self.try_normalize(inner)?;
                Some(self.alloc(ExprKind::Parenthesized(normalized)))
            }
            ExprKind::Unary { plus, operand } => {
                let normalized = self.try_normalize(operand)?;
                Some(self.alloc(ExprKind::Unary {
                    plus,
                    operand: normalized,
                }))
            }
            _ => None,
        })
    }

    /// Rewrite `id * number`.
    pub fn try_multiply(&mut self, id: ExprId, number: ExprId) -> Option<ExprId> {
        ensure_sufficient_stack(|| match *self.get(id) {
            ExprKind::Product { lhs, rhs, .. } => {
                if self.is_numeric(lhs) {
                    // (lhs * rhs) * n  =>  (lhs * n) * rhs
                    let product = self.product(lhs, number);
                    Some(match self.try_multiply(rhs, product) {
                        Some(normalized) => normalized,
                        None => self.product(product, rhs),
                    })
                } else if self.is_numeric(rhs) {
                    // (lhs * rhs) * n  =>  lhs * (rhs * n)
                    let product = self.product(rhs, number);
                    Some(match self.try_multiply(lhs, product) {
                        Some(normalized) => normalized,
                        None => self.product(lhs, product),
                    })
                } else {
                    None
                }
            }
            ExprKind::Quotient { lhs, rhs } => {
                if self.is_numeric(lhs) {
                    // (lhs / rhs) * n  =>  (lhs * n) / rhs
                    let product = self.product(lhs, number);
                    Some(self.quotient(product, rhs))
                } else if self.is_numeric(rhs) {
                    // (lhs / rhs) * n  =>  lhs / (rhs / n)
                    let divisor = self.quotient(rhs, number);
                    Some(match self.try_divide(lhs, divisor) {
                        Some(normalized) => normalized,
                        None => self.quotient(lhs, divisor),
                    })
                } else {
                    None
                }
            }
            ExprKind::Parenthesized(inner) => {
                let normalized = self.try_multiply(inner, number)?;
                Some(self.alloc(ExprKind::Parenthesized(normalized)))
            }
            ExprKind::Unary { plus, operand } => {
                let normalized = self.try_multiply(operand, number)?;
                Some(self.alloc(ExprKind::Unary {
                    plus,
                    operand: normalized,
                }))
            }
            _ => None,
        })
    }

    /// Rewrite `id / number`.
    pub fn try_divide(&mut self, id: ExprId, number: ExprId) -> Option<ExprId> {
        ensure_sufficient_stack(|| match *self.get(id) {
            ExprKind::Product { lhs, rhs, .. } => {
                if self.is_numeric(lhs) {
                    // (lhs * rhs) / n  =>  (lhs / n) * rhs
                    let quotient = self.quotient(lhs, number);
                    Some(match self.try_multiply(rhs, quotient) {
                        Some(normalized) => normalized,
                        None => self.product(quotient, rhs),
                    })
                } else if self.is_numeric(rhs) {
                    // (lhs * rhs) / n  =>  lhs * (rhs / n)
                    let quotient = self.quotient(rhs, number);
                    Some(match self.try_multiply(lhs, quotient) {
                        Some(normalized) => normalized,
                        None => self.product(lhs, quotient),
                    })
                } else {
                    None
                }
            }
            ExprKind::Quotient { lhs, rhs } => {
                if self.is_numeric(lhs) {
                    // (lhs / rhs) / n  =>  (lhs / n) / rhs
                    let quotient = self.quotient(lhs, number);
                    Some(self.quotient(quotient, rhs))
                } else if self.is_numeric(rhs) {
                    // (lhs / rhs) / n  =>  lhs / (rhs * n)
                    let product = self.product(rhs, number);
                    let divisor = self.alloc(ExprKind::Parenthesized(product));
                    Some(match self.try_divide(lhs, divisor) {
                        Some(normalized) => normalized,
                        None => self.quotient(lhs, divisor),
                    })
                } else {
                    None
                }
            }
            ExprKind::Parenthesized(inner) => {
                let normalized = self.try_divide(inner, number)?;
                Some(self.alloc(ExprKind::Parenthesized(normalized)))
            }
            ExprKind::Unary { plus, operand } => {
                let normalized = self.try_divide(operand, number)?;
                Some(self.alloc(ExprKind::Unary {
                    plus,
                    operand: normalized,
                }))
            }
            _ => None,
        })
    }

    fn product(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.alloc(ExprKind::Product {
            lhs,
            rhs,
            wedge: false,
        })
    }

    fn quotient(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.alloc(ExprKind::Quotient { lhs, rhs })
    }
}
