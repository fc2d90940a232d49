//! Deriving operators and family links from a normalized unit definition.
//!
//! Binding does not touch the registry. It records what the definition
//! implies in a [`BindPlan`], and the plan is committed by
//! [`Registry::add_unit`] once the whole statement has been accepted.

use smallvec::SmallVec;
use tracing::trace;

use super::{ExprArena, ExprId, ExprKind};
use crate::stack::ensure_sufficient_stack;
use crate::{BinaryOperation, MeasureId, Operand, Operator, Registry};

/// Pending side effects of one unit statement.
#[derive(Clone, Debug)]
pub struct BindPlan {
    pub(crate) candidate: MeasureId,
    /// Units whose family the candidate joins.
    pub(crate) relatives: SmallVec<[MeasureId; 2]>,
    /// Operations to record, keyed by the unit that hosts them.
    pub(crate) operations: Vec<(MeasureId, BinaryOperation)>,
}

impl BindPlan {
    /// Plan for the unit that will be registered as `candidate`.
    pub fn new(candidate: MeasureId) -> Self {
        BindPlan {
            candidate,
            relatives: SmallVec::new(),
            operations: Vec::new(),
        }
    }

    #[inline]
    pub fn candidate(&self) -> MeasureId {
        self.candidate
    }

    pub fn relatives(&self) -> &[MeasureId] {
        &self.relatives
    }

    pub fn operations(&self) -> &[(MeasureId, BinaryOperation)] {
        &self.operations
    }

    fn record(
        &mut self,
        owner: MeasureId,
        result: impl Into<Operand>,
        op: Operator,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) {
        let operation = BinaryOperation::new(result, op, lhs, rhs);
        trace!(?owner, ?operation, "fellow operation");
        self.operations.push((owner, operation));
    }

    /// The candidate converts to and from `unit` and joins its family.
    fn relate(&mut self, registry: &Registry, unit: MeasureId) {
        if self
            .relatives
            .iter()
            .any(|&related| registry.same_family(related, unit))
        {
            return;
        }
        self.relatives.push(unit);
        let candidate = self.candidate;
        self.operations
            .push((unit, BinaryOperation::conversion(candidate, unit)));
        self.operations
            .push((unit, BinaryOperation::conversion(unit, candidate)));
    }
}

impl ExprArena {
    /// Record the relationships the normalized definition `id` implies.
    pub fn bind(&self, id: ExprId, registry: &Registry, plan: &mut BindPlan) {
        ensure_sufficient_stack(|| match *self.get(id) {
            ExprKind::UnitRef(unit) => plan.relate(registry, unit),
            ExprKind::Parenthesized(inner) => self.bind(inner, registry, plan),
            ExprKind::Product { lhs, rhs, wedge } => {
                self.bind_product(lhs, rhs, wedge, registry, plan);
            }
            ExprKind::Quotient { lhs, rhs } => self.bind_quotient(lhs, rhs, registry, plan),
            ExprKind::Number(_)
            | ExprKind::Literal(_)
            | ExprKind::Magnitude(_)
            | ExprKind::Unary { .. }
            | ExprKind::Sum { .. }
            | ExprKind::Difference { .. } => {}
        });
    }

    fn bind_product(
        &self,
        lhs: ExprId,
        rhs: ExprId,
        wedge: bool,
        registry: &Registry,
        plan: &mut BindPlan,
    ) {
        let candidate = plan.candidate;
        match (self.unit(lhs), self.unit(rhs)) {
            (Some(l), Some(r)) => {
                // c = l * r on l; the reversed operand order lives on r
                let op = if wedge {
                    Operator::Wedge
                } else {
                    Operator::Multiply
                };
                plan.record(l, candidate, op, l, r);
                if l != r {
                    plan.record(r, candidate, op, r, l);
                }
                plan.record(candidate, r, Operator::Divide, candidate, l);
                if l != r {
                    plan.record(candidate, l, Operator::Divide, candidate, r);
                }
            }
            (Some(_), None) if self.is_numeric(rhs) => self.bind(lhs, registry, plan),
            (None, Some(_)) if self.is_numeric(lhs) => self.bind(rhs, registry, plan),
            _ => {}
        }
    }

    fn bind_quotient(&self, lhs: ExprId, rhs: ExprId, registry: &Registry, plan: &mut BindPlan) {
        let candidate = plan.candidate;
        match (self.unit(lhs), self.unit(rhs)) {
            (Some(l), Some(r)) => {
                // l / l is dimensionless and already provided for every unit
                if l == r {
                    return;
                }
                plan.record(l, candidate, Operator::Divide, l, r);
                plan.record(l, r, Operator::Divide, l, candidate);
                plan.record(candidate, l, Operator::Multiply, candidate, r);
                plan.record(candidate, l, Operator::Multiply, r, candidate);
            }
            (Some(_), None) if self.is_numeric(rhs) => self.bind(lhs, registry, plan),
            (None, Some(r)) if self.is_numeric(lhs) => {
                // c = ξ / r: a reciprocal, with the bare numeric type as operand
                let numeric = registry.measure(r).numeric;
                plan.record(r, candidate, Operator::Divide, numeric, r);
                plan.record(candidate, r, Operator::Divide, numeric, candidate);
                plan.record(candidate, numeric, Operator::Multiply, candidate, r);
                plan.record(candidate, numeric, Operator::Multiply, r, candidate);
            }
            _ => {}
        }
    }
}
