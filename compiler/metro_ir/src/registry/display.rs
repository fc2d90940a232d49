//! Human-readable dumps of registry entries.

use std::fmt;

use super::{MeasureId, Registry};
use crate::{BinaryOperation, Operand};

/// `[L] Meter::Foot {"ft"} : 3.28083989501312`
pub struct UnitDisplay<'a> {
    registry: &'a Registry,
    id: MeasureId,
}

/// `[ϴ] Kelvin::Celsius : AbsoluteZero = DegCelsius 273.15`
pub struct ScaleDisplay<'a> {
    registry: &'a Registry,
    id: MeasureId,
}

/// `MPH = Mile / Hour`
pub struct OperationDisplay<'a> {
    registry: &'a Registry,
    operation: &'a BinaryOperation,
}

impl Registry {
    pub fn display_unit(&self, id: MeasureId) -> UnitDisplay<'_> {
        UnitDisplay { registry: self, id }
    }

    pub fn display_scale(&self, id: MeasureId) -> ScaleDisplay<'_> {
        ScaleDisplay { registry: self, id }
    }

    pub fn display_operation<'a>(&'a self, operation: &'a BinaryOperation) -> OperationDisplay<'a> {
        OperationDisplay {
            registry: self,
            operation,
        }
    }

    fn operand_name(&self, operand: Operand) -> &str {
        match operand {
            Operand::Measure(id) => &self.measure(id).term.target,
            Operand::Numeric(numeric) => numeric.source_keyword(),
        }
    }
}

impl fmt::Display for UnitDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry;
        let measure = registry.measure(self.id);
        let Some(unit) = measure.as_unit() else {
            return write!(f, "{}", measure.term);
        };
        let prime = registry.measure(registry.representative(self.id));
        write!(
            f,
            "[{}] {}::{} {{",
            unit.sense.value, prime.term.target, measure.term.target
        )?;
        for (i, tag) in unit.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{tag}\"")?;
        }
        write!(f, "}} : {}", unit.factor.display(measure.numeric))
    }
}

impl fmt::Display for ScaleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry;
        let measure = registry.measure(self.id);
        let Some(scale) = measure.as_scale() else {
            return write!(f, "{}", measure.term);
        };
        let prime = registry.measure(registry.representative(self.id));
        let sense = registry
            .unit(scale.unit)
            .map(|unit| unit.sense.value)
            .unwrap_or_default();
        write!(
            f,
            "[{sense}] {}::{} : {} = {} {}",
            prime.term.target,
            measure.term.target,
            scale.refpoint_normalized(),
            registry.measure(scale.unit).term.target,
            scale.offset.display(measure.numeric)
        )
    }
}

impl fmt::Display for OperationDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.operation;
        write!(
            f,
            "{} = {} {} {}",
            self.registry.operand_name(op.result),
            self.registry.operand_name(op.lhs),
            op.op,
            self.registry.operand_name(op.rhs)
        )
    }
}
