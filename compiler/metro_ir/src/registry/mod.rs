//! The definitions registry.
//!
//! Owns every unit and scale of one compilation in a single arena indexed by
//! [`MeasureId`], keeps them in definition order, and tracks families of
//! mutually convertible measures (see `family.rs`). Downstream consumers only
//! read it; all mutation happens while definitions are parsed or seeded.

mod display;
mod family;
mod seed;

#[cfg(test)]
mod tests;

use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use std::fmt;

use crate::ast::BindPlan;
use crate::{BinaryOperation, DimExpr, NumExpr, NumericType, TargetLanguage, Term};

pub use display::{OperationDisplay, ScaleDisplay, UnitDisplay};
pub use seed::{SeedError, SeedScale, SeedUnit};

/// Index of a unit or scale in the registry arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MeasureId(u32);

impl MeasureId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        MeasureId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for MeasureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MeasureId({})", self.0)
    }
}

/// Family number shared by all members of one family.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FamilyId(pub u32);

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields common to units and scales.
#[derive(Clone, Debug)]
pub struct Measure {
    pub term: Term,
    pub numeric: NumericType,
    /// Family representative; `None` iff this measure is the representative.
    prime: Option<MeasureId>,
    /// Unset until the defining statement completes.
    family: Option<FamilyId>,
    pub kind: MeasureKind,
}

impl Measure {
    #[inline]
    pub fn name(&self) -> &str {
        &self.term.source
    }

    #[inline]
    pub fn prime(&self) -> Option<MeasureId> {
        self.prime
    }

    #[inline]
    pub fn family(&self) -> Option<FamilyId> {
        self.family
    }

    pub fn as_unit(&self) -> Option<&Unit> {
        match &self.kind {
            MeasureKind::Unit(unit) => Some(unit),
            MeasureKind::Scale(_) => None,
        }
    }

    pub fn as_scale(&self) -> Option<&Scale> {
        match &self.kind {
            MeasureKind::Scale(scale) => Some(scale),
            MeasureKind::Unit(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum MeasureKind {
    Unit(Unit),
    Scale(Scale),
}

#[derive(Clone, Debug)]
pub struct Unit {
    pub sense: DimExpr,
    pub factor: NumExpr,
    pub format: String,
    pub tags: SmallVec<[String; 2]>,
    pub fellow_operations: Vec<BinaryOperation>,
}

#[derive(Clone, Debug)]
pub struct Scale {
    /// Empty for the common reference point.
    pub refpoint: String,
    pub unit: MeasureId,
    pub offset: NumExpr,
    pub format: String,
}

impl Scale {
    pub const DEFAULT_REFPOINT: &'static str = "<common reference point>";

    pub fn refpoint_normalized(&self) -> &str {
        if self.refpoint.trim().is_empty() {
            Scale::DEFAULT_REFPOINT
        } else {
            &self.refpoint
        }
    }
}

/// A fully checked unit statement, ready to be registered.
#[derive(Clone, Debug)]
pub struct UnitDef {
    pub name: String,
    pub numeric: NumericType,
    pub sense: DimExpr,
    pub factor: NumExpr,
    pub format: String,
    pub tags: SmallVec<[String; 2]>,
}

/// A fully checked scale statement, ready to be registered.
#[derive(Clone, Debug)]
pub struct ScaleDef {
    pub name: String,
    pub refpoint: String,
    pub unit: MeasureId,
    pub offset: NumExpr,
    pub format: String,
}

/// Units and scales of one compilation.
#[derive(Clone, Debug)]
pub struct Registry {
    target: TargetLanguage,
    measures: Vec<Measure>,
    units: Vec<MeasureId>,
    scales: Vec<MeasureId>,
    names: FxHashMap<String, MeasureId>,
    symbols: FxHashMap<String, MeasureId>,
    /// Members of each family keyed by representative, in joining order.
    families: FxHashMap<MeasureId, SmallVec<[MeasureId; 4]>>,
    next_family: u32,
    /// Representative of each family restored by seeding.
    seeded_families: FxHashMap<FamilyId, MeasureId>,
}

impl Registry {
    pub fn new(target: TargetLanguage) -> Self {
        Registry {
            target,
            measures: Vec::new(),
            units: Vec::new(),
            scales: Vec::new(),
            names: FxHashMap::default(),
            symbols: FxHashMap::default(),
            families: FxHashMap::default(),
            next_family: 0,
            seeded_families: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn target(&self) -> TargetLanguage {
        self.target
    }

    /// Id the next registered measure will receive.
    #[inline]
    pub fn next_id(&self) -> MeasureId {
        MeasureId(u32::try_from(self.measures.len()).unwrap_or(u32::MAX))
    }

    /// # Panics
    /// Panics if `id` did not come from this registry.
    #[inline]
    #[track_caller]
    pub fn measure(&self, id: MeasureId) -> &Measure {
        &self.measures[id.index()]
    }

    pub fn unit(&self, id: MeasureId) -> Option<&Unit> {
        self.measures.get(id.index()).and_then(Measure::as_unit)
    }

    pub fn scale(&self, id: MeasureId) -> Option<&Scale> {
        self.measures.get(id.index()).and_then(Measure::as_scale)
    }

    #[inline]
    pub fn name(&self, id: MeasureId) -> &str {
        self.measure(id).name()
    }

    /// Unit ids in definition order.
    #[inline]
    pub fn unit_ids(&self) -> &[MeasureId] {
        &self.units
    }

    /// Scale ids in definition order.
    #[inline]
    pub fn scale_ids(&self) -> &[MeasureId] {
        &self.scales
    }

    pub fn units(&self) -> impl Iterator<Item = (MeasureId, &Measure, &Unit)> + '_ {
        self.units.iter().filter_map(|&id| {
            let measure = self.measure(id);
            measure.as_unit().map(|unit| (id, measure, unit))
        })
    }

    pub fn scales(&self) -> impl Iterator<Item = (MeasureId, &Measure, &Scale)> + '_ {
        self.scales.iter().filter_map(|&id| {
            let measure = self.measure(id);
            measure.as_scale().map(|scale| (id, measure, scale))
        })
    }

    #[inline]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn scale_count(&self) -> usize {
        self.scales.len()
    }

    /// Unit or scale with this name.
    pub fn find_measure(&self, name: &str) -> Option<MeasureId> {
        self.names.get(name).copied()
    }

    pub fn find_unit(&self, name: &str) -> Option<MeasureId> {
        self.find_measure(name).filter(|&id| self.unit(id).is_some())
    }

    pub fn find_scale(&self, name: &str) -> Option<MeasureId> {
        self.find_measure(name).filter(|&id| self.scale(id).is_some())
    }

    /// Unit already using `symbol` as one of its tags.
    pub fn unit_with_symbol(&self, symbol: &str) -> Option<MeasureId> {
        self.symbols.get(symbol).copied()
    }

    /// Scale defined on exactly `unit` at `refpoint`.
    pub fn find_scale_for(&self, refpoint: &str, unit: MeasureId) -> Option<MeasureId> {
        self.scales()
            .find(|(_, _, scale)| scale.unit == unit && scale.refpoint == refpoint)
            .map(|(id, _, _)| id)
    }

    /// Scale a new scale on `unit` at `refpoint` should join: same reference
    /// point, underlying unit in the same family.
    pub fn relative_scale_for(&self, refpoint: &str, unit: MeasureId) -> Option<MeasureId> {
        let representative = self.representative(unit);
        self.scales()
            .find(|(_, _, scale)| {
                self.representative(scale.unit) == representative && scale.refpoint == refpoint
            })
            .map(|(id, _, _)| id)
    }

    /// Register a unit and commit the relationships its definition implies.
    pub fn add_unit(&mut self, def: UnitDef, plan: BindPlan) -> MeasureId {
        let UnitDef {
            name,
            numeric,
            sense,
            factor,
            format,
            tags,
        } = def;
        let next = self.next_id();
        for tag in &tags {
            self.symbols.entry(tag.clone()).or_insert(next);
        }
        let id = self.push(
            Term::new(name),
            numeric,
            MeasureKind::Unit(Unit {
                sense,
                factor,
                format,
                tags,
                fellow_operations: Vec::new(),
            }),
        );
        debug_assert_eq!(plan.candidate, id, "binding plan built for another unit");
        for relative in plan.relatives {
            self.add_relative(relative, id);
        }
        for (owner, operation) in plan.operations {
            if let Some(MeasureKind::Unit(unit)) =
                self.measures.get_mut(owner.index()).map(|m| &mut m.kind)
            {
                unit.fellow_operations.push(operation);
            }
        }
        self.assign_family_to(id);
        self.units.push(id);
        tracing::trace!(unit = self.name(id), ?id, "registered unit");
        id
    }

    /// Register a scale and link it to the family of its relative scale.
    pub fn add_scale(&mut self, def: ScaleDef) -> MeasureId {
        let ScaleDef {
            name,
            refpoint,
            unit,
            offset,
            format,
        } = def;
        let relative = self.relative_scale_for(&refpoint, unit);
        let numeric = self.measure(unit).numeric;
        let id = self.push(
            Term::new(name),
            numeric,
            MeasureKind::Scale(Scale {
                refpoint,
                unit,
                offset,
                format,
            }),
        );
        if let Some(relative) = relative {
            self.add_relative(relative, id);
        }
        self.assign_family_to(id);
        self.scales.push(id);
        tracing::trace!(scale = self.name(id), ?id, "registered scale");
        id
    }

    fn push(&mut self, term: Term, numeric: NumericType, kind: MeasureKind) -> MeasureId {
        let id = self.next_id();
        self.names.insert(term.source.clone(), id);
        self.families.insert(id, smallvec![id]);
        self.measures.push(Measure {
            term,
            numeric,
            prime: None,
            family: None,
            kind,
        });
        id
    }
}
