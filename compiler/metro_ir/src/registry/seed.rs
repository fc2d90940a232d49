//! Re-entry: seeding a registry with measures from an earlier compilation.
//!
//! A seeded measure carries only its values, so its sense and factor are
//! "decompiled" into compiled expressions with literal code. Family numbers
//! are restored rather than reassigned, and members of one family are linked
//! to the first member seeded for it.

use smallvec::SmallVec;

use super::{FamilyId, MeasureId, MeasureKind, Registry, Scale, Unit};
use crate::{DimExpr, Dimension, NumExpr, NumericType, Term};

/// A unit as stored in a catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedUnit {
    pub name: String,
    pub numeric: NumericType,
    pub sense: Dimension,
    pub factor: f64,
    /// Code of a factor whose value was a placeholder.
    pub opaque_factor: Option<String>,
    pub format: String,
    pub tags: Vec<String>,
    pub family: FamilyId,
}

/// A scale as stored in a catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedScale {
    pub name: String,
    pub refpoint: String,
    pub unit: String,
    pub offset: f64,
    pub format: String,
    pub family: FamilyId,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("{0}: redefinition is not allowed (units/scales must have unique names)")]
    DuplicateName(String),

    #[error("{unit}: unit symbol \"{symbol}\" has already been used in the {owner} unit")]
    DuplicateSymbol {
        unit: String,
        symbol: String,
        owner: String,
    },

    #[error("{scale}: undefined unit \"{unit}\"")]
    UnknownUnit { scale: String, unit: String },

    #[error("{name}: numeric type <{numeric}> is not available for target `{target}`")]
    UnsupportedNumeric {
        name: String,
        numeric: NumericType,
        target: crate::TargetLanguage,
    },
}

impl Registry {
    /// Add a previously compiled unit.
    pub fn seed_unit(&mut self, seed: SeedUnit) -> Result<MeasureId, SeedError> {
        let SeedUnit {
            name,
            numeric,
            sense,
            factor,
            opaque_factor,
            format,
            tags,
            family,
        } = seed;
        if self.find_measure(&name).is_some() {
            return Err(SeedError::DuplicateName(name));
        }
        if self.target.numeric_from_keyword(numeric.source_keyword()).is_none() {
            return Err(SeedError::UnsupportedNumeric {
                name,
                numeric,
                target: self.target,
            });
        }
        if let Some((symbol, owner)) = tags
            .iter()
            .find_map(|tag| self.unit_with_symbol(tag).map(|owner| (tag, owner)))
        {
            return Err(SeedError::DuplicateSymbol {
                unit: name,
                symbol: symbol.clone(),
                owner: self.name(owner).to_owned(),
            });
        }

        let factor = match opaque_factor {
            Some(code) => NumExpr::new(false, factor, code),
            None => NumExpr::new(true, factor, self.target.literal(numeric, factor)),
        };
        let id = self.next_id();
        for tag in &tags {
            self.symbols.insert(tag.clone(), id);
        }
        self.push(
            Term::new(name),
            numeric,
            MeasureKind::Unit(Unit {
                sense: DimExpr::new(sense, String::new()),
                factor,
                format,
                tags: SmallVec::from_vec(tags),
                fellow_operations: Vec::new(),
            }),
        );
        self.restore_family(id, family);
        self.units.push(id);
        Ok(id)
    }

    /// Add a previously compiled scale; its unit must already be present.
    pub fn seed_scale(&mut self, seed: SeedScale) -> Result<MeasureId, SeedError> {
        let SeedScale {
            name,
            refpoint,
            unit,
            offset,
            format,
            family,
        } = seed;
        if self.find_measure(&name).is_some() {
            return Err(SeedError::DuplicateName(name));
        }
        let Some(unit_id) = self.find_unit(&unit) else {
            return Err(SeedError::UnknownUnit { scale: name, unit });
        };
        let numeric = self.measure(unit_id).numeric;
        let offset = NumExpr::new(true, offset, self.target.literal(numeric, offset));
        let id = self.push(
            Term::new(name),
            numeric,
            MeasureKind::Scale(Scale {
                refpoint,
                unit: unit_id,
                offset,
                format,
            }),
        );
        self.restore_family(id, family);
        self.scales.push(id);
        Ok(id)
    }

    fn restore_family(&mut self, id: MeasureId, family: FamilyId) {
        self.restore_family_for(id, family);
        match self.seeded_families.get(&family) {
            Some(&primary) => {
                self.add_relative(primary, id);
            }
            None => {
                self.seeded_families.insert(family, id);
            }
        }
    }

    /// Units in catalog form, in definition order.
    pub fn export_units(&self) -> Vec<SeedUnit> {
        self.units()
            .filter_map(|(id, measure, unit)| {
                Some(SeedUnit {
                    name: measure.name().to_owned(),
                    numeric: measure.numeric,
                    sense: unit.sense.value,
                    factor: unit.factor.value,
                    opaque_factor: (!unit.factor.is_real).then(|| unit.factor.simple.clone()),
                    format: unit.format.clone(),
                    tags: unit.tags.to_vec(),
                    family: self.family(id)?,
                })
            })
            .collect()
    }

    /// Scales in catalog form, in definition order.
    pub fn export_scales(&self) -> Vec<SeedScale> {
        self.scales()
            .filter_map(|(id, measure, scale)| {
                Some(SeedScale {
                    name: measure.name().to_owned(),
                    refpoint: scale.refpoint.clone(),
                    unit: self.name(scale.unit).to_owned(),
                    offset: scale.offset.value,
                    format: scale.format.clone(),
                    family: self.family(id)?,
                })
            })
            .collect()
    }
}
