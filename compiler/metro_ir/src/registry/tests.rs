#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;
use crate::{Dimension, Operator};

fn unit_def(name: &str, sense: Dimension, factor: f64, tag: &str) -> UnitDef {
    UnitDef {
        name: name.to_owned(),
        numeric: NumericType::Double,
        sense: DimExpr::new(sense, ""),
        factor: NumExpr::new(true, factor, format!("{factor}d")),
        format: "{0} {1}".to_owned(),
        tags: smallvec![tag.to_owned()],
    }
}

/// Register a unit, joining the family of each of `relatives`.
fn add(registry: &mut Registry, def: UnitDef, relatives: &[MeasureId]) -> MeasureId {
    let mut plan = BindPlan::new(registry.next_id());
    plan.relatives.extend_from_slice(relatives);
    registry.add_unit(def, plan)
}

fn seed(name: &str, factor: f64, family: u32) -> SeedUnit {
    SeedUnit {
        name: name.to_owned(),
        numeric: NumericType::Double,
        sense: Dimension::LENGTH,
        factor,
        opaque_factor: None,
        format: "{0} {1}".to_owned(),
        tags: vec![name.to_lowercase()],
        family: FamilyId(family),
    }
}

// === Lookup ===

#[test]
fn test_units_keep_definition_order() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let meter = add(&mut registry, unit_def("Meter", Dimension::LENGTH, 1.0, "m"), &[]);
    let second = add(&mut registry, unit_def("Second", Dimension::TIME, 1.0, "s"), &[]);

    assert_eq!(registry.unit_ids(), &[meter, second]);
    assert_eq!(registry.find_unit("Second"), Some(second));
    assert_eq!(registry.find_scale("Second"), None);
    assert_eq!(registry.find_measure("Hour"), None);
    assert_eq!(registry.unit_with_symbol("m"), Some(meter));
    assert_eq!(registry.unit_count(), 2);
    assert_eq!(registry.scale_count(), 0);
}

// === Families ===

#[test]
fn test_add_relative_merges_singletons() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let meter = add(&mut registry, unit_def("Meter", Dimension::LENGTH, 1.0, "m"), &[]);
    let foot = add(&mut registry, unit_def("Foot", Dimension::LENGTH, 3.28, "ft"), &[]);

    assert!(registry.add_relative(meter, foot));
    assert_eq!(registry.prime(meter), None);
    assert_eq!(registry.prime(foot), Some(meter));
    assert_eq!(registry.family_members(foot), &[meter, foot]);
    assert_eq!(registry.relatives(meter).collect::<Vec<_>>(), vec![foot]);

    // relating twice changes nothing
    assert!(!registry.add_relative(foot, meter));
    assert_eq!(registry.prime(foot), Some(meter));
}

#[test]
fn test_merge_repoints_every_absorbed_member() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let meter = add(&mut registry, unit_def("Meter", Dimension::LENGTH, 1.0, "m"), &[]);
    let foot = add(&mut registry, unit_def("Foot", Dimension::LENGTH, 3.28, "ft"), &[meter]);
    let mile = add(&mut registry, unit_def("Mile", Dimension::LENGTH, 1.0, "mi"), &[]);
    let yard = add(&mut registry, unit_def("Yard", Dimension::LENGTH, 1760.0, "yd"), &[mile]);
    assert_ne!(registry.family(meter), registry.family(mile));

    assert!(registry.add_relative(foot, yard));

    let members = [meter, foot, mile, yard];
    for member in members {
        assert_eq!(registry.representative(member), meter);
        assert_eq!(registry.family(member), registry.family(meter));
    }
    let primes = members
        .iter()
        .filter(|&&member| registry.prime(member).is_none())
        .count();
    assert_eq!(primes, 1);
    assert_eq!(registry.family_members(yard), &members);
}

#[test]
fn test_family_numbers_follow_representatives() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let meter = add(&mut registry, unit_def("Meter", Dimension::LENGTH, 1.0, "m"), &[]);
    let second = add(&mut registry, unit_def("Second", Dimension::TIME, 1.0, "s"), &[]);
    let foot = add(&mut registry, unit_def("Foot", Dimension::LENGTH, 3.28, "ft"), &[meter]);

    assert_eq!(registry.family(meter), Some(FamilyId(0)));
    assert_eq!(registry.family(second), Some(FamilyId(1)));
    assert_eq!(registry.family(foot), Some(FamilyId(0)));
    assert_eq!(registry.family_count(registry.unit_ids().to_vec()), 2);
}

#[test]
fn test_add_unit_commits_plan_operations() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let meter = add(&mut registry, unit_def("Meter", Dimension::LENGTH, 1.0, "m"), &[]);
    let second = add(&mut registry, unit_def("Second", Dimension::TIME, 1.0, "s"), &[]);

    let speed = registry.next_id();
    let mut plan = BindPlan::new(speed);
    plan.operations.push((
        meter,
        BinaryOperation::new(speed, Operator::Divide, meter, second),
    ));
    plan.operations.push((
        speed,
        BinaryOperation::new(meter, Operator::Multiply, speed, second),
    ));
    let def = unit_def("MeterPerSecond", Dimension::LENGTH, 1.0, "m/s");
    assert_eq!(registry.add_unit(def, plan), speed);

    assert_eq!(registry.unit(meter).map(|u| u.fellow_operations.len()), Some(1));
    let rendered: Vec<String> = registry
        .unit(speed)
        .into_iter()
        .flat_map(|u| u.fellow_operations.iter())
        .map(|op| registry.display_operation(op).to_string())
        .collect();
    assert_eq!(rendered, vec!["Meter = MeterPerSecond * Second".to_owned()]);
}

// === Scales ===

#[test]
fn test_scales_relate_through_their_units() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let kelvin = add(&mut registry, unit_def("Kelvin", Dimension::TEMPERATURE, 1.0, "K"), &[]);
    let celsius = add(
        &mut registry,
        unit_def("DegCelsius", Dimension::TEMPERATURE, 1.0, "deg.C"),
        &[kelvin],
    );
    let offset = |value: f64| NumExpr::new(true, value, format!("{value}d"));
    let absolute = registry.add_scale(ScaleDef {
        name: "AbsoluteScale".to_owned(),
        refpoint: String::new(),
        unit: kelvin,
        offset: offset(0.0),
        format: String::new(),
    });
    let centigrade = registry.add_scale(ScaleDef {
        name: "Celsius".to_owned(),
        refpoint: String::new(),
        unit: celsius,
        offset: offset(273.15),
        format: String::new(),
    });
    let shifted = registry.add_scale(ScaleDef {
        name: "Triple".to_owned(),
        refpoint: "TriplePoint".to_owned(),
        unit: kelvin,
        offset: offset(0.0),
        format: String::new(),
    });

    assert_eq!(registry.prime(centigrade), Some(absolute));
    assert_eq!(registry.prime(shifted), None);
    assert_eq!(registry.family_count(registry.scale_ids().to_vec()), 2);
    assert_eq!(registry.find_scale_for("", celsius), Some(centigrade));
    assert_eq!(registry.find_scale_for("TriplePoint", celsius), None);
    assert_eq!(
        registry.display_scale(centigrade).to_string(),
        "[ϴ] AbsoluteScale::Celsius : <common reference point> = DegCelsius 273.15"
    );
}

// === Display ===

#[test]
fn test_unit_display() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let meter = add(&mut registry, unit_def("Meter", Dimension::LENGTH, 1.0, "m"), &[]);
    let mut def = unit_def("Foot", Dimension::LENGTH, 3.280_839_895_013_12, "ft");
    def.tags.push("feet".to_owned());
    let foot = add(&mut registry, def, &[meter]);

    assert_eq!(
        registry.display_unit(foot).to_string(),
        "[L] Meter::Foot {\"ft\", \"feet\"} : 3.28083989501312"
    );

    let opaque = UnitDef {
        factor: NumExpr::new(false, 1.0, "Constants.Avogadro"),
        ..unit_def("Mole", Dimension::AMOUNT_OF_SUBSTANCE, 1.0, "mol")
    };
    let mole = add(&mut registry, opaque, &[]);
    assert_eq!(
        registry.display_unit(mole).to_string(),
        "[N] Mole::Mole {\"mol\"} : Constants.Avogadro"
    );
}

// === Seeding ===

#[test]
fn test_seeded_family_links_to_first_member() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let meter = registry.seed_unit(seed("Meter", 1.0, 3)).unwrap();
    let second = registry
        .seed_unit(SeedUnit {
            sense: Dimension::TIME,
            ..seed("Second", 1.0, 5)
        })
        .unwrap();
    let foot = registry.seed_unit(seed("Foot", 3.28, 3)).unwrap();

    assert_eq!(registry.prime(foot), Some(meter));
    assert_eq!(registry.family(foot), Some(FamilyId(3)));
    assert!(!registry.same_family(meter, second));

    // numbering continues past the largest restored family
    let hour = add(&mut registry, unit_def("Hour", Dimension::TIME, 1.0, "h"), &[]);
    assert_eq!(registry.family(hour), Some(FamilyId(6)));
}

#[test]
fn test_seed_decompiles_values_into_literals() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let foot = registry.seed_unit(seed("Foot", 3.28, 0)).unwrap();
    let unit = registry.unit(foot).unwrap();
    assert_eq!(unit.factor.simple, "3.28d");
    assert!(unit.factor.is_real);
    assert_eq!(unit.sense.value, Dimension::LENGTH);

    let opaque = registry
        .seed_unit(SeedUnit {
            opaque_factor: Some("Constants.Avogadro".to_owned()),
            ..seed("Mole", 1.0, 1)
        })
        .unwrap();
    let unit = registry.unit(opaque).unwrap();
    assert!(!unit.factor.is_real);
    assert_eq!(unit.factor.simple, "Constants.Avogadro");
}

#[test]
fn test_seed_rejects_conflicts() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    registry.seed_unit(seed("Meter", 1.0, 0)).unwrap();

    assert_eq!(
        registry.seed_unit(seed("Meter", 1.0, 0)),
        Err(SeedError::DuplicateName("Meter".to_owned()))
    );
    assert_eq!(
        registry.seed_unit(SeedUnit {
            tags: vec!["meter".to_owned()],
            ..seed("Metre", 1.0, 0)
        }),
        Err(SeedError::DuplicateSymbol {
            unit: "Metre".to_owned(),
            symbol: "meter".to_owned(),
            owner: "Meter".to_owned(),
        })
    );
    assert_eq!(
        registry.seed_unit(SeedUnit {
            numeric: NumericType::LongDouble,
            ..seed("Fathom", 1.0, 0)
        }),
        Err(SeedError::UnsupportedNumeric {
            name: "Fathom".to_owned(),
            numeric: NumericType::LongDouble,
            target: TargetLanguage::CSharp,
        })
    );
    let scale = SeedScale {
        name: "Celsius".to_owned(),
        refpoint: String::new(),
        unit: "DegCelsius".to_owned(),
        offset: 273.15,
        format: String::new(),
        family: FamilyId(1),
    };
    assert_eq!(
        registry.seed_scale(scale),
        Err(SeedError::UnknownUnit {
            scale: "Celsius".to_owned(),
            unit: "DegCelsius".to_owned(),
        })
    );
    assert_eq!(registry.unit_count(), 1);
}

#[test]
fn test_export_reseeds_to_the_same_registry() {
    let mut registry = Registry::new(TargetLanguage::CSharp);
    let meter = add(&mut registry, unit_def("Meter", Dimension::LENGTH, 1.0, "m"), &[]);
    add(&mut registry, unit_def("Foot", Dimension::LENGTH, 3.28, "ft"), &[meter]);
    let kelvin = add(&mut registry, unit_def("Kelvin", Dimension::TEMPERATURE, 1.0, "K"), &[]);
    registry.add_scale(ScaleDef {
        name: "AbsoluteScale".to_owned(),
        refpoint: String::new(),
        unit: kelvin,
        offset: NumExpr::new(true, 0.0, "0d"),
        format: String::new(),
    });

    let units = registry.export_units();
    let scales = registry.export_scales();
    let mut reloaded = Registry::new(TargetLanguage::CSharp);
    for unit in units.clone() {
        reloaded.seed_unit(unit).unwrap();
    }
    for scale in scales.clone() {
        reloaded.seed_scale(scale).unwrap();
    }

    assert_eq!(reloaded.export_units(), units);
    assert_eq!(reloaded.export_scales(), scales);
    let foot = reloaded.find_unit("Foot").unwrap();
    assert_eq!(reloaded.representative(foot), reloaded.find_unit("Meter").unwrap());
}
