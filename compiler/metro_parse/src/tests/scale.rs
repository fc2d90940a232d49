#![allow(clippy::unwrap_used, clippy::expect_used)]

use metro_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::{codes, compile_cs, compile_ok, messages};

const TEMPERATURES: &str = r#"
unit Kelvin "K" = <Temperature>;
unit DegCelsius "deg C" = Kelvin;
unit DegFahrenheit "deg F" = (5 / 9) * Kelvin;
scale Kelvins AbsoluteZero = Kelvin 0;
scale Celsius AbsoluteZero = DegCelsius 273.15;
scale Fahrenheit AbsoluteZero = DegFahrenheit 273.15 * 9 / 5 - 32;
"#;

fn with_temperatures(extra: &str) -> String {
    format!("{TEMPERATURES}{extra}\n")
}

#[test]
fn test_scales_on_related_units_form_a_family() {
    let registry = compile_ok(TEMPERATURES);
    let kelvins = registry.find_scale("Kelvins").unwrap();
    let celsius = registry.find_scale("Celsius").unwrap();
    let fahrenheit = registry.find_scale("Fahrenheit").unwrap();

    let scale = registry.scale(celsius).unwrap();
    assert_eq!(scale.refpoint, "AbsoluteZero");
    assert_eq!(scale.unit, registry.find_unit("DegCelsius").unwrap());
    assert_eq!(scale.offset.value, 273.15);
    assert_eq!(scale.offset.simple, "273.15d");
    assert_eq!(scale.format, "{0} {1}");

    let offset = registry.scale(fahrenheit).unwrap().offset.value;
    assert!((offset - 459.67).abs() < 1e-9, "{offset}");

    assert!(registry.same_family(celsius, kelvins));
    assert!(registry.same_family(fahrenheit, kelvins));
    assert_eq!(registry.scale_count(), 3);
}

#[test]
fn test_format_and_common_reference_point() {
    let registry = compile_ok(&with_temperatures(r#"scale Plain : "{0} K" = Kelvin 0;"#));
    let plain = registry.scale(registry.find_scale("Plain").unwrap()).unwrap();
    assert_eq!(plain.refpoint, "");
    assert_eq!(plain.format, "{0} K");

    let kelvins = registry.find_scale("Kelvins").unwrap();
    assert!(!registry.same_family(registry.find_scale("Plain").unwrap(), kelvins));
}

#[test]
fn test_offset_expressions() {
    let registry = compile_ok(&with_temperatures(
        r#"
scale Shifted Ice = DegCelsius -(1 + 2);
scale Water Ice = Kelvin "Offsets.Ice";
"#,
    ));
    let shifted = registry.scale(registry.find_scale("Shifted").unwrap()).unwrap();
    assert_eq!(shifted.offset.value, -3.0);
    assert_eq!(shifted.offset.simple, "-(1d + 2d)");
    assert_eq!(shifted.offset.unfolded, "-(1d + 2d)");

    let water = registry.scale(registry.find_scale("Water").unwrap()).unwrap();
    assert!(!water.offset.is_real);
    assert_eq!(water.offset.simple, "Offsets.Ice");
}

#[test]
fn test_offset_uses_the_unit_numeric_type() {
    let registry = compile_ok(
        r#"
unit<float> Kf "Kf" = <Temperature>;
scale Sf = Kf 0.1;
"#,
    );
    let scale = registry.scale(registry.find_scale("Sf").unwrap()).unwrap();
    assert_eq!(scale.offset.value, f64::from(0.1f32));
}

#[test]
fn test_second_scale_on_same_unit_and_refpoint_is_ambiguous() {
    let (registry, output) =
        compile_cs(&with_temperatures("scale Rankine AbsoluteZero = DegFahrenheit 0;"));
    assert_eq!(codes(&output), [ErrorCode::E2009]);
    assert_eq!(
        messages(&output),
        ["Rankine: same unit DegFahrenheit as in scale Fahrenheit (ambiguous unit-to-scale mapping)."]
    );
    assert!(registry.find_measure("Rankine").is_none());
}

#[test]
fn test_scale_errors() {
    let cases = [
        ("scale S = Metre 0;", "S: undefined unit \"Metre\"."),
        ("scale S = Celsius 0;", "S: undefined unit \"Celsius\"."),
        (
            "scale S = Kelvin;",
            "S: found \";\" while expected numeric factor: number | (expression) | \"literal\".",
        ),
        (
            "scale S Zero 0;",
            "S: found \"0\" while expected equal sign \"=\".",
        ),
        (
            r#"scale S : "{0}" 12 = Kelvin 0;"#,
            "S: found \"12\" while expected a name of reference-point or equal sign \"=\".",
        ),
        ("scale S = 12 0;", "S: found \"12\" while expected unit name."),
        (
            "scale Kelvin = Kelvin 0;",
            "Kelvin: redefinition is not allowed (units/scales must have unique names).",
        ),
        (
            "scale S = Kelvin (1 + 2;",
            "S: found \";\" while expected expression in parentheses ().",
        ),
        (
            "scale S = Kelvin 1",
            "S: found \"end of file\", while a definition terminated with semicolon (\";\") was expected.",
        ),
    ];
    for (statement, expected) in cases {
        let (registry, output) = compile_cs(&with_temperatures(statement));
        assert_eq!(messages(&output), [expected], "{statement}");
        assert!(registry.find_scale("S").is_none(), "{statement}");
    }
}
