//! Numeric types a unit can be declared over, and their value handling.
//!
//! Every value is carried as `f64`. `Float` values are rounded through `f32`
//! after each arithmetic step so that factors match what a single-precision
//! target would compute.

use std::fmt;

/// Built-in numeric type backing a unit's value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericType {
    Double,
    Float,
    Decimal,
    LongDouble,
}

impl NumericType {
    /// Keyword used for this type inside definition text (`unit<float> ...`).
    pub const fn source_keyword(self) -> &'static str {
        match self {
            NumericType::Double => "double",
            NumericType::Float => "float",
            NumericType::Decimal => "decimal",
            NumericType::LongDouble => "longdouble",
        }
    }

    /// Round a value to the precision of this type.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "narrowing to f32 is the rounding being performed"
    )]
    pub fn round(self, value: f64) -> f64 {
        match self {
            NumericType::Float => f64::from(value as f32),
            NumericType::Double | NumericType::Decimal | NumericType::LongDouble => value,
        }
    }

    /// Parse a finite number (`"12"`, `"0.3048"`, `"1.5e-3"`), rounded to this type.
    pub fn parse(self, text: &str) -> Option<f64> {
        let value: f64 = text.trim().parse().ok()?;
        value.is_finite().then(|| self.round(value))
    }

    #[inline]
    pub fn add(self, lhs: f64, rhs: f64) -> f64 {
        self.round(lhs + rhs)
    }

    #[inline]
    pub fn sub(self, lhs: f64, rhs: f64) -> f64 {
        self.round(lhs - rhs)
    }

    #[inline]
    pub fn mul(self, lhs: f64, rhs: f64) -> f64 {
        self.round(lhs * rhs)
    }

    #[inline]
    pub fn div(self, lhs: f64, rhs: f64) -> f64 {
        self.round(lhs / rhs)
    }

    /// Shortest text that reads back to the same value of this type.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float values are already f32-representable"
    )]
    pub fn format_general(self, value: f64) -> String {
        match self {
            NumericType::Float => general(value as f32, value),
            NumericType::Double | NumericType::Decimal | NumericType::LongDouble => {
                general(value, value)
            }
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_keyword())
    }
}

/// Positional notation for moderate magnitudes, `1.5E+20` style otherwise.
fn general<T: fmt::Display + fmt::LowerExp>(value: T, magnitude: f64) -> String {
    let abs = magnitude.abs();
    if abs == 0.0 || (1e-5..1e15).contains(&abs) {
        return value.to_string();
    }
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}E{sign}{digits:0>2}")
        }
        None => exp,
    }
}

/// `Math.PI`-style constants accepted in string literals.
///
/// Returns the value and the canonical spelling used in generated code.
pub fn math_constant(literal: &str) -> Option<(f64, &'static str)> {
    match literal {
        "Math.PI" | "System.Math.PI" => Some((std::f64::consts::PI, "System.Math.PI")),
        "Math.E" | "System.Math.E" => Some((std::f64::consts::E, "System.Math.E")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_non_finite() {
        assert_eq!(NumericType::Double.parse("0.3048"), Some(0.3048));
        assert_eq!(NumericType::Double.parse(" 12 "), Some(12.0));
        assert_eq!(NumericType::Double.parse("1.5e3"), Some(1500.0));
        assert_eq!(NumericType::Double.parse("inf"), None);
        assert_eq!(NumericType::Double.parse("NaN"), None);
        assert_eq!(NumericType::Double.parse("Math.PI"), None);
    }

    #[test]
    fn test_float_rounds_through_f32() {
        let third = NumericType::Float.div(1.0, 3.0);
        assert_eq!(third, f64::from(1.0f32 / 3.0f32));
        assert_eq!(NumericType::Double.div(1.0, 3.0), 1.0 / 3.0);
    }

    #[test]
    fn test_general_format() {
        assert_eq!(NumericType::Double.format_general(0.3048), "0.3048");
        assert_eq!(NumericType::Double.format_general(5280.0), "5280");
        assert_eq!(NumericType::Double.format_general(0.0), "0");
        assert_eq!(NumericType::Double.format_general(1e20), "1E+20");
        assert_eq!(NumericType::Double.format_general(-2.5e-7), "-2.5E-07");
        assert_eq!(NumericType::Float.format_general(f64::from(0.1f32)), "0.1");
    }

    #[test]
    fn test_math_constants() {
        assert_eq!(
            math_constant("Math.PI"),
            Some((std::f64::consts::PI, "System.Math.PI"))
        );
        assert_eq!(
            math_constant("System.Math.E"),
            Some((std::f64::consts::E, "System.Math.E"))
        );
        assert_eq!(math_constant("Math.Tau"), None);
    }
}
