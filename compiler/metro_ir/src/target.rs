//! Target language phrasebook.
//!
//! Compiled expressions carry code text for the language the backend will
//! emit. Everything language-specific the front end needs (scope separator,
//! property names, the numeric types on offer and how their literals are
//! spelled) is answered here.

use std::fmt;
use std::str::FromStr;

use crate::{Magnitude, NumericType, Term};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetLanguage {
    #[default]
    CSharp,
    Cpp,
}

const CSHARP_NUMERICS: [NumericType; 3] = [
    NumericType::Double,
    NumericType::Decimal,
    NumericType::Float,
];

const CPP_NUMERICS: [NumericType; 3] = [
    NumericType::Double,
    NumericType::LongDouble,
    NumericType::Float,
];

impl TargetLanguage {
    /// Numeric types available for `unit<type>`; the first is the default.
    pub fn numeric_types(self) -> &'static [NumericType] {
        match self {
            TargetLanguage::CSharp => &CSHARP_NUMERICS,
            TargetLanguage::Cpp => &CPP_NUMERICS,
        }
    }

    pub fn default_numeric(self) -> NumericType {
        self.numeric_types()[0]
    }

    /// Look up a numeric type by its definition keyword.
    pub fn numeric_from_keyword(self, keyword: &str) -> Option<NumericType> {
        self.numeric_types()
            .iter()
            .copied()
            .find(|n| n.source_keyword() == keyword)
    }

    pub fn numeric_term(self, numeric: NumericType) -> Term {
        let source = numeric.source_keyword();
        match (self, numeric) {
            (TargetLanguage::CSharp, NumericType::Double) => {
                Term::predefined(source, "double", "System.Double")
            }
            (TargetLanguage::CSharp, NumericType::Decimal) => {
                Term::predefined(source, "decimal", "System.Decimal")
            }
            (TargetLanguage::CSharp, NumericType::Float) => {
                Term::predefined(source, "float", "System.Single")
            }
            (_, NumericType::LongDouble) => Term::predefined(source, "long double", "long double"),
            (TargetLanguage::Cpp, other) => {
                Term::predefined(source, other.source_keyword(), other.source_keyword())
            }
        }
    }

    /// Literal for `value` in the target language.
    pub fn literal(self, numeric: NumericType, value: f64) -> String {
        let general = numeric.format_general(value);
        match self {
            TargetLanguage::CSharp => match numeric {
                NumericType::Decimal if value == 0.0 => "decimal.Zero".to_owned(),
                NumericType::Decimal if value == 1.0 => "decimal.One".to_owned(),
                NumericType::Decimal => format!("{general}m"),
                NumericType::Float => format!("{general}f"),
                NumericType::Double | NumericType::LongDouble => format!("{general}d"),
            },
            TargetLanguage::Cpp => {
                let suffix = match numeric {
                    NumericType::LongDouble => "L",
                    NumericType::Float => "f",
                    NumericType::Double | NumericType::Decimal => "",
                };
                if value.is_finite() && value == value.trunc() {
                    format!("{value:.1}{suffix}")
                } else {
                    format!("{general}{suffix}")
                }
            }
        }
    }

    pub fn scope_separator(self) -> &'static str {
        match self {
            TargetLanguage::CSharp => ".",
            TargetLanguage::Cpp => "::",
        }
    }

    pub fn sense_property(self) -> &'static str {
        match self {
            TargetLanguage::CSharp => "Sense",
            TargetLanguage::Cpp => "sense",
        }
    }

    pub fn factor_property(self) -> &'static str {
        match self {
            TargetLanguage::CSharp => "Factor",
            TargetLanguage::Cpp => "factor",
        }
    }

    /// Format applied to units declared without `: "format"`.
    pub fn quantity_format(self) -> &'static str {
        match self {
            TargetLanguage::CSharp => "{0} {1}",
            TargetLanguage::Cpp => "%f %s",
        }
    }

    /// `Dimension.Length`, or `Dimension.None` for dimensionless.
    pub fn dimension_code(self, magnitude: Option<Magnitude>) -> String {
        let sep = self.scope_separator();
        match magnitude {
            Some(m) => format!("Dimension{sep}{m}"),
            None => format!("Dimension{sep}None"),
        }
    }

    pub fn sense_code(self, measure: &Term) -> String {
        format!(
            "{}{}{}",
            measure.target,
            self.scope_separator(),
            self.sense_property()
        )
    }

    pub fn factor_code(self, measure: &Term) -> String {
        format!(
            "{}{}{}",
            measure.target,
            self.scope_separator(),
            self.factor_property()
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TargetLanguage::CSharp => "cs",
            TargetLanguage::Cpp => "cpp",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized target language name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown target language `{0}` (expected `cs` or `cpp`)")]
pub struct UnknownTarget(pub String);

impl FromStr for TargetLanguage {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cs" | "csharp" | "c#" => Ok(TargetLanguage::CSharp),
            "cpp" | "c++" => Ok(TargetLanguage::Cpp),
            other => Err(UnknownTarget(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_numeric_is_first() {
        assert_eq!(TargetLanguage::CSharp.default_numeric(), NumericType::Double);
        assert_eq!(TargetLanguage::Cpp.default_numeric(), NumericType::Double);
        assert_eq!(
            TargetLanguage::CSharp.numeric_from_keyword("decimal"),
            Some(NumericType::Decimal)
        );
        assert_eq!(TargetLanguage::CSharp.numeric_from_keyword("longdouble"), None);
        assert_eq!(
            TargetLanguage::Cpp.numeric_from_keyword("longdouble"),
            Some(NumericType::LongDouble)
        );
    }

    #[test]
    fn test_csharp_literals() {
        let cs = TargetLanguage::CSharp;
        assert_eq!(cs.literal(NumericType::Double, 0.3048), "0.3048d");
        assert_eq!(cs.literal(NumericType::Double, 5280.0), "5280d");
        assert_eq!(cs.literal(NumericType::Decimal, 0.0), "decimal.Zero");
        assert_eq!(cs.literal(NumericType::Decimal, 1.0), "decimal.One");
        assert_eq!(cs.literal(NumericType::Decimal, 2.54), "2.54m");
        assert_eq!(cs.literal(NumericType::Float, 100.0), "100f");
    }

    #[test]
    fn test_cpp_literals() {
        let cpp = TargetLanguage::Cpp;
        assert_eq!(cpp.literal(NumericType::Double, 5280.0), "5280.0");
        assert_eq!(cpp.literal(NumericType::Double, 0.3048), "0.3048");
        assert_eq!(cpp.literal(NumericType::LongDouble, 1.0), "1.0L");
        assert_eq!(cpp.literal(NumericType::Float, 0.5), "0.5f");
    }

    #[test]
    fn test_codes() {
        let meter = Term::new("Meter");
        assert_eq!(TargetLanguage::CSharp.sense_code(&meter), "Meter.Sense");
        assert_eq!(TargetLanguage::Cpp.factor_code(&meter), "Meter::factor");
        assert_eq!(
            TargetLanguage::CSharp.dimension_code(Some(Magnitude::Length)),
            "Dimension.Length"
        );
        assert_eq!(TargetLanguage::Cpp.dimension_code(None), "Dimension::None");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("cs".parse::<TargetLanguage>(), Ok(TargetLanguage::CSharp));
        assert_eq!("cpp".parse::<TargetLanguage>(), Ok(TargetLanguage::Cpp));
        assert_eq!(
            "java".parse::<TargetLanguage>(),
            Err(UnknownTarget("java".to_owned()))
        );
    }
}
