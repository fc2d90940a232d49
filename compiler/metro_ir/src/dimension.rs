//! Packed physical dimensions.
//!
//! A [`Dimension`] is a vector of eight signed exponents, one per base
//! [`Magnitude`], stored as one byte each (two's complement) in a `u64`.
//! Equality is equality of the packed word.
//!
//! Multiplication and division add/subtract all eight lanes at once with a
//! bit-parallel carry (borrow) loop. Carries never cross a lane boundary, and
//! a lane overflows exactly when the carry into its sign bit differs from the
//! carry out of it. The per-lane checked computation is kept in the tests as
//! the reference the packed path is checked against.

use std::fmt;

/// Base physical magnitudes, in lane order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Magnitude {
    Length = 0,
    Time = 1,
    Mass = 2,
    Temperature = 3,
    ElectricCurrent = 4,
    AmountOfSubstance = 5,
    LuminousIntensity = 6,
    /// Also spelled `Money` in definitions.
    Other = 7,
}

impl Magnitude {
    pub const COUNT: usize = 8;

    pub const ALL: [Magnitude; Magnitude::COUNT] = [
        Magnitude::Length,
        Magnitude::Time,
        Magnitude::Mass,
        Magnitude::Temperature,
        Magnitude::ElectricCurrent,
        Magnitude::AmountOfSubstance,
        Magnitude::LuminousIntensity,
        Magnitude::Other,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Magnitude::Length => "Length",
            Magnitude::Time => "Time",
            Magnitude::Mass => "Mass",
            Magnitude::Temperature => "Temperature",
            Magnitude::ElectricCurrent => "ElectricCurrent",
            Magnitude::AmountOfSubstance => "AmountOfSubstance",
            Magnitude::LuminousIntensity => "LuminousIntensity",
            Magnitude::Other => "Other",
        }
    }

    /// Symbol used when formatting dimensions.
    pub const fn symbol(self) -> &'static str {
        match self {
            Magnitude::Length => "L",
            Magnitude::Time => "T",
            Magnitude::Mass => "M",
            Magnitude::Temperature => "\u{03F4}",
            Magnitude::ElectricCurrent => "I",
            Magnitude::AmountOfSubstance => "N",
            Magnitude::LuminousIntensity => "J",
            Magnitude::Other => "\u{00A4}",
        }
    }

    /// Look up a magnitude by its definition-language keyword (case sensitive).
    pub fn from_name(name: &str) -> Option<Magnitude> {
        if name == "Money" {
            return Some(Magnitude::Other);
        }
        Magnitude::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Keywords accepted by [`Magnitude::from_name`], for error messages.
    pub fn keywords() -> impl Iterator<Item = &'static str> {
        Magnitude::ALL
            .into_iter()
            .map(Magnitude::name)
            .chain(std::iter::once("Money"))
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised by dimension arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    #[error("Dimension[{magnitude}] = {value}: value out of range [{MIN_EXPONENT},{MAX_EXPONENT}]")]
    ExponentOutOfRange { magnitude: Magnitude, value: i32 },

    #[error("{lhs} * {rhs}: dimension product out of range [{MIN_EXPONENT},{MAX_EXPONENT}]")]
    ProductOverflow { lhs: Dimension, rhs: Dimension },

    #[error("{lhs} / {rhs}: dimension quotient out of range [{MIN_EXPONENT},{MAX_EXPONENT}]")]
    QuotientOverflow { lhs: Dimension, rhs: Dimension },

    #[error("Dimension::pow({dim}, {num}, {den}): illegal zero denominator")]
    ZeroDenominator { dim: Dimension, num: i32, den: i32 },

    #[error("Dimension::pow({dim}, {num}, {den}): cannot create dimension with fractional exponent(s)")]
    FractionalExponent { dim: Dimension, num: i32, den: i32 },
}

pub const MIN_EXPONENT: i32 = i8::MIN as i32;
pub const MAX_EXPONENT: i32 = i8::MAX as i32;

const LANE_BITS: usize = 8;
const LANE_MASK: u64 = 0xFF;

/// Every bit except the sign bit of each lane; carries out of a sign bit
/// are dropped instead of spilling into the neighbouring lane.
const CARRY: u64 = 0x7F7F_7F7F_7F7F_7F7F;

/// Exponent vector over the eight base magnitudes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Dimension(u64);

impl Dimension {
    /// Dimensionless.
    pub const NONE: Dimension = Dimension(0);
    pub const LENGTH: Dimension = Dimension::of(Magnitude::Length);
    pub const TIME: Dimension = Dimension::of(Magnitude::Time);
    pub const MASS: Dimension = Dimension::of(Magnitude::Mass);
    pub const TEMPERATURE: Dimension = Dimension::of(Magnitude::Temperature);
    pub const ELECTRIC_CURRENT: Dimension = Dimension::of(Magnitude::ElectricCurrent);
    pub const AMOUNT_OF_SUBSTANCE: Dimension = Dimension::of(Magnitude::AmountOfSubstance);
    pub const LUMINOUS_INTENSITY: Dimension = Dimension::of(Magnitude::LuminousIntensity);
    pub const OTHER: Dimension = Dimension::of(Magnitude::Other);
    pub const MONEY: Dimension = Dimension::OTHER;

    /// Unit exponent on a single magnitude.
    #[inline]
    pub const fn of(magnitude: Magnitude) -> Self {
        Dimension(1u64 << (magnitude.index() * LANE_BITS))
    }

    /// Pack exponents given in lane order.
    pub fn new(exponents: [i8; Magnitude::COUNT]) -> Self {
        let bits = exponents
            .iter()
            .enumerate()
            .fold(0u64, |acc, (lane, &e)| {
                acc | (u64::from(e.to_le_bytes()[0]) << (lane * LANE_BITS))
            });
        Dimension(bits)
    }

    /// Pack exponents, rejecting any outside `[-128, 127]`.
    pub fn try_from_exponents(exponents: [i32; Magnitude::COUNT]) -> Result<Self, DimensionError> {
        Magnitude::ALL
            .into_iter()
            .zip(exponents)
            .try_fold(Dimension::NONE, |dim, (magnitude, value)| {
                dim.with_exponent(magnitude, value)
            })
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Dimension(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Signed exponent of one magnitude.
    #[inline]
    pub fn exponent(self, magnitude: Magnitude) -> i8 {
        let byte = (self.0 >> (magnitude.index() * LANE_BITS)) & LANE_MASK;
        i8::from_le_bytes([byte.to_le_bytes()[0]])
    }

    /// Copy with one lane replaced; fails rather than truncating.
    pub fn with_exponent(self, magnitude: Magnitude, value: i32) -> Result<Self, DimensionError> {
        let exponent = i8::try_from(value)
            .map_err(|_| DimensionError::ExponentOutOfRange { magnitude, value })?;
        let shift = magnitude.index() * LANE_BITS;
        let cleared = self.0 & !(LANE_MASK << shift);
        Ok(Dimension(
            cleared | (u64::from(exponent.to_le_bytes()[0]) << shift),
        ))
    }

    pub fn exponents(self) -> [i8; Magnitude::COUNT] {
        Magnitude::ALL.map(|m| self.exponent(m))
    }

    /// Lane-wise exponent sum.
    pub fn checked_mul(self, rhs: Dimension) -> Result<Dimension, DimensionError> {
        let mut sum = self.0 ^ rhs.0;
        let mut carry = self.0 & rhs.0;
        let mut carried = 0u64;
        while carry != 0 {
            carried |= carry;
            carry = (carry & CARRY) << 1;
            let summed = sum;
            sum = summed ^ carry;
            carry &= summed;
        }
        if lane_overflow(carried) {
            return Err(DimensionError::ProductOverflow { lhs: self, rhs });
        }
        Ok(Dimension(sum))
    }

    /// Lane-wise exponent difference.
    pub fn checked_div(self, rhs: Dimension) -> Result<Dimension, DimensionError> {
        let mut difference = self.0 ^ rhs.0;
        let mut borrow = difference & rhs.0;
        let mut borrowed = 0u64;
        while borrow != 0 {
            borrowed |= borrow;
            borrow = (borrow & CARRY) << 1;
            difference ^= borrow;
            borrow &= difference;
        }
        if lane_overflow(borrowed) {
            return Err(DimensionError::QuotientOverflow { lhs: self, rhs });
        }
        Ok(Dimension(difference))
    }

    /// Raise to the rational power `num / den`.
    pub fn pow(self, num: i32, den: i32) -> Result<Dimension, DimensionError> {
        if den == 0 {
            return Err(DimensionError::ZeroDenominator { dim: self, num, den });
        }
        if num == 0 {
            return Ok(Dimension::NONE);
        }
        if num == den {
            return Ok(self);
        }
        let exponents = self.exponents().map(i32::from);
        let scaled = if num % den == 0 {
            exponents.map(|e| e.checked_mul(num / den))
        } else if exponents.iter().all(|e| e % den == 0) {
            exponents.map(|e| (e / den).checked_mul(num))
        } else {
            return Err(DimensionError::FractionalExponent { dim: self, num, den });
        };
        let mut result = Dimension::NONE;
        for (magnitude, value) in Magnitude::ALL.into_iter().zip(scaled) {
            let value = value.unwrap_or(i32::MAX);
            result = result.with_exponent(magnitude, value)?;
        }
        Ok(result)
    }

    #[inline]
    pub fn powi(self, num: i32) -> Result<Dimension, DimensionError> {
        self.pow(num, 1)
    }

    #[inline]
    pub fn sqrt(self) -> Result<Dimension, DimensionError> {
        self.pow(1, 2)
    }

    #[inline]
    pub fn cubrt(self) -> Result<Dimension, DimensionError> {
        self.pow(1, 3)
    }
}

/// True when some lane's carry into its sign bit differs from its carry out.
#[inline]
fn lane_overflow(carries: u64) -> bool {
    ((carries ^ (carries << 1)) & !CARRY) != 0
}

impl From<Magnitude> for Dimension {
    fn from(magnitude: Magnitude) -> Self {
        Dimension::of(magnitude)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("1");
        }
        for magnitude in Magnitude::ALL {
            match self.exponent(magnitude) {
                0 => {}
                1 => f.write_str(magnitude.symbol())?,
                e => write!(f, "{}{e}", magnitude.symbol())?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dimension({self})")
    }
}
