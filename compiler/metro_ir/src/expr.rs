//! Compiled expressions.
//!
//! Compiling a definition subtree yields a [`DimExpr`] for its dimension and a
//! [`NumExpr`] for its numeric value. Both keep two renderings of the code
//! that computes them: `simple` refers to other units by their properties
//! (`Meter.Factor`), `unfolded` is spelled with literals only.

use std::fmt;

use crate::{Dimension, NumericType};

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimExpr {
    pub value: Dimension,
    pub simple: String,
    pub unfolded: String,
}

impl DimExpr {
    /// Both renderings equal to `code`.
    pub fn new(value: Dimension, code: impl Into<String>) -> Self {
        let code = code.into();
        DimExpr {
            value,
            unfolded: code.clone(),
            simple: code,
        }
    }

    pub fn with_unfolded(
        value: Dimension,
        simple: impl Into<String>,
        unfolded: impl Into<String>,
    ) -> Self {
        DimExpr {
            value,
            simple: simple.into(),
            unfolded: unfolded.into(),
        }
    }
}

impl fmt::Display for DimExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumExpr {
    /// False when `value` is a placeholder (an opaque external constant).
    pub is_real: bool,
    pub value: f64,
    pub simple: String,
    pub unfolded: String,
}

impl NumExpr {
    pub fn new(is_real: bool, value: f64, code: impl Into<String>) -> Self {
        let code = code.into();
        NumExpr {
            is_real,
            value,
            unfolded: code.clone(),
            simple: code,
        }
    }

    pub fn with_unfolded(
        is_real: bool,
        value: f64,
        simple: impl Into<String>,
        unfolded: impl Into<String>,
    ) -> Self {
        NumExpr {
            is_real,
            value,
            simple: simple.into(),
            unfolded: unfolded.into(),
        }
    }

    /// Exact value comparison; alternatives must agree bit for bit.
    #[inline]
    #[allow(clippy::float_cmp, reason = "factors are compared exactly")]
    pub fn value_equals(&self, other: &NumExpr) -> bool {
        self.value == other.value
    }

    /// Shortest round-trip rendering of the value.
    pub fn precise(&self, numeric: NumericType) -> String {
        numeric.format_general(self.value)
    }

    /// Value if real, otherwise the simple code.
    pub fn display(&self, numeric: NumericType) -> String {
        if self.is_real {
            self.precise(numeric)
        } else {
            self.simple.clone()
        }
    }
}
