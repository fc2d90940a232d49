//! Named type descriptors shared by numeric types, units and scales.

use std::fmt;

/// A name as written in definitions and as emitted for the target language.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// Name used in definition text.
    pub source: String,
    /// Name used in generated code.
    pub target: String,
    /// Fully qualified built-in type; present only for predefined numeric types.
    pub typename: Option<String>,
}

impl Term {
    /// A user-defined measure: same name on both sides.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Term {
            source: name.clone(),
            target: name,
            typename: None,
        }
    }

    pub fn predefined(
        source: impl Into<String>,
        target: impl Into<String>,
        typename: impl Into<String>,
    ) -> Self {
        Term {
            source: source.into(),
            target: target.into(),
            typename: Some(typename.into()),
        }
    }

    #[inline]
    pub fn is_predefined(&self) -> bool {
        self.typename.is_some()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target)
    }
}
