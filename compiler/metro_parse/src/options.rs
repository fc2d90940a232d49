//! Compilation options.

use metro_ir::{Registry, TargetLanguage};

/// Settings that shape one compilation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Language of the code snippets carried by compiled expressions. It
    /// also decides which numeric types `unit<...>` accepts.
    pub target: TargetLanguage,
}

impl CompileOptions {
    pub fn new(target: TargetLanguage) -> Self {
        CompileOptions { target }
    }

    /// Empty registry for a compilation with these options.
    pub fn registry(&self) -> Registry {
        Registry::new(self.target)
    }
}
