//! Parser tests.
//!
//! - `unit`: unit statements, binding and families
//! - `scale`: scale statements and their offsets
//! - `recovery`: error reporting and resynchronization

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod recovery;
mod scale;

use metro_diagnostic::ErrorCode;
use metro_ir::{MeasureId, Registry, TargetLanguage};

use crate::{compile, CancellationToken, CompileOptions, ParseOutput};

fn compile_with(target: TargetLanguage, source: &str) -> (Registry, ParseOutput) {
    let compilation = compile(
        source,
        &CompileOptions::new(target),
        &CancellationToken::new(),
    );
    (compilation.registry, compilation.output)
}

fn compile_cs(source: &str) -> (Registry, ParseOutput) {
    compile_with(TargetLanguage::CSharp, source)
}

/// Compile text that must be free of errors.
fn compile_ok(source: &str) -> Registry {
    let (registry, output) = compile_cs(source);
    assert!(output.is_success(), "unexpected errors: {:#?}", output.errors);
    registry
}

fn unit_id(registry: &Registry, name: &str) -> MeasureId {
    registry
        .find_unit(name)
        .unwrap_or_else(|| panic!("unit {name} is not registered"))
}

fn codes(output: &ParseOutput) -> Vec<ErrorCode> {
    output.errors.iter().map(|e| e.code).collect()
}

fn messages(output: &ParseOutput) -> Vec<&str> {
    output.errors.iter().map(|e| e.message.as_str()).collect()
}
