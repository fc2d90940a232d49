//! Debug commands: `lex` and `parse` for inspecting compiler internals.

use metro_parse::CancellationToken;

use super::{check_source, read_file};
use crate::catalog::Catalog;
use crate::config::Config;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) -> i32 {
    let content = match read_file(path) {
        Ok(content) => content,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };
    let tokens = metro_lexer::lex(&content);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in tokens.iter() {
        println!(
            "  {:?} @ {} {:?}",
            token.kind,
            token.position,
            token.text(&content)
        );
    }
    0
}

/// Parse a file and display the registry it produced.
pub fn parse_file(path: &str, config: &Config) -> i32 {
    let seed = match config.seed.as_deref().map(Catalog::read).transpose() {
        Ok(seed) => seed,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    let report = match read_file(path).and_then(|content| {
        check_source(path, content, config, seed.as_ref(), &CancellationToken::new())
            .map_err(|err| err.to_string())
    }) {
        Ok(report) => report,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };
    let registry = &report.registry;

    println!("Parse result for '{path}':");
    println!("  Units: {}", registry.unit_count());
    println!("  Scales: {}", registry.scale_count());
    println!(
        "  Families: {}",
        registry.family_count(registry.unit_ids().iter().chain(registry.scale_ids()).copied())
    );
    println!("  Errors: {}", report.output.errors.len());

    if registry.unit_count() > 0 {
        println!();
        println!("Units:");
        for (id, _, unit) in registry.units() {
            println!("  {}", registry.display_unit(id));
            for operation in &unit.fellow_operations {
                println!("    {}", registry.display_operation(operation));
            }
        }
    }

    if registry.scale_count() > 0 {
        println!();
        println!("Scales:");
        for (id, _, _) in registry.scales() {
            println!("  {}", registry.display_scale(id));
        }
    }

    if report.output.has_errors() {
        println!();
        println!("Errors:");
        for error in &report.output.errors {
            println!("  {} [{}]", error, error.code);
        }
        return 1;
    }
    0
}
