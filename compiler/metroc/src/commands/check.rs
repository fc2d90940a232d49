//! The `check` command: compile definition files and report diagnostics.
//!
//! Files are independent of each other. Each one is compiled into its own
//! registry (seeded from `--seed` when given), so they are checked in
//! parallel and reported in command-line order afterwards.

use std::io::IsTerminal;
use std::path::Path;

use metro_diagnostic::emitter::{DiagnosticEmitter, SourceFile, TerminalEmitter};
use metro_diagnostic::Diagnostic;
use metro_ir::Registry;
use metro_parse::{CancellationToken, ParseOutput};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::read_file;
use crate::catalog::{Catalog, CatalogError};
use crate::config::Config;

/// Outcome of compiling one definition file.
#[derive(Debug)]
pub struct FileReport {
    pub path: String,
    pub source: String,
    pub registry: Registry,
    pub output: ParseOutput,
}

impl FileReport {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.output
            .errors
            .iter()
            .map(metro_parse::ParseError::to_diagnostic)
            .collect()
    }
}

/// Compile `source` into a fresh registry, seeded from `seed` first.
pub fn check_source(
    path: &str,
    source: String,
    config: &Config,
    seed: Option<&Catalog>,
    cancel: &CancellationToken,
) -> Result<FileReport, CatalogError> {
    let mut registry = config.compile_options().registry();
    if let Some(catalog) = seed {
        catalog.seed(&mut registry)?;
    }
    let output = metro_parse::parse(&source, &mut registry, cancel);
    debug!(
        path,
        definitions = output.definitions.len(),
        errors = output.errors.len(),
        "checked file"
    );
    Ok(FileReport {
        path: path.to_owned(),
        source,
        registry,
        output,
    })
}

/// Check every input file; the exit code is 1 if anything failed.
pub fn check_files(config: &Config) -> i32 {
    let seed = match config.seed.as_deref().map(Catalog::read).transpose() {
        Ok(seed) => seed,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    let cancel = CancellationToken::new();

    let check = |path: &String| -> Result<FileReport, String> {
        let source = read_file(path)?;
        check_source(path, source, config, seed.as_ref(), &cancel).map_err(|err| err.to_string())
    };

    let reports: Vec<Result<FileReport, String>> = rayon::ThreadPoolBuilder::new()
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| config.inputs.par_iter().map(check).collect())
        })
        .unwrap_or_else(|e| {
            warn!("failed to create thread pool ({e}), checking sequentially");
            config.inputs.iter().map(check).collect()
        });

    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(config.color, is_tty);
    let mut error_count = 0;
    let mut passed = Vec::new();

    for report in reports {
        let report = match report {
            Ok(report) => report,
            Err(message) => {
                eprintln!("error: {message}");
                error_count += 1;
                continue;
            }
        };
        let diagnostics = report.diagnostics();
        if diagnostics.is_empty() {
            println!(
                "OK: {} ({} units, {} scales)",
                report.path,
                report.registry.unit_count(),
                report.registry.scale_count()
            );
            passed.push(report);
        } else {
            error_count += diagnostics.len();
            emitter.set_source(SourceFile::new(report.path.as_str(), report.source.as_str()));
            emitter.emit_all(&diagnostics);
        }
    }
    emitter.emit_summary(error_count);
    emitter.flush();

    if error_count > 0 {
        return 1;
    }
    if let (Some(out), [report]) = (config.emit_catalog.as_deref(), passed.as_slice()) {
        if let Err(err) = write_catalog(&report.registry, out) {
            eprintln!("error: {err}");
            return 1;
        }
    }
    0
}

fn write_catalog(registry: &Registry, out: &Path) -> Result<(), CatalogError> {
    let catalog = Catalog::from_registry(registry);
    catalog.write(out)?;
    debug!(
        path = %out.display(),
        units = catalog.units.len(),
        scales = catalog.scales.len(),
        "wrote catalog"
    );
    Ok(())
}
