//! Metro compiler driver.
//!
//! Reads definition files, runs them through the front end and reports the
//! outcome. Everything the binary does is reachable from here, so commands
//! can be exercised from tests.
//!
//! # Debugging
//!
//! - `RUST_LOG=metro_parse=debug`: one event per parsed statement.
//! - `RUST_LOG=metro_ir=trace`: registry and binding detail.

pub mod catalog;
pub mod commands;
pub mod config;

use std::sync::Once;

pub use catalog::{Catalog, CatalogError};
pub use config::{Command, Config, ConfigError};

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call counts.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}
