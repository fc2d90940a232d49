//! Registry catalogs.
//!
//! A catalog stores the units and scales of a finished compilation in
//! bincode so a later compilation can start from them. Only values survive;
//! seeding rebuilds literal code for them.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use metro_ir::{Registry, SeedError, SeedScale, SeedUnit, TargetLanguage};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub target: TargetLanguage,
    pub units: Vec<SeedUnit>,
    pub scales: Vec<SeedScale>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot access catalog `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog `{}` cannot be decoded: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("catalog was built for target `{found}`, this compilation targets `{expected}`")]
    TargetMismatch {
        expected: TargetLanguage,
        found: TargetLanguage,
    },

    #[error(transparent)]
    Seed(#[from] SeedError),
}

impl Catalog {
    /// Snapshot of everything registered in `registry`.
    pub fn from_registry(registry: &Registry) -> Self {
        Catalog {
            target: registry.target(),
            units: registry.export_units(),
            scales: registry.export_scales(),
        }
    }

    /// Add every unit, then every scale, to `registry`.
    pub fn seed(&self, registry: &mut Registry) -> Result<(), CatalogError> {
        if self.target != registry.target() {
            return Err(CatalogError::TargetMismatch {
                expected: registry.target(),
                found: self.target,
            });
        }
        for unit in &self.units {
            registry.seed_unit(unit.clone())?;
        }
        for scale in &self.scales {
            registry.seed_scale(scale.clone())?;
        }
        debug!(
            units = self.units.len(),
            scales = self.scales.len(),
            "seeded registry from catalog"
        );
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_owned(),
            source,
        })?;
        bincode::deserialize_from(BufReader::new(file)).map_err(|source| CatalogError::Encoding {
            path: path.to_owned(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), CatalogError> {
        let io_error = |source| CatalogError::Io {
            path: path.to_owned(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
        bincode::serialize_into(&mut writer, self).map_err(|source| CatalogError::Encoding {
            path: path.to_owned(),
            source,
        })?;
        writer.flush().map_err(io_error)
    }
}
