//! Content factory for building combat sessions from data files.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, CombatSession, EffectCatalog};

use crate::loaders::{ConfigLoader, EffectLoader, LoadResult};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── effects.ron
/// ```
///
/// Both files are optional; a missing file means built-in defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Build the effect catalog from `effects.ron` over the built-in kinds.
    pub fn load_catalog(&self) -> LoadResult<EffectCatalog> {
        let path = self.data_dir.join("effects.ron");
        if !path.exists() {
            tracing::debug!("No effect table at {}, using built-ins", path.display());
            return Ok(EffectCatalog::standard());
        }
        EffectLoader::load(&path)?.build_catalog()
    }

    /// Fresh session for one fight.
    pub fn new_session(&self) -> LoadResult<CombatSession> {
        Ok(CombatSession::new(self.load_catalog()?, self.load_config()?))
    }
}
