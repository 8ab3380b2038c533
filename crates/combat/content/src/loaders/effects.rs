//! Effect definition loader.

use std::path::Path;

use combat_core::{EffectCatalog, EffectDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Effect table structure for RON files.
///
/// Example:
/// ```ron
/// (
///     effects: [
///         (kind: Custom(1), class: Dot, stackable: true, max_stack: 20, default_duration: 2),
///         (kind: Weak, class: Debuff, default_duration: 2,
///          modifier: Some(IncomingScale((numerator: 1, denominator: 2)))),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectTable {
    pub effects: Vec<EffectDefinition>,
}

impl EffectTable {
    /// Builds a catalog of the built-in kinds overlaid with this table.
    ///
    /// Entries for built-in kinds replace them in place (keeping pipeline
    /// order); new kinds are appended. A kind listed twice is an error.
    pub fn build_catalog(&self) -> LoadResult<EffectCatalog> {
        let mut builder = EffectCatalog::builder().with_standard();
        let mut seen = Vec::with_capacity(self.effects.len());

        for definition in &self.effects {
            if seen.contains(&definition.kind) {
                anyhow::bail!("Effect kind {} is listed more than once", definition.kind);
            }
            seen.push(definition.kind);

            builder = builder
                .register_or_replace(*definition)
                .map_err(|e| anyhow::anyhow!("Invalid effect definition: {}", e))?;
        }

        let catalog = builder.build();
        tracing::debug!(
            "Built effect catalog with {} kinds ({} from content)",
            catalog.len(),
            self.effects.len()
        );
        Ok(catalog)
    }
}

/// Loader for effect tables from RON files.
pub struct EffectLoader;

impl EffectLoader {
    /// Load an effect table from a RON file.
    pub fn load(path: &Path) -> LoadResult<EffectTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EffectTable> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse effect table RON: {}", e))
    }
}
