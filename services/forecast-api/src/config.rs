//! Service configuration loading.
//!
//! Collections are configured through YAML files, one collection per file.
//! With no configuration directory present the service falls back to the
//! built-in demo collection so it always has something to serve.

use anyhow::{Context, Result};
use edr_core::CollectionConfig;
use std::path::Path;

/// The loaded service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Collections served by this instance, in load order.
    pub collections: Vec<CollectionConfig>,
}

impl ServiceConfig {
    /// Load all collection definitions from a directory of YAML files.
    ///
    /// A missing directory yields the demo configuration.
    pub fn load_from_dir(dir: &str) -> Result<Self> {
        let path = Path::new(dir);

        if !path.exists() {
            tracing::warn!(
                "collection config directory {} does not exist, using demo collection",
                dir
            );
            return Ok(Self::demo());
        }

        let mut entries: Vec<_> = std::fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", dir))?
            .collect::<std::io::Result<_>>()?;
        // Deterministic load order regardless of directory iteration order
        entries.sort_by_key(|e| e.path());

        let mut collections = Vec::new();
        for entry in entries {
            let file_path = entry.path();
            let is_yaml = file_path
                .extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false);
            if !is_yaml {
                continue;
            }

            let content = std::fs::read_to_string(&file_path)
                .with_context(|| format!("failed to read: {:?}", file_path))?;
            let collection: CollectionConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse: {:?}", file_path))?;

            tracing::info!(
                collection = %collection.id,
                file = ?file_path,
                "loaded collection config"
            );
            collections.push(collection);
        }

        if collections.is_empty() {
            tracing::warn!("no collection configs found in {}, using demo collection", dir);
            return Ok(Self::demo());
        }

        Ok(Self { collections })
    }

    /// The built-in demo configuration.
    pub fn demo() -> Self {
        Self {
            collections: vec![CollectionConfig::demo()],
        }
    }

    /// Find a collection by id.
    pub fn find_collection(&self, id: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.id == id)
    }
}
