use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use taxon_gallery::ImageKeys;
use taxon_indexer::DEFAULT_MAX_DEPTH;
use taxon_query::SearchOptions;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Deepest nesting any record walk accepts
    pub max_depth: usize,

    /// Top-level key whose value labels a record in hits and images
    pub label_key: Option<String>,

    pub images: ImageKeys,

    pub search: SearchDefaults,

    pub completeness: CompletenessDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            label_key: None,
            images: ImageKeys::default(),
            search: SearchDefaults::default(),
            completeness: CompletenessDefaults::default(),
        }
    }
}

/// Defaults for ad hoc searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchDefaults {
    pub search_keys: bool,
    pub search_values: bool,
    pub max_results: usize,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            search_keys: true,
            search_values: true,
            max_results: 20,
        }
    }
}

impl SearchDefaults {
    #[must_use]
    pub const fn options(&self) -> SearchOptions {
        SearchOptions {
            search_keys: self.search_keys,
            search_values: self.search_values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletenessDefaults {
    /// Rows shown by `Engine::top_completeness`
    pub top_k: usize,
}

impl Default for CompletenessDefaults {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}

impl EngineConfig {
    /// Read a JSON or TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("Invalid engine config in {}", path.display()))
    }

    /// Parse JSON, falling back to TOML, then validate
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let config: Self = match serde_json::from_slice(bytes) {
            Ok(config) => config,
            Err(json_err) => {
                let utf8 =
                    std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    anyhow!("Config is not valid JSON ({json_err}) or TOML ({toml_err})")
                })?
            }
        };

        if let Err(msg) = config.validate() {
            bail!("{msg}");
        }
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be > 0".to_string());
        }

        if self.search.max_results == 0 {
            return Err("search.max_results must be > 0".to_string());
        }

        if self
            .label_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            return Err("label_key must not be blank".to_string());
        }

        self.images
            .validate()
            .map_err(|err| format!("images: {err}"))?;

        Ok(())
    }
}
