//! Store configuration
//!
//! Loaded from an optional JSON file; anything missing or unreadable falls
//! back to defaults.

use card_model::builtin::DEFAULT_TEMPLATE_ID;
use card_model::TemplateId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Template store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Key the template collection is saved under
    pub storage_key: String,
    /// Template shown when a requested id cannot be found
    pub default_template_id: TemplateId,
    /// Save to the persistence port after every write
    pub persist_on_write: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "card-templates".to_string(),
            default_template_id: TemplateId::new(DEFAULT_TEMPLATE_ID),
            persist_on_write: true,
        }
    }
}

impl StoreConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_default_template(mut self, id: impl Into<TemplateId>) -> Self {
        self.default_template_id = id.into();
        self
    }

    /// Load settings from a JSON file, or return defaults if it doesn't exist
    /// or cannot be parsed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<StoreConfig>(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse store config, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read store config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "card-templates");
        assert_eq!(config.default_template_id.as_str(), "classic");
        assert!(config.persist_on_write);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"storageKey":"cards-v2"}"#).unwrap();

        let config = StoreConfig::load_or_default(&path);
        assert_eq!(config.storage_key, "cards-v2");
        assert_eq!(config.default_template_id.as_str(), "classic");
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(StoreConfig::load_or_default(&path), StoreConfig::default());
        assert_eq!(
            StoreConfig::load_or_default(dir.path().join("missing.json")),
            StoreConfig::default()
        );
    }
}
