//! File-backed configuration record
//!
//! JSON record read at boot and written on export:
//! `{ "elements": [...], "prefs": {...}, "order": [...] }`.
//! The file is the source of truth only at initialization; session state is
//! authoritative afterwards, until an explicit reset re-imports it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::target::Target;

/// The persisted unit: targets, per-target visibility preferences, and
/// display order. `order` entries that name no target are ignored, as are
/// `prefs` keys; stale ids are not errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub elements: Vec<Target>,

    #[serde(default)]
    pub prefs: HashMap<String, bool>,

    #[serde(default)]
    pub order: Vec<String>,
}

impl Configuration {
    /// Default record location under the user's config dir.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Read the record from `path`. Every failure falls back to the empty
    /// configuration; a missing or corrupt file must never block boot.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                info!(path = %path.display(), error = %e, "No configuration record, starting empty");
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded configuration record");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse configuration record, starting empty");
                Self::default()
            }
        }
    }

    /// Write the record to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = self.to_json_pretty()?;
        fs::write(path, contents)
            .context(format!("Failed to write configuration record to {}", path.display()))?;
        Ok(())
    }

    /// The record as pretty-printed JSON, for the host's export dialog.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize configuration record")
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.prefs.is_empty() && self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Selector;

    fn sample() -> Configuration {
        Configuration {
            elements: vec![
                Target {
                    id: "prompt".to_string(),
                    name: "Prompt Box".to_string(),
                    selector: Selector::Labels(vec!["Prompt".to_string()]),
                    is_custom: false,
                    default_visible: Some(true),
                },
                Target::custom(
                    "custom_notes".to_string(),
                    "Notes".to_string(),
                    "component-41".to_string(),
                ),
            ],
            prefs: HashMap::from([("prompt".to_string(), false)]),
            order: vec!["custom_notes".to_string(), "prompt".to_string()],
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration::load(&dir.path().join("absent.json"));
        assert!(config.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let config = Configuration::load(&path);
        assert!(config.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = sample();
        config.save(&path).unwrap();

        let loaded = Configuration::load(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let raw = r#"{"elements":[{"id":"a","name":"A","labels":["a"]}]}"#;
        let config: Configuration = serde_json::from_str(raw).unwrap();
        assert_eq!(config.elements.len(), 1);
        assert!(config.prefs.is_empty());
        assert!(config.order.is_empty());
    }

    #[test]
    fn test_export_json_has_external_field_names() {
        let json = sample().to_json_pretty().unwrap();
        assert!(json.contains("\"elements\""));
        assert!(json.contains("\"prefs\""));
        assert!(json.contains("\"order\""));
        assert!(json.contains("\"componentId\""));
        assert!(json.contains("\"isCustom\""));
    }
}
