//! Session-layer configuration store
//!
//! Single writer of the three persisted session slots. Reads are
//! independently tolerant: a malformed slot logs a warning and falls back
//! to empty without touching the others. Writes are best-effort; a failed
//! write is logged and the in-memory state stays authoritative for the
//! rest of the session.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::record::Configuration;
use crate::constants::storage;
use crate::session::SessionStore;
use crate::target::Target;

pub struct ConfigStore<S> {
    session: S,
}

impl<S: SessionStore> ConfigStore<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// Read the file-backed record. Never fails; a bad file yields the
    /// empty configuration.
    pub fn load_file_defaults(path: &Path) -> Configuration {
        Configuration::load(path)
    }

    /// Unconditionally overwrite the three session slots with `config`.
    /// The file is authoritative at boot; call this exactly once per
    /// lifetime, before anything reads session state.
    pub fn bootstrap_session(&mut self, config: &Configuration) {
        self.write_slot(storage::KEY_TARGETS, &config.elements);
        self.write_slot(storage::KEY_PREFS, &config.prefs);
        self.write_slot(storage::KEY_ORDER, &config.order);
        info!(targets = config.elements.len(), "Session bootstrapped from file configuration");
    }

    pub fn read_targets(&self) -> Vec<Target> {
        self.read_slot(storage::KEY_TARGETS)
    }

    pub fn read_preferences(&self) -> HashMap<String, bool> {
        self.read_slot(storage::KEY_PREFS)
    }

    pub fn read_order(&self) -> Vec<String> {
        self.read_slot(storage::KEY_ORDER)
    }

    pub fn write_targets(&mut self, list: &[Target]) {
        self.write_slot(storage::KEY_TARGETS, &list);
    }

    pub fn write_preferences(&mut self, map: &HashMap<String, bool>) {
        self.write_slot(storage::KEY_PREFS, map);
    }

    pub fn write_order(&mut self, list: &[String]) {
        self.write_slot(storage::KEY_ORDER, &list);
    }

    /// Clear all three slots, forcing the next boot back to file defaults.
    pub fn reset_session(&mut self) {
        for key in [storage::KEY_TARGETS, storage::KEY_PREFS, storage::KEY_ORDER] {
            if let Err(e) = self.session.remove(key) {
                error!(key = %key, error = %e, "Failed to clear session slot");
            }
        }
        info!("Session slots cleared");
    }

    /// Gather the current session state back into the external record
    /// shape, for export.
    pub fn export_configuration(&self) -> Configuration {
        Configuration {
            elements: self.read_targets(),
            prefs: self.read_preferences(),
            order: self.read_order(),
        }
    }

    /// Pretty-printed JSON of the current session state.
    pub fn export_json(&self) -> anyhow::Result<String> {
        self.export_configuration().to_json_pretty()
    }

    fn read_slot<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.session.get(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Malformed session slot, falling back to empty");
                T::default()
            }
        }
    }

    fn write_slot<T: Serialize>(&mut self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                error!(key = %key, error = %e, "Failed to serialize session slot");
                return;
            }
        };
        if let Err(e) = self.session.set(key, &raw) {
            error!(key = %key, error = %e, "Failed to persist session slot");
        }
    }
}
