//! Session persistence slots
//!
//! Browser-local style key/value storage the host supplies. Values are
//! opaque strings; the config store JSON-encodes what it puts in them.
//! Writes are best-effort: callers log a failure and keep their in-memory
//! state authoritative for the rest of the session.

use anyhow::Result;
use std::collections::HashMap;

/// Injected persistence capability for the three session slots.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory session store, for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemorySession {
    slots: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}
