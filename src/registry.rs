//! Target registry
//!
//! Holds the working ordered sequence of targets for the current session.
//! The config store is the single writer of persisted state; the working
//! copy here is transient and rebuilt from the store on every structural
//! change (add/remove/reorder) so the two can never diverge.

use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::record::Configuration;
use crate::config::store::ConfigStore;
use crate::session::SessionStore;
use crate::target::Target;

/// Errors surfaced by registry mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A target with this id already exists; the registry is unchanged.
    /// Never resolved by overwriting; callers disambiguate or reject.
    #[error("target id '{0}' already exists")]
    DuplicateId(String),
}

pub struct TargetRegistry<S: SessionStore> {
    store: ConfigStore<S>,
    /// Working copy in display order
    targets: Vec<Target>,
}

impl<S: SessionStore> TargetRegistry<S> {
    /// Build the working list from the store's current session state.
    pub fn from_store(store: ConfigStore<S>) -> Self {
        let mut registry = Self {
            store,
            targets: Vec::new(),
        };
        registry.rebuild();
        registry
    }

    /// Refresh the working copy from the session store: stored sequence,
    /// re-sorted by the persisted order when one exists.
    pub fn rebuild(&mut self) {
        let mut targets = self.store.read_targets();
        let order = self.store.read_order();
        apply_order(&mut targets, &order);
        self.targets = targets;
    }

    /// The targets in display order.
    pub fn list(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Append a target and persist. Rejects a colliding id and leaves
    /// both the registry and the persisted state unchanged.
    pub fn add(&mut self, target: Target) -> Result<(), RegistryError> {
        if self.get(&target.id).is_some() {
            return Err(RegistryError::DuplicateId(target.id));
        }
        info!(target_id = %target.id, name = %target.name, "Adding target");
        let mut stored = self.store.read_targets();
        stored.push(target);
        self.store.write_targets(&stored);
        self.rebuild();
        Ok(())
    }

    /// Update a target's display name. No-op for an empty or unchanged
    /// name; the id never changes.
    pub fn rename(&mut self, id: &str, new_name: &str) {
        if new_name.is_empty() {
            return;
        }
        let mut stored = self.store.read_targets();
        let Some(target) = stored.iter_mut().find(|t| t.id == id) else {
            return;
        };
        if target.name == new_name {
            return;
        }
        info!(target_id = %id, name = %new_name, "Renaming target");
        target.name = new_name.to_string();
        self.store.write_targets(&stored);
        if let Some(working) = self.targets.iter_mut().find(|t| t.id == id) {
            working.name = new_name.to_string();
        }
    }

    /// Update the default-visibility flag. Current preference and live
    /// visibility are separate, explicit operations and stay untouched.
    pub fn set_default(&mut self, id: &str, value: bool) {
        let mut stored = self.store.read_targets();
        let Some(target) = stored.iter_mut().find(|t| t.id == id) else {
            return;
        };
        target.default_visible = Some(value);
        self.store.write_targets(&stored);
        if let Some(working) = self.targets.iter_mut().find(|t| t.id == id) {
            working.default_visible = Some(value);
        }
    }

    /// Delete a target and persist. Order entries for other ids are left
    /// alone; a stale order id is treated as absent, not an error.
    pub fn remove(&mut self, id: &str) {
        let mut stored = self.store.read_targets();
        let before = stored.len();
        stored.retain(|t| t.id != id);
        if stored.len() == before {
            debug!(target_id = %id, "Remove of unknown target is a no-op");
            return;
        }
        info!(target_id = %id, "Removing target");
        self.store.write_targets(&stored);
        self.rebuild();
    }

    /// Move one entry within the display list and persist the re-derived
    /// order. No-op when the indices match or either is out of bounds.
    pub fn reorder(&mut self, from_index: usize, to_index: usize) {
        if from_index == to_index
            || from_index >= self.targets.len()
            || to_index >= self.targets.len()
        {
            return;
        }
        let target = self.targets.remove(from_index);
        self.targets.insert(to_index, target);

        let order: Vec<String> = self.targets.iter().map(|t| t.id.clone()).collect();
        self.store.write_order(&order);
        self.rebuild();
    }

    /// Record the user's visibility choice for a target.
    pub fn set_preference(&mut self, id: &str, visible: bool) {
        let mut prefs = self.store.read_preferences();
        prefs.insert(id.to_string(), visible);
        self.store.write_preferences(&prefs);
    }

    /// The visibility a target should currently have: stored preference
    /// first, then the target's default, then visible.
    pub fn effective_visibility(&self, id: &str) -> bool {
        if let Some(&visible) = self.store.read_preferences().get(id) {
            return visible;
        }
        self.get(id).map(Target::effective_default).unwrap_or(true)
    }

    /// Whether a target was added or renamed since the file record was
    /// imported at boot.
    pub fn differs_from_file(&self, id: &str, file_defaults: &Configuration) -> bool {
        let Some(current) = self.get(id) else {
            return false;
        };
        match file_defaults.elements.iter().find(|t| t.id == id) {
            None => true,
            Some(original) => original.name != current.name,
        }
    }

    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigStore<S> {
        &mut self.store
    }
}

/// Sort by the persisted order: listed ids first in that sequence, the
/// rest appended in stored order, stable. An empty order keeps the stored
/// sequence.
fn apply_order(targets: &mut [Target], order: &[String]) {
    if order.is_empty() {
        return;
    }
    let position: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index))
        .collect();
    targets.sort_by_key(|t| position.get(t.id.as_str()).copied().unwrap_or(usize::MAX));
}
