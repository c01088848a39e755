//! Engine facade
//!
//! Wires the layered configuration, registry, resolver and propagator over
//! an injected UI tree and session store, and routes the discrete user
//! interactions to them. Everything here runs synchronously on the host's
//! event thread; no two mutations can interleave.

use std::path::Path;
use tracing::{debug, info};

use crate::config::record::Configuration;
use crate::config::store::ConfigStore;
use crate::picker::{Candidate, Picker};
use crate::propagator::VisibilityPropagator;
use crate::registry::{RegistryError, TargetRegistry};
use crate::resolver;
use crate::session::SessionStore;
use crate::target::Target;
use crate::tree::{NodeId, UiTree};

pub struct ToggleEngine<T: UiTree, S: SessionStore> {
    tree: T,
    registry: TargetRegistry<S>,
    propagator: VisibilityPropagator,
    picker: Picker,
    /// Record imported at boot, kept for modification checks and reset
    file_defaults: Configuration,
}

impl<T: UiTree, S: SessionStore> ToggleEngine<T, S> {
    /// Boot the engine: overwrite the session slots with the file record,
    /// build the ordered target list, and apply every target's effective
    /// visibility. Never fails: a partial configuration always beats a
    /// blocked UI.
    pub fn bootstrap(tree: T, session: S, file_defaults: Configuration) -> Self {
        let mut store = ConfigStore::new(session);
        store.bootstrap_session(&file_defaults);
        let registry = TargetRegistry::from_store(store);

        let mut engine = Self {
            tree,
            registry,
            propagator: VisibilityPropagator::new(),
            picker: Picker::new(),
            file_defaults,
        };
        info!(targets = engine.registry.list().len(), "Engine bootstrapped");
        engine.apply_all();
        engine
    }

    /// Boot from the configuration record at `path`. A missing or corrupt
    /// record boots an empty engine rather than failing.
    pub fn bootstrap_from_path(tree: T, session: S, path: &Path) -> Self {
        let file_defaults = ConfigStore::<S>::load_file_defaults(path);
        Self::bootstrap(tree, session, file_defaults)
    }

    /// Re-resolve every target and apply its effective visibility.
    /// Idempotent, so a host's periodic re-initialization retries are safe.
    pub fn apply_all(&mut self) {
        let plan: Vec<(String, bool)> = self
            .registry
            .list()
            .iter()
            .map(|t| (t.id.clone(), self.registry.effective_visibility(&t.id)))
            .collect();
        for (id, visible) in plan {
            self.apply_target(&id, visible);
        }
    }

    /// Record a checkbox toggle and apply it to the live tree.
    pub fn set_preference(&mut self, id: &str, visible: bool) {
        self.registry.set_preference(id, visible);
        self.apply_target(id, visible);
    }

    /// Restore every target to its default visibility, recording the
    /// defaults as the new preferences.
    pub fn show_defaults(&mut self) {
        let plan: Vec<(String, bool)> = self
            .registry
            .list()
            .iter()
            .map(|t| (t.id.clone(), t.effective_default()))
            .collect();
        for (id, visible) in plan {
            self.registry.set_preference(&id, visible);
            self.apply_target(&id, visible);
        }
    }

    /// Show or hide every target at once.
    pub fn set_all(&mut self, visible: bool) {
        let ids: Vec<String> = self.registry.list().iter().map(|t| t.id.clone()).collect();
        for id in ids {
            self.registry.set_preference(&id, visible);
            self.apply_target(&id, visible);
        }
    }

    pub fn rename(&mut self, id: &str, new_name: &str) {
        self.registry.rename(id, new_name);
    }

    pub fn set_default(&mut self, id: &str, value: bool) {
        self.registry.set_default(id, value);
    }

    /// Delete a target. Live visibility is left as-is; the region simply
    /// stops being toggleable.
    pub fn remove(&mut self, id: &str) {
        self.registry.remove(id);
    }

    pub fn reorder(&mut self, from_index: usize, to_index: usize) {
        self.registry.reorder(from_index, to_index);
    }

    /// Register a target and apply its effective visibility.
    pub fn add_target(&mut self, target: Target) -> Result<(), RegistryError> {
        let id = target.id.clone();
        self.registry.add(target)?;
        let visible = self.registry.effective_visibility(&id);
        self.apply_target(&id, visible);
        Ok(())
    }

    // --- picker events -------------------------------------------------

    pub fn picker_activate(&mut self) {
        self.picker.activate();
    }

    pub fn picker_cancel(&mut self) {
        self.picker.cancel();
    }

    pub fn picker_name_cancelled(&mut self) {
        self.picker.name_cancelled();
    }

    /// Pointer selection while picking. Returns the captured candidate so
    /// the host can open its naming dialog prefilled.
    pub fn picker_select(&mut self, node: NodeId) -> Option<Candidate> {
        self.picker.pointer_select(&self.tree, node).cloned()
    }

    /// Name confirmed: build the custom target, disambiguate its derived
    /// id against the registry, add it and apply its default visibility.
    /// Returns the new target's id, or `None` when there was nothing to
    /// confirm (no candidate, or an empty name cancelling the pick).
    pub fn picker_confirm(&mut self, name: &str) -> Result<Option<String>, RegistryError> {
        let Some(candidate) = self.picker.name_provided(name) else {
            return Ok(None);
        };
        let id = Target::derive_unique_id(name, |id| self.registry.get(id).is_some());
        let target = Target::custom(id.clone(), name.to_string(), candidate.component_id);
        self.add_target(target)?;
        info!(target_id = %id, "Custom target added from picker");
        Ok(Some(id))
    }

    // --- configuration lifecycle --------------------------------------

    /// Clear the session slots and empty the working list. The next boot
    /// falls back to the file record.
    pub fn reset_session(&mut self) {
        self.registry.store_mut().reset_session();
        self.registry.rebuild();
    }

    /// Current session state in the external record shape.
    pub fn export_configuration(&self) -> Configuration {
        self.registry.store().export_configuration()
    }

    /// Pretty-printed JSON of the current session state, for the host's
    /// export dialog.
    pub fn export_json(&self) -> anyhow::Result<String> {
        self.registry.store().export_json()
    }

    /// Whether a target was added or renamed since boot.
    pub fn differs_from_file(&self, id: &str) -> bool {
        self.registry.differs_from_file(id, &self.file_defaults)
    }

    // --- accessors -----------------------------------------------------

    pub fn registry(&self) -> &TargetRegistry<S> {
        &self.registry
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    fn apply_target(&mut self, id: &str, visible: bool) {
        let Some(target) = self.registry.get(id) else {
            debug!(target_id = %id, "Unknown target, nothing to apply");
            return;
        };
        let nodes = resolver::resolve(&self.tree, target);
        if nodes.is_empty() {
            // Normal: the target may refer to UI that is not rendered
            debug!(target_id = %id, "Target resolved no nodes");
            return;
        }
        debug!(target_id = %id, nodes = nodes.len(), visible = visible, "Applying target visibility");
        for node in nodes {
            self.propagator.apply(&mut self.tree, node, visible);
        }
    }
}
