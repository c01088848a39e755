#![forbid(unsafe_code)]

//! Selectively hide or show regions of an already-rendered UI tree without
//! breaking the surrounding layout, and persist those choices.
//!
//! The host application renders the tree and assigns stable component
//! identifiers; this crate resolves user-declared targets to live nodes,
//! toggles them while safely collapsing ancestors that become entirely
//! empty, and keeps a layered configuration: file-sourced defaults at
//! boot, session-local overrides afterwards.
//!
//! [`engine::ToggleEngine`] is the entry point; it is generic over the
//! injected [`tree::UiTree`] and [`session::SessionStore`] capabilities.

pub mod config;
pub mod constants;
pub mod engine;
pub mod memory_tree;
pub mod picker;
pub mod propagator;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod target;
pub mod tree;

pub use config::{ConfigStore, Configuration};
pub use engine::ToggleEngine;
pub use memory_tree::MemoryTree;
pub use picker::{Candidate, Picker, PickerState};
pub use propagator::VisibilityPropagator;
pub use registry::{RegistryError, TargetRegistry};
pub use session::{MemorySession, SessionStore};
pub use target::{Selector, Target};
pub use tree::{NodeId, NodeTag, UiTree};
