//! Element picker state machine
//!
//! Turns a pointer selection into a custom target definition. The pointer
//! capture the host front end installs is mirrored by `capture_active`:
//! every exit transition (selection, cancel, naming dialog dismissed,
//! menu closed) runs [`Picker::teardown`], so the host never leaks a
//! global listener past the pick it belongs to.

use tracing::debug;

use crate::constants::picker::SUGGESTED_NAME_MAX;
use crate::tree::{NodeId, UiTree};

/// Candidate captured from a pointer selection, pending a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub component_id: String,
    /// Name prefilled in the naming dialog, derived from the node's text
    pub suggested_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Idle,
    Picking,
    AwaitingName(Candidate),
}

/// Only one pick may be in flight; activating while one is active cancels
/// it first rather than stacking.
#[derive(Debug, Default)]
pub struct Picker {
    state: PickerState,
    capture_active: bool,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    /// Whether the host should currently have pointer capture installed.
    pub fn is_capturing(&self) -> bool {
        self.capture_active
    }

    /// Enter picking mode, cancelling any pick already in flight.
    pub fn activate(&mut self) {
        if self.state != PickerState::Idle {
            debug!("Picker re-activated mid-pick, cancelling the old one");
            self.teardown();
        }
        self.state = PickerState::Picking;
        self.capture_active = true;
    }

    /// Abandon the current pick, from any state.
    pub fn cancel(&mut self) {
        self.teardown();
    }

    /// Capture a pointer selection. Ignored unless picking; a node with no
    /// component id is ignored and the pick stays active. On success the
    /// pointer capture is released and the candidate awaits a name.
    pub fn pointer_select(&mut self, tree: &impl UiTree, node: NodeId) -> Option<&Candidate> {
        if self.state != PickerState::Picking {
            return None;
        }
        let Some(component_id) = tree.component_id(node) else {
            debug!(node = node, "Selected node has no component id, ignoring");
            return None;
        };

        let suggested_name = suggested_name(tree, node, &component_id);
        debug!(component_id = %component_id, suggested = %suggested_name, "Captured picker candidate");
        self.capture_active = false;
        self.state = PickerState::AwaitingName(Candidate {
            component_id,
            suggested_name,
        });
        match &self.state {
            PickerState::AwaitingName(candidate) => Some(candidate),
            _ => None,
        }
    }

    /// Resolve the naming dialog. An empty name cancels the pick. Returns
    /// the captured candidate for the caller to register; the machine is
    /// back at `Idle` either way.
    pub fn name_provided(&mut self, name: &str) -> Option<Candidate> {
        if !matches!(self.state, PickerState::AwaitingName(_)) {
            return None;
        }
        if name.trim().is_empty() {
            self.teardown();
            return None;
        }
        let PickerState::AwaitingName(candidate) =
            std::mem::replace(&mut self.state, PickerState::Idle)
        else {
            return None;
        };
        self.capture_active = false;
        Some(candidate)
    }

    /// The naming dialog was dismissed; discard the candidate.
    pub fn name_cancelled(&mut self) {
        if matches!(self.state, PickerState::AwaitingName(_)) {
            self.teardown();
        }
    }

    /// Release pointer capture and return to `Idle`. Safe from any state,
    /// any number of times.
    pub fn teardown(&mut self) {
        self.capture_active = false;
        self.state = PickerState::Idle;
    }
}

/// Default name for a picked node: its whitespace-collapsed text truncated
/// to [`SUGGESTED_NAME_MAX`] chars, or `Component <id>` when there is none.
fn suggested_name(tree: &impl UiTree, node: NodeId, component_id: &str) -> String {
    let text = tree.text_content(node);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return format!("Component {component_id}");
    }
    collapsed.chars().take(SUGGESTED_NAME_MAX).collect()
}
