//! Application-wide constants
//!
//! Single source of truth for session slot names, walk limits and other
//! magic values used throughout the crate.

/// Session persistence slot keys
///
/// Three independent slots so that corruption in one never blocks the others.
pub mod storage {
    /// Slot holding the serialized target list
    pub const KEY_TARGETS: &str = "uiveil_custom";

    /// Slot holding the per-target visibility preference map
    pub const KEY_PREFS: &str = "uiveil_prefs";

    /// Slot holding the display order list
    pub const KEY_ORDER: &str = "uiveil_order";
}

/// Configuration file location
pub mod config {
    /// Directory under the user's config dir
    pub const APP_DIR: &str = "ui-veil";

    /// File name of the JSON configuration record
    pub const FILENAME: &str = "config.json";
}

/// Ancestor-walk limits for the visibility propagator
pub mod walk {
    /// Maximum ancestor levels a single hide/show walk may touch.
    /// Levels beyond the cap are left alone even if they become empty.
    pub const MAX_ANCESTOR_DEPTH: usize = 5;
}

/// Element picker behavior
pub mod picker {
    /// Maximum length (chars) of a name suggested from a node's text
    pub const SUGGESTED_NAME_MAX: usize = 50;
}
