use serde::{Deserialize, Serialize};

/// How a target denotes its UI nodes: a list of label search terms, or one
/// explicit component identifier. Exactly one is set; the variant carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// Label search terms, matched case-insensitively as substrings of a
    /// node's text content
    #[serde(rename = "labels")]
    Labels(Vec<String>),

    /// Stable identifier of a single component node
    #[serde(rename = "componentId")]
    ComponentId(String),
}

/// A logical, user-named visibility unit bound to one or more live UI nodes.
///
/// Serialized field names match the external configuration record
/// (`labels`/`componentId`, `isCustom`, `default`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Stable identifier, unique within the registry
    pub id: String,

    /// Display label, user-editable
    pub name: String,

    #[serde(flatten)]
    pub selector: Selector,

    /// True for user-added targets
    #[serde(default, rename = "isCustom")]
    pub is_custom: bool,

    /// Visibility applied by "show defaults"; absent means visible
    #[serde(
        default,
        rename = "default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_visible: Option<bool>,
}

impl Target {
    /// Build the custom target the element picker produces: bound to one
    /// component id, user-added, visible by default.
    pub fn custom(id: String, name: String, component_id: String) -> Self {
        Self {
            id,
            name,
            selector: Selector::ComponentId(component_id),
            is_custom: true,
            default_visible: Some(true),
        }
    }

    /// Visibility applied by "show defaults". Absent means visible; every
    /// component defers here instead of re-reading the raw field.
    pub fn effective_default(&self) -> bool {
        self.default_visible.unwrap_or(true)
    }

    /// Derive a stable id from a user-provided name: `custom_` plus the
    /// lowercased name with every char outside `[a-z0-9]` mapped to `_`.
    pub fn derive_id(name: &str) -> String {
        let slug: String = name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("custom_{slug}")
    }

    /// Derive an id that does not collide with any taken id, suffixing
    /// `_2`, `_3`, ... until a free one is found.
    pub fn derive_unique_id(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
        let base = Self::derive_id(name);
        if !is_taken(&base) {
            return base;
        }
        let mut n: u32 = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if !is_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
