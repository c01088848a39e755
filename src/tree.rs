//! Host UI-tree query surface
//!
//! The engine never creates or destroys nodes. It reads structure and text
//! through this capability and flips visibility through it, nothing else.
//! Hosts adapt their live tree behind the trait; tests substitute
//! [`crate::memory_tree::MemoryTree`].

/// Handle to a UI-tree node, stable for the lifetime of the node
pub type NodeId = u32;

/// Tag/category of a UI-tree node, used to decide whether it counts as a
/// layout-relevant child during ancestor collapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    Container,
    Button,
    Span,
    Input,
    Label,
    Form,
    Fieldset,
    /// Bare text content
    Text,
    Image,
    Other,
}

impl NodeTag {
    /// Whether a child with this tag participates in the "container is
    /// entirely empty" check. Text and decorative nodes do not.
    pub fn is_layout_relevant(self) -> bool {
        matches!(
            self,
            Self::Container
                | Self::Button
                | Self::Span
                | Self::Input
                | Self::Label
                | Self::Form
                | Self::Fieldset
        )
    }
}

/// Read/write capability over the host's rendered UI tree.
///
/// Injected rather than global so tests can substitute an in-memory fake.
/// The visibility setter is the only mutation the engine performs; the
/// collapsed-by-engine marker is bookkeeping inside the propagator and is
/// deliberately not part of this surface.
pub trait UiTree {
    /// Nodes recognized as addressable components, the scope label terms
    /// are matched against.
    fn addressable_nodes(&self) -> Vec<NodeId>;

    /// Look up a node by its stable component identifier.
    fn node_by_component_id(&self, component_id: &str) -> Option<NodeId>;

    /// The node's stable component identifier, if it has one.
    fn component_id(&self, node: NodeId) -> Option<String>;

    /// Parent node; `None` for the document root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Ordered child nodes.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn tag(&self, node: NodeId) -> NodeTag;

    /// Derived text content: the node's own text plus its descendants'.
    fn text_content(&self, node: NodeId) -> String;

    fn is_visible(&self, node: NodeId) -> bool;

    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// Structural boundary the propagator must never hide or walk past
    /// (the application's top-level container and the like).
    fn is_boundary(&self, node: NodeId) -> bool;
}
