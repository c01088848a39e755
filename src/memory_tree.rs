//! In-memory UI tree
//!
//! Arena-backed [`UiTree`] implementation. Hosts that mirror their rendered
//! UI into the engine use it directly; the test suites build small trees
//! with it.

use std::collections::HashMap;

use crate::tree::{NodeId, NodeTag, UiTree};

#[derive(Debug)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tag: NodeTag,
    /// The node's own text, not including descendants
    text: String,
    component_id: Option<String>,
    visible: bool,
    boundary: bool,
}

/// Arena of nodes; `NodeId` is the index into it. The root is created on
/// construction and is always a structural boundary.
#[derive(Debug)]
pub struct MemoryTree {
    nodes: Vec<NodeData>,
    component_index: HashMap<String, NodeId>,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    pub fn new() -> Self {
        let root = NodeData {
            parent: None,
            children: Vec::new(),
            tag: NodeTag::Container,
            text: String::new(),
            component_id: None,
            visible: true,
            boundary: true,
        };
        Self {
            nodes: vec![root],
            component_index: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    /// Append a child under `parent`. New nodes start visible.
    pub fn add_node(&mut self, parent: NodeId, tag: NodeTag) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(NodeData {
            parent: Some(parent),
            children: Vec::new(),
            tag,
            text: String::new(),
            component_id: None,
            visible: true,
            boundary: false,
        });
        self.nodes[parent as usize].children.push(id);
        id
    }

    /// Append an addressable component child with a stable identifier.
    pub fn add_component(&mut self, parent: NodeId, tag: NodeTag, component_id: &str) -> NodeId {
        let id = self.add_node(parent, tag);
        self.set_component_id(id, component_id);
        id
    }

    /// Append a bare text child.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.add_node(parent, NodeTag::Text);
        self.nodes[id as usize].text = text.to_string();
        id
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node as usize].text = text.to_string();
    }

    pub fn set_component_id(&mut self, node: NodeId, component_id: &str) {
        if let Some(old) = self.nodes[node as usize].component_id.take() {
            self.component_index.remove(&old);
        }
        self.nodes[node as usize].component_id = Some(component_id.to_string());
        self.component_index.insert(component_id.to_string(), node);
    }

    /// Flag a node as a structural boundary the propagator must not cross.
    pub fn mark_boundary(&mut self, node: NodeId) {
        self.nodes[node as usize].boundary = true;
    }

    fn collect_text(&self, node: NodeId, out: &mut Vec<String>) {
        let data = &self.nodes[node as usize];
        if !data.text.is_empty() {
            out.push(data.text.clone());
        }
        for &child in &data.children {
            self.collect_text(child, out);
        }
    }
}

impl UiTree for MemoryTree {
    fn addressable_nodes(&self) -> Vec<NodeId> {
        (0..self.nodes.len() as NodeId)
            .filter(|&id| {
                let data = &self.nodes[id as usize];
                data.component_id.is_some()
                    && matches!(data.tag, NodeTag::Container | NodeTag::Button)
            })
            .collect()
    }

    fn node_by_component_id(&self, component_id: &str) -> Option<NodeId> {
        self.component_index.get(component_id).copied()
    }

    fn component_id(&self, node: NodeId) -> Option<String> {
        self.nodes[node as usize].component_id.clone()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node as usize].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node as usize].children.clone()
    }

    fn tag(&self, node: NodeId) -> NodeTag {
        self.nodes[node as usize].tag
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(node, &mut parts);
        parts.join(" ")
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.nodes[node as usize].visible
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        self.nodes[node as usize].visible = visible;
    }

    fn is_boundary(&self, node: NodeId) -> bool {
        self.nodes[node as usize].boundary
    }
}
