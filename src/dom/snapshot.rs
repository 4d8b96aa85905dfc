use crate::dom::element::{BoundingBox, ComputedStyle, ElementNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a node within a [`PageSnapshot`] arena
pub type NodeId = usize;

/// Viewport dimensions at capture time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a new Viewport
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Total viewport area in px²
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A single element within a flattened snapshot
#[derive(Debug, Clone)]
pub struct SnapshotNode {
    pub tag_name: String,
    pub attributes: HashMap<String, String>,
    pub rect: BoundingBox,
    pub style: ComputedStyle,

    /// Selector for addressing the live element: `#id` when available,
    /// otherwise a structural nth-child path
    pub css_path: String,

    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SnapshotNode {
    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Short human-readable description, used in logs and chain output
    pub fn describe(&self) -> String {
        match self.id() {
            Some(id) => format!("{}#{}", self.tag_name, id),
            None => self.tag_name.clone(),
        }
    }
}

/// Raw payload produced by the extraction script
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    viewport: Viewport,
    root: ElementNode,
}

/// An immutable, flattened snapshot of a rendered page
///
/// Built once per capture; the salience pass only reads it, so enumeration
/// can never observe a partially mutated tree.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    nodes: Vec<SnapshotNode>,
    viewport: Viewport,
}

impl PageSnapshot {
    /// Flatten a captured element tree into an indexed arena
    ///
    /// Nodes are stored in document (pre-order) order, so ascending NodeId
    /// is also descendant-enumeration order.
    pub fn new(root: ElementNode, viewport: Viewport) -> Self {
        let mut snapshot = Self { nodes: Vec::new(), viewport };
        snapshot.flatten(root, None, None);
        snapshot
    }

    /// Parse the JSON string returned by the extraction script
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Ok(Self::new(raw.root, raw.viewport))
    }

    fn flatten(
        &mut self,
        node: ElementNode,
        parent: Option<NodeId>,
        structural_path: Option<String>,
    ) -> NodeId {
        let ElementNode { tag_name, attributes, rect, style, nth, children } = node;

        // Structural path chains through the parent regardless of ids, the
        // way nth-child paths are built for live lookup
        let structural = match &structural_path {
            Some(parent_path) => {
                let position = nth.unwrap_or_else(|| self.sibling_position(parent));
                format!("{} > {}:nth-child({})", parent_path, tag_name, position)
            }
            None => tag_name.clone(),
        };

        // Prefer an id selector when the element has one
        let css_path = match attributes.get("id") {
            Some(id) if !id.is_empty() => format!("#{}", id),
            _ => structural.clone(),
        };

        let id = self.nodes.len();
        self.nodes.push(SnapshotNode {
            tag_name,
            attributes,
            rect,
            style,
            css_path,
            parent,
            children: Vec::new(),
        });

        for child in children {
            let child_id = self.flatten(child, Some(id), Some(structural.clone()));
            self.nodes[id].children.push(child_id);
        }

        id
    }

    /// 1-based position the next child of `parent` will occupy
    fn sibling_position(&self, parent: Option<NodeId>) -> usize {
        match parent {
            Some(p) => self.nodes[p].children.len() + 1,
            None => 1,
        }
    }

    /// Root node of the snapshot
    pub fn root(&self) -> NodeId {
        0
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> &SnapshotNode {
        &self.nodes[id]
    }

    /// Parent of a node, None at the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// All descendants of `id` (excluding `id` itself) in document order
    pub fn descendants_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            result.push(current);
            for &child in self.nodes[current].children.iter().rev() {
                stack.push(child);
            }
        }

        result
    }

    /// Viewport dimensions at capture time
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Total number of nodes in the snapshot
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the snapshot contains no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
