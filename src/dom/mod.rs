//! Page snapshot model
//!
//! This module provides the captured representation of a rendered page that
//! the salience pass runs over. It includes:
//! - ElementNode: nested element tree as produced by the extraction script
//! - PageSnapshot: flattened, indexed arena with parent links, document-order
//!   descendant enumeration and CSS paths
//! - Viewport: page viewport dimensions at capture time

pub mod element;
pub mod snapshot;

pub use element::{BoundingBox, ComputedStyle, ElementNode};
pub use snapshot::{NodeId, PageSnapshot, SnapshotNode, Viewport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_export() {
        let element = ElementNode::new("div");
        assert_eq!(element.tag_name, "div");
    }

    #[test]
    fn test_snapshot_export() {
        let snapshot = PageSnapshot::new(ElementNode::new("body"), Viewport::new(800.0, 600.0));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.node(snapshot.root()).tag_name, "body");
    }
}
