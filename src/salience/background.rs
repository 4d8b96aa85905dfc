use crate::dom::{NodeId, PageSnapshot};
use crate::salience::color::Rgba;

/// Resolve the effective background color behind a node
///
/// Walks from the node up its ancestor chain and returns the first
/// background color with non-zero alpha. A fully transparent chain resolves
/// to opaque white. This is a proxy for CSS background compositing, not a
/// real alpha blend: the first non-transparent ancestor wins outright.
pub fn resolve_background(snapshot: &PageSnapshot, node: NodeId) -> Rgba {
    let mut current = Some(node);

    while let Some(id) = current {
        let style = &snapshot.node(id).style;
        let background = Rgba::parse_or(&style.background_color, Rgba::TRANSPARENT);
        if !background.is_transparent() {
            return background;
        }
        current = snapshot.parent(id);
    }

    Rgba::WHITE
}
