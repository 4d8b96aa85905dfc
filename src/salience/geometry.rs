use crate::dom::{NodeId, PageSnapshot};

/// Total area a node occupies on screen, in px²
///
/// Content box plus margins on both axes. Margins are read from computed
/// style text and truncated to whole pixels, matching how the live system
/// has always read them; sub-pixel margins are intentionally dropped.
pub fn total_area(snapshot: &PageSnapshot, id: NodeId) -> f64 {
    let node = snapshot.node(id);

    let width = node.rect.width
        + margin_px(&node.style.margin_left)
        + margin_px(&node.style.margin_right);
    let height = node.rect.height
        + margin_px(&node.style.margin_top)
        + margin_px(&node.style.margin_bottom);

    width * height
}

/// Whether the node's bounding box lies entirely inside the viewport
///
/// Any overflow past an edge disqualifies the element, regardless of how
/// well it would otherwise score.
pub fn is_fully_in_viewport(snapshot: &PageSnapshot, id: NodeId) -> bool {
    let rect = snapshot.node(id).rect;
    let viewport = snapshot.viewport();

    rect.y >= 0.0
        && rect.x >= 0.0
        && rect.bottom() <= viewport.height
        && rect.right() <= viewport.width
}

/// Parse a CSS margin value ("12px") as whole pixels, truncated toward zero
///
/// Missing or unparseable values read as 0.
fn margin_px(text: &str) -> f64 {
    let mut token = String::new();
    for ch in text.trim().chars() {
        if ch.is_ascii_digit() || ch == '.' || (ch == '-' && token.is_empty()) {
            token.push(ch);
        } else {
            break;
        }
    }

    token.parse::<f64>().map(f64::trunc).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ComputedStyle, ElementNode, Viewport};

    fn snapshot_with(node: ElementNode, viewport: Viewport) -> PageSnapshot {
        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, viewport.width, viewport.height);
        root.add_child(node);
        PageSnapshot::new(root, viewport)
    }

    #[test]
    fn test_total_area_includes_margins() {
        let node = ElementNode::new("div")
            .with_rect(0.0, 0.0, 100.0, 50.0)
            .with_style(ComputedStyle::new().with_margin("10px"));
        let snapshot = snapshot_with(node, Viewport::new(1000.0, 1000.0));

        // (100 + 10 + 10) * (50 + 10 + 10)
        assert_eq!(total_area(&snapshot, 1), 8400.0);
    }

    #[test]
    fn test_total_area_without_margins() {
        let node = ElementNode::new("div").with_rect(0.0, 0.0, 100.0, 50.0);
        let snapshot = snapshot_with(node, Viewport::new(1000.0, 1000.0));

        assert_eq!(total_area(&snapshot, 1), 5000.0);
    }

    #[test]
    fn test_margin_truncates_fractional_pixels() {
        let node = ElementNode::new("div")
            .with_rect(0.0, 0.0, 100.0, 100.0)
            .with_style(ComputedStyle::new().with_margin("7.9px"));
        let snapshot = snapshot_with(node, Viewport::new(1000.0, 1000.0));

        // 7.9px reads as 7: (100 + 14) * (100 + 14)
        assert_eq!(total_area(&snapshot, 1), 12996.0);
    }

    #[test]
    fn test_margin_px_values() {
        assert_eq!(margin_px("12px"), 12.0);
        assert_eq!(margin_px("12.7px"), 12.0);
        assert_eq!(margin_px("-5px"), -5.0);
        assert_eq!(margin_px("0px"), 0.0);
        assert_eq!(margin_px(""), 0.0);
        assert_eq!(margin_px("auto"), 0.0);
    }

    #[test]
    fn test_fully_in_viewport() {
        let node = ElementNode::new("div").with_rect(10.0, 10.0, 100.0, 100.0);
        let snapshot = snapshot_with(node, Viewport::new(500.0, 500.0));
        assert!(is_fully_in_viewport(&snapshot, 1));
    }

    #[test]
    fn test_exact_fit_counts_as_inside() {
        let node = ElementNode::new("div").with_rect(0.0, 0.0, 500.0, 500.0);
        let snapshot = snapshot_with(node, Viewport::new(500.0, 500.0));
        assert!(is_fully_in_viewport(&snapshot, 1));
    }

    #[test]
    fn test_negative_top_is_outside() {
        let node = ElementNode::new("div").with_rect(10.0, -1.0, 100.0, 100.0);
        let snapshot = snapshot_with(node, Viewport::new(500.0, 500.0));
        assert!(!is_fully_in_viewport(&snapshot, 1));
    }

    #[test]
    fn test_overflow_right_is_outside() {
        let node = ElementNode::new("div").with_rect(450.0, 0.0, 100.0, 100.0);
        let snapshot = snapshot_with(node, Viewport::new(500.0, 500.0));
        assert!(!is_fully_in_viewport(&snapshot, 1));
    }

    #[test]
    fn test_overflow_bottom_is_outside() {
        let node = ElementNode::new("div").with_rect(0.0, 450.0, 100.0, 100.0);
        let snapshot = snapshot_with(node, Viewport::new(500.0, 500.0));
        assert!(!is_fully_in_viewport(&snapshot, 1));
    }
}
