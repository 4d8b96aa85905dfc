use crate::dom::{NodeId, PageSnapshot};
use crate::salience::background::resolve_background;
use crate::salience::color::Rgba;
use crate::salience::geometry::{is_fully_in_viewport, total_area};
use crate::salience::score::ScoreWeights;
use indexmap::IndexMap;
use serde::Serialize;

/// Smallest area (px²) an element may have and still be selected (30 × 30)
pub const MIN_SIZE: f64 = 900.0;

/// Fraction of the viewport area that caps how large a selection may be
pub const SCREEN_AREA_FRACTION: f64 = 0.5;

/// Each level's winner must occupy less than this fraction of its parent's
/// area, which bounds recursion depth regardless of tree shape
pub const PARENT_SHRINK_FACTOR: f64 = 0.8;

/// Per-level traversal state, passed by value down the recursion
///
/// A child level never mutates its parent's context.
#[derive(Debug, Clone, Copy)]
pub struct TraversalContext {
    /// Recursion depth, starting at 1
    pub depth: usize,

    /// Area budget inherited from the level above; +∞ at the root
    pub parent_area: f64,

    /// Resolved background of the level above; opaque white at the root
    pub parent_color: Rgba,
}

impl TraversalContext {
    /// Context for a top-level invocation
    pub fn root() -> Self {
        Self {
            depth: 1,
            parent_area: f64::INFINITY,
            parent_color: Rgba::WHITE,
        }
    }

    /// Context for the level below a selected winner
    fn descend(&self, winner_area: f64, winner_background: Rgba) -> Self {
        Self {
            depth: self.depth + 1,
            parent_area: winner_area,
            parent_color: winner_background,
        }
    }
}

/// A selected focal element and how it will be marked on the page
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    /// Sequential label, starting at 1 for the outermost selection
    pub index: usize,

    /// Node within the snapshot this annotation belongs to
    pub node: NodeId,

    /// Human-readable element description (tag, id if present)
    pub element: String,

    /// Selector for addressing the live element
    pub css_path: String,

    /// Recursion depth at which the element won
    pub depth: usize,

    /// Total occupied area (content + margins), px²
    pub area: f64,

    /// Salience score that won this level
    pub score: f64,

    /// Outline color, shifting warmer with depth
    pub outline: (u8, u8, u8),
}

/// Marker for a container in which no descendant was eligible
#[derive(Debug, Clone, Serialize)]
pub struct TerminalMark {
    pub node: NodeId,
    pub element: String,
    pub css_path: String,
    pub depth: usize,
}

/// The ordered chain of focal selections from one run
///
/// Keyed by label index in insertion order; indices are 1, 2, 3, … in
/// root-to-leaf order and never repeat within a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FocusChain {
    annotations: IndexMap<usize, Annotation>,
    terminal: Option<TerminalMark>,
}

impl FocusChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, annotation: Annotation) {
        self.annotations.insert(annotation.index, annotation);
    }

    fn set_terminal(&mut self, mark: TerminalMark) {
        self.terminal = Some(mark);
    }

    /// Look up an annotation by its label index
    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(&index)
    }

    /// Iterate annotations in selection (root-to-leaf) order
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    /// Innermost selected element, if any
    pub fn last(&self) -> Option<&Annotation> {
        self.annotations.values().last()
    }

    /// The dead-end container mark, when the run bottomed out
    pub fn terminal(&self) -> Option<&TerminalMark> {
        self.terminal.as_ref()
    }

    /// Number of annotated elements
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether no element was annotated
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Export the chain as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Scored candidate produced while scanning one container; never outlives
/// the scan
#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: NodeId,
    area: f64,
    score: f64,
}

/// Outline color for a given depth: the red channel rises 50 per level
/// while green/blue fall 10 per level, floored at 10
pub fn outline_color(depth: usize) -> (u8, u8, u8) {
    let red = (50 * depth as u64).min(255) as u8;
    let cool = (200i64 - 10 * depth as i64).max(10) as u8;
    (red, cool, cool)
}

/// Recursive salience selector
///
/// Scans a container's full subtree, scores every eligible descendant, and
/// follows the best-scoring chain inward until no descendant qualifies.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    weights: ScoreWeights,
}

impl Annotator {
    /// Create an annotator with the given scoring weights
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// The weights this annotator scores with
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Run the full selection over a snapshot and return the focal chain
    ///
    /// The label counter starts at 1 for every run; the area ceiling is
    /// computed once from the snapshot's viewport.
    pub fn annotate(&self, snapshot: &PageSnapshot) -> FocusChain {
        let mut chain = FocusChain::new();
        if snapshot.is_empty() {
            return chain;
        }

        let area_ceiling = snapshot.viewport().area() * SCREEN_AREA_FRACTION;
        let mut next_index = 1;

        self.select_in(
            snapshot,
            snapshot.root(),
            TraversalContext::root(),
            area_ceiling,
            &mut next_index,
            &mut chain,
        );

        chain
    }

    fn select_in(
        &self,
        snapshot: &PageSnapshot,
        container: NodeId,
        ctx: TraversalContext,
        area_ceiling: f64,
        next_index: &mut usize,
        chain: &mut FocusChain,
    ) {
        match self.best_candidate(snapshot, container, &ctx, area_ceiling) {
            Some(winner) => {
                let node = snapshot.node(winner.node);
                let index = *next_index;
                *next_index += 1;

                log::debug!(
                    "depth {}: selected {} (area {:.0} px², score {:.1})",
                    ctx.depth,
                    node.describe(),
                    winner.area,
                    winner.score
                );

                chain.push(Annotation {
                    index,
                    node: winner.node,
                    element: node.describe(),
                    css_path: node.css_path.clone(),
                    depth: ctx.depth,
                    area: winner.area,
                    score: winner.score,
                    outline: outline_color(ctx.depth),
                });

                let next_ctx =
                    ctx.descend(winner.area, resolve_background(snapshot, winner.node));
                self.select_in(snapshot, winner.node, next_ctx, area_ceiling, next_index, chain);
            }
            None => {
                let node = snapshot.node(container);
                log::debug!("depth {}: no eligible descendant in {}", ctx.depth, node.describe());

                chain.set_terminal(TerminalMark {
                    node: container,
                    element: node.describe(),
                    css_path: node.css_path.clone(),
                    depth: ctx.depth,
                });
            }
        }
    }

    /// Scan all descendants of `container` and keep the best eligible one
    ///
    /// Equal scores keep the earlier candidate, so document order breaks
    /// ties deterministically.
    fn best_candidate(
        &self,
        snapshot: &PageSnapshot,
        container: NodeId,
        ctx: &TraversalContext,
        area_ceiling: f64,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for id in snapshot.descendants_of(container) {
            let area = total_area(snapshot, id);

            if !is_fully_in_viewport(snapshot, id) {
                continue;
            }
            if area <= MIN_SIZE || area >= area_ceiling {
                continue;
            }
            if area >= PARENT_SHRINK_FACTOR * ctx.parent_area {
                continue;
            }

            let style = &snapshot.node(id).style;
            let resolved = resolve_background(snapshot, id);
            let foreground = Rgba::parse_or(&style.color, Rgba::TRANSPARENT);
            let background = Rgba::parse_or(&style.background_color, Rgba::TRANSPARENT);

            let contrast_fg = foreground.contrast(&resolved);
            let contrast_bg = background.contrast(&resolved);
            let score = self.weights.score(area, contrast_fg, contrast_bg);

            let replaces = match &best {
                None => true,
                Some(current) => score > current.score,
            };
            if replaces {
                best = Some(Candidate { node: id, area, score });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ComputedStyle, ElementNode, Viewport};

    fn opaque(r: u32, g: u32, b: u32) -> String {
        format!("rgb({}, {}, {})", r, g, b)
    }

    /// Scenario from the field: 2000×1000 viewport, a red child with white
    /// text holding a smaller blue grandchild
    fn nested_page() -> PageSnapshot {
        let grandchild = ElementNode::new("div")
            .with_nth(1)
            .with_rect(50.0, 50.0, 200.0, 150.0)
            .with_style(
                ComputedStyle::new()
                    .with_color(opaque(255, 255, 255))
                    .with_background(opaque(0, 0, 255)),
            );

        let mut child = ElementNode::new("section")
            .with_nth(1)
            .with_rect(0.0, 0.0, 1000.0, 800.0)
            .with_style(
                ComputedStyle::new()
                    .with_color(opaque(255, 255, 255))
                    .with_background(opaque(255, 0, 0)),
            );
        child.add_child(grandchild);

        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 2000.0, 1000.0);
        root.add_child(child);

        PageSnapshot::new(root, Viewport::new(2000.0, 1000.0))
    }

    #[test]
    fn test_nested_chain_selects_outside_in() {
        let chain = Annotator::default().annotate(&nested_page());

        assert_eq!(chain.len(), 2);

        let first = chain.get(1).expect("outer selection missing");
        assert_eq!(first.element, "section");
        assert_eq!(first.depth, 1);
        assert_eq!(first.area, 800000.0);

        let second = chain.get(2).expect("inner selection missing");
        assert_eq!(second.element, "div");
        assert_eq!(second.depth, 2);
        assert_eq!(second.area, 30000.0);

        // the grandchild has nothing eligible inside it
        let terminal = chain.terminal().expect("terminal mark missing");
        assert_eq!(terminal.element, "div");
        assert_eq!(terminal.depth, 3);
    }

    #[test]
    fn test_indices_are_sequential_from_one() {
        let chain = Annotator::default().annotate(&nested_page());
        let indices: Vec<usize> = chain.annotations().map(|a| a.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_chain_shrinks_by_parent_factor() {
        let chain = Annotator::default().annotate(&nested_page());
        let areas: Vec<f64> = chain.annotations().map(|a| a.area).collect();
        for pair in areas.windows(2) {
            assert!(pair[1] < PARENT_SHRINK_FACTOR * pair[0]);
        }
    }

    #[test]
    fn test_every_selection_is_eligible() {
        let snapshot = nested_page();
        let ceiling = snapshot.viewport().area() * SCREEN_AREA_FRACTION;
        let chain = Annotator::default().annotate(&snapshot);

        for annotation in chain.annotations() {
            assert!(is_fully_in_viewport(&snapshot, annotation.node));
            assert!(annotation.area > MIN_SIZE);
            assert!(annotation.area < ceiling);
        }
    }

    #[test]
    fn test_tiny_element_never_selected() {
        // 20×20 is under the minimum size no matter how vivid
        let tiny = ElementNode::new("div")
            .with_nth(1)
            .with_rect(0.0, 0.0, 20.0, 20.0)
            .with_style(
                ComputedStyle::new()
                    .with_color(opaque(255, 255, 255))
                    .with_background(opaque(255, 0, 0)),
            );
        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 2000.0, 1000.0);
        root.add_child(tiny);

        let snapshot = PageSnapshot::new(root, Viewport::new(2000.0, 1000.0));
        let chain = Annotator::default().annotate(&snapshot);

        assert!(chain.is_empty());
        // the body itself becomes the dead end
        assert_eq!(chain.terminal().unwrap().element, "body");
        assert_eq!(chain.terminal().unwrap().depth, 1);
    }

    #[test]
    fn test_oversized_element_never_selected() {
        // More than half the viewport area is out of bounds
        let huge = ElementNode::new("div")
            .with_nth(1)
            .with_rect(0.0, 0.0, 1500.0, 900.0)
            .with_style(ComputedStyle::new().with_background(opaque(0, 128, 0)));
        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 2000.0, 1000.0);
        root.add_child(huge);

        let snapshot = PageSnapshot::new(root, Viewport::new(2000.0, 1000.0));
        let chain = Annotator::default().annotate(&snapshot);
        assert!(chain.is_empty());
    }

    #[test]
    fn test_equal_scores_keep_document_order() {
        // Two identical siblings: the first in document order must win
        let make = |id: &str| {
            let mut node = ElementNode::new("div")
                .with_rect(0.0, 0.0, 100.0, 100.0)
                .with_style(ComputedStyle::new().with_background(opaque(40, 40, 40)));
            node.add_attribute("id", id);
            node
        };

        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 1000.0, 1000.0);
        let mut first = make("first");
        first.nth = Some(1);
        let mut second = make("second");
        second.nth = Some(2);
        root.add_child(first);
        root.add_child(second);

        let snapshot = PageSnapshot::new(root, Viewport::new(1000.0, 1000.0));
        let chain = Annotator::default().annotate(&snapshot);

        assert_eq!(chain.get(1).unwrap().element, "div#first");
    }

    #[test]
    fn test_partially_offscreen_excluded_despite_score() {
        // The vivid candidate pokes above the viewport; the dull one is the
        // only legal pick
        let vivid = ElementNode::new("div")
            .with_nth(1)
            .with_rect(0.0, -5.0, 400.0, 300.0)
            .with_style(
                ComputedStyle::new()
                    .with_color(opaque(255, 255, 255))
                    .with_background(opaque(255, 0, 0)),
            );
        let mut dull = ElementNode::new("div")
            .with_nth(2)
            .with_rect(0.0, 300.0, 200.0, 100.0)
            .with_style(ComputedStyle::new().with_background(opaque(120, 120, 120)));
        dull.add_attribute("id", "dull");

        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 1000.0, 1000.0);
        root.add_child(vivid);
        root.add_child(dull);

        let snapshot = PageSnapshot::new(root, Viewport::new(1000.0, 1000.0));
        let chain = Annotator::default().annotate(&snapshot);

        assert_eq!(chain.get(1).unwrap().element, "div#dull");
    }

    #[test]
    fn test_child_larger_than_shrink_budget_excluded() {
        // The outer box wins level 1; its inner box is 90% of the outer
        // area, over the shrink budget, so level 2 terminates
        let inner = ElementNode::new("div")
            .with_nth(1)
            .with_rect(0.0, 0.0, 300.0, 300.0)
            .with_style(ComputedStyle::new().with_background(opaque(10, 10, 10)));
        let mut outer = ElementNode::new("div")
            .with_nth(1)
            .with_rect(0.0, 0.0, 316.0, 316.0)
            .with_style(ComputedStyle::new().with_background(opaque(250, 250, 250)));
        outer.add_attribute("id", "outer");
        outer.add_child(inner);

        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 1000.0, 1000.0);
        root.add_child(outer);

        let snapshot = PageSnapshot::new(root, Viewport::new(1000.0, 1000.0));
        let chain = Annotator::default().annotate(&snapshot);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.get(1).unwrap().element, "div#outer");
        assert_eq!(chain.terminal().unwrap().element, "div#outer");
    }

    #[test]
    fn test_empty_snapshot_yields_empty_chain() {
        let snapshot = PageSnapshot::new(ElementNode::new("body"), Viewport::new(800.0, 600.0));
        let chain = Annotator::default().annotate(&snapshot);

        assert!(chain.is_empty());
        assert!(chain.terminal().is_some());
    }

    #[test]
    fn test_outline_color_progression() {
        assert_eq!(outline_color(1), (50, 190, 190));
        assert_eq!(outline_color(4), (200, 160, 160));
        assert_eq!(outline_color(5), (250, 150, 150));
        // red saturates from depth 6 onward
        assert_eq!(outline_color(6), (255, 140, 140));
        assert_eq!(outline_color(7), (255, 130, 130));
        // green/blue floor at 10 from depth 19
        assert_eq!(outline_color(19), (255, 10, 10));
        assert_eq!(outline_color(30), (255, 10, 10));
    }

    #[test]
    fn test_chain_json_export() {
        let chain = Annotator::default().annotate(&nested_page());
        let json = chain.to_json().unwrap();

        assert!(json.contains("\"annotations\""));
        assert!(json.contains("\"terminal\""));
        assert!(json.contains("section"));
    }

    #[test]
    fn test_custom_weights_change_winner() {
        // A large plain box against a small vivid one: with default weights
        // the large box wins on area; weighting contrast up flips it
        let large = {
            let mut node = ElementNode::new("div")
                .with_nth(1)
                .with_rect(0.0, 0.0, 600.0, 500.0)
                .with_style(ComputedStyle::new().with_background(opaque(250, 250, 250)));
            node.add_attribute("id", "large");
            node
        };
        let vivid = {
            let mut node = ElementNode::new("div")
                .with_nth(2)
                .with_rect(0.0, 500.0, 100.0, 100.0)
                .with_style(
                    ComputedStyle::new()
                        .with_color(opaque(255, 255, 0))
                        .with_background(opaque(0, 0, 255)),
                );
            node.add_attribute("id", "vivid");
            node
        };

        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 1000.0, 1000.0);
        root.add_child(large);
        root.add_child(vivid);
        let snapshot = PageSnapshot::new(root, Viewport::new(1000.0, 1000.0));

        let default_chain = Annotator::default().annotate(&snapshot);
        assert_eq!(default_chain.get(1).unwrap().element, "div#large");

        let contrast_heavy = Annotator::new(ScoreWeights::new(10000.0, 5.0, 5.0).unwrap());
        let weighted_chain = contrast_heavy.annotate(&snapshot);
        assert_eq!(weighted_chain.get(1).unwrap().element, "div#vivid");
    }
}
