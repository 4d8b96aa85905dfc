//! Visual salience selection
//!
//! This module owns the selection algorithm: given a page snapshot, find the
//! most visually prominent fully-visible element, annotate it, and recurse
//! into it under a shrinking area budget. It includes:
//! - Rgba: color parsing and the L1 contrast metric
//! - resolve_background: first non-transparent ancestor background
//! - geometry: occupied area and viewport containment
//! - ScoreWeights: configurable area/contrast balance
//! - Annotator: the recursive selector producing a FocusChain

pub mod background;
pub mod color;
pub mod geometry;
pub mod score;
pub mod selector;

pub use background::resolve_background;
pub use color::{ColorParseError, Rgba};
pub use geometry::{is_fully_in_viewport, total_area};
pub use score::ScoreWeights;
pub use selector::{
    Annotation, Annotator, FocusChain, TerminalMark, TraversalContext, MIN_SIZE,
    PARENT_SHRINK_FACTOR, SCREEN_AREA_FRACTION,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MIN_SIZE, 900.0);
        assert_eq!(SCREEN_AREA_FRACTION, 0.5);
        assert_eq!(PARENT_SHRINK_FACTOR, 0.8);
    }

    #[test]
    fn test_root_context() {
        let ctx = TraversalContext::root();
        assert_eq!(ctx.depth, 1);
        assert_eq!(ctx.parent_area, f64::INFINITY);
        assert_eq!(ctx.parent_color, Rgba::WHITE);
    }
}
