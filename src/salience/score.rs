use crate::error::{FocusError, Result};
use serde::{Deserialize, Serialize};

/// Default divisor applied to area
pub const DEFAULT_SIZE_WEIGHT: f64 = 100.0;

/// Default multiplier for foreground-vs-background contrast
pub const DEFAULT_FG_CONTRAST_WEIGHT: f64 = 1.0;

/// Default multiplier for background-vs-resolved-background contrast
pub const DEFAULT_BG_CONTRAST_WEIGHT: f64 = 1.0;

/// Scoring weights for salience selection
///
/// Area contributes positively but is divided by `size_weight`, a large
/// divisor, so contrast differences dominate among similar-sized candidates.
/// All weights must be positive; construction validates them. Immutable for
/// the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Divisor applied to area (larger means area matters less)
    pub size_weight: f64,

    /// Multiplier for the element's text color contrast against its
    /// resolved background
    pub fg_contrast_weight: f64,

    /// Multiplier for the element's own background contrast against its
    /// resolved background
    pub bg_contrast_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            size_weight: DEFAULT_SIZE_WEIGHT,
            fg_contrast_weight: DEFAULT_FG_CONTRAST_WEIGHT,
            bg_contrast_weight: DEFAULT_BG_CONTRAST_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Create validated weights; every weight must be strictly positive
    pub fn new(size_weight: f64, fg_contrast_weight: f64, bg_contrast_weight: f64) -> Result<Self> {
        let weights = Self { size_weight, fg_contrast_weight, bg_contrast_weight };
        weights.validate()?;
        Ok(weights)
    }

    /// Check that all weights are strictly positive
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("size_weight", self.size_weight),
            ("fg_contrast_weight", self.fg_contrast_weight),
            ("bg_contrast_weight", self.bg_contrast_weight),
        ] {
            if !(value > 0.0) {
                return Err(FocusError::InvalidWeights(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Combine area and the two contrast components into a single score
    pub fn score(&self, area: f64, contrast_fg: f64, contrast_bg: f64) -> f64 {
        area / self.size_weight
            + contrast_fg * self.fg_contrast_weight
            + contrast_bg * self.bg_contrast_weight
    }
}
