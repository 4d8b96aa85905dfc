use crate::error::Result;
use crate::salience::ScoreWeights;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the annotate tool
///
/// Omitted weights fall back to the defaults (100, 1, 1).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AnnotateParams {
    /// Divisor applied to element area
    #[serde(default)]
    pub size_weight: Option<f64>,

    /// Multiplier for text-vs-background contrast
    #[serde(default)]
    pub fg_contrast_weight: Option<f64>,

    /// Multiplier for background-vs-surroundings contrast
    #[serde(default)]
    pub bg_contrast_weight: Option<f64>,
}

impl AnnotateParams {
    /// Resolve the params into validated weights
    pub fn weights(&self) -> Result<ScoreWeights> {
        let defaults = ScoreWeights::default();
        ScoreWeights::new(
            self.size_weight.unwrap_or(defaults.size_weight),
            self.fg_contrast_weight.unwrap_or(defaults.fg_contrast_weight),
            self.bg_contrast_weight.unwrap_or(defaults.bg_contrast_weight),
        )
    }
}

/// Tool that runs the salience selection and marks the page
#[derive(Default)]
pub struct AnnotateTool;

impl Tool for AnnotateTool {
    type Params = AnnotateParams;

    fn name(&self) -> &str {
        "annotate"
    }

    fn description(&self) -> &str {
        "Select and highlight the focal element chain of the current page"
    }

    fn execute_typed(
        &self,
        params: AnnotateParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let weights = params.weights()?;
        let chain = context.session.annotate(weights)?;

        // The page now carries badges and outlines
        context.invalidate_snapshot();

        Ok(ToolResult::success_with(serde_json::json!({
            "selected": chain.len(),
            "terminal": chain.terminal().map(|t| t.element.clone()),
            "chain": chain,
        })))
    }
}
