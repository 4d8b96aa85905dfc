use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for clearing annotations (none needed)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClearAnnotationsParams {}

/// Tool that removes all focal annotations from the page
#[derive(Default)]
pub struct ClearAnnotationsTool;

impl Tool for ClearAnnotationsTool {
    type Params = ClearAnnotationsParams;

    fn name(&self) -> &str {
        "clear_annotations"
    }

    fn description(&self) -> &str {
        "Remove all focal outlines and index badges from the current page"
    }

    fn execute_typed(
        &self,
        _params: ClearAnnotationsParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let removed = context.session.clear_annotations()?;
        context.invalidate_snapshot();

        Ok(ToolResult::success_with(serde_json::json!({
            "removed_badges": removed
        })))
    }
}
