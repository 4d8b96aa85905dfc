use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the screenshot tool (none needed; captures the viewport)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScreenshotParams {}

/// Tool that captures the current page as a PNG
#[derive(Default)]
pub struct ScreenshotTool;

impl Tool for ScreenshotTool {
    type Params = ScreenshotParams;

    fn name(&self) -> &str {
        "screenshot"
    }

    fn description(&self) -> &str {
        "Capture the current viewport as a base64-encoded PNG"
    }

    fn execute_typed(
        &self,
        _params: ScreenshotParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let png = context.session.screenshot_png()?;

        Ok(ToolResult::success_with(serde_json::json!({
            "format": "png",
            "bytes": png.len(),
            "base64": STANDARD.encode(&png),
        })))
    }
}
