//! Annotation tool system
//!
//! High-level operations exposed as named tools with JSON-schema'd
//! parameters: navigate, annotate, clear_annotations, screenshot. Tools are
//! executed through a [`ToolRegistry`] against a [`ToolContext`] that borrows
//! the browser session and caches the last page snapshot.

pub mod annotate;
pub mod clear;
pub mod navigate;
pub mod screenshot;

pub use annotate::{AnnotateParams, AnnotateTool};
pub use clear::{ClearAnnotationsParams, ClearAnnotationsTool};
pub use navigate::{NavigateParams, NavigateTool};
pub use screenshot::{ScreenshotParams, ScreenshotTool};

use crate::browser::BrowserSession;
use crate::dom::PageSnapshot;
use crate::error::{FocusError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Result envelope returned by every tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool completed successfully
    pub success: bool,

    /// Tool-specific payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Error message when success is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// A successful result without a payload
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    /// A successful result carrying a payload
    pub fn success_with(data: serde_json::Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    /// A failed result with an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }
}

/// Execution context shared by tools during one registry call
pub struct ToolContext<'a> {
    /// The browser session tools operate on
    pub session: &'a BrowserSession,

    /// Cached snapshot of the current page
    snapshot: Option<PageSnapshot>,
}

impl<'a> ToolContext<'a> {
    /// Create a context for the given session
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session, snapshot: None }
    }

    /// Get the current page snapshot, capturing it on first use
    pub fn get_snapshot(&mut self) -> Result<&PageSnapshot> {
        if self.snapshot.is_none() {
            self.snapshot = Some(self.session.capture_snapshot()?);
        }
        match &self.snapshot {
            Some(snapshot) => Ok(snapshot),
            None => Err(FocusError::SnapshotFailed("snapshot cache empty".to_string())),
        }
    }

    /// Drop the cached snapshot; the next access re-captures
    ///
    /// Called after anything that changes the page (navigation, annotation).
    pub fn invalidate_snapshot(&mut self) {
        self.snapshot = None;
    }
}

/// A named operation with typed, JSON-schema'd parameters
pub trait Tool {
    /// Parameter type deserialized from the caller's JSON
    type Params: DeserializeOwned + JsonSchema;

    /// Registry name of the tool
    fn name(&self) -> &str;

    /// One-line description for listings
    fn description(&self) -> &str;

    /// Execute with already-deserialized parameters
    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// Execute with raw JSON parameters
    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed: Self::Params =
            serde_json::from_value(params).map_err(|e| FocusError::InvalidParams {
                tool: self.name().to_string(),
                reason: e.to_string(),
            })?;
        self.execute_typed(typed, context)
    }

    /// JSON schema of the parameter type
    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }
}

/// Object-safe adapter over [`Tool`] for registry storage
trait ErasedTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult>;
    fn parameters_schema(&self) -> serde_json::Value;
}

impl<T: Tool + Send + Sync> ErasedTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }

    fn parameters_schema(&self) -> serde_json::Value {
        Tool::parameters_schema(self)
    }
}

/// Registry of available tools, dispatched by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn ErasedTool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in tools
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(AnnotateTool);
        registry.register(ClearAnnotationsTool);
        registry.register(ScreenshotTool);
        registry
    }

    /// Register a tool under its own name
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + Send + Sync + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Execute a registered tool by name
    pub fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| FocusError::ToolNotFound(name.to_string()))?;
        tool.execute(params, context)
    }

    /// Whether a tool is registered under the given name
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Names and descriptions of registered tools, in registration order
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.tools
            .values()
            .map(|tool| (tool.name(), tool.description()))
            .collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
