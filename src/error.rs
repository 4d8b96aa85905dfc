use thiserror::Error;

/// Errors that can occur during browser control, snapshot capture, or
/// annotation tooling
#[derive(Debug, Error)]
pub enum FocusError {
    /// Failed to launch a browser instance
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to an existing browser instance
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Tab operation (create, close, lookup) failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Navigation failed or timed out
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript evaluation in the page failed
    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    /// Page snapshot could not be captured or parsed
    #[error("Snapshot capture failed: {0}")]
    SnapshotFailed(String),

    /// Scoring weights were rejected at construction
    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Tool parameters did not match the tool's schema
    #[error("Invalid parameters for tool '{tool}': {reason}")]
    InvalidParams { tool: String, reason: String },

    /// A tool ran but failed
    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FocusError>;
