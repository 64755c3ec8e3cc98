//! Error types for Nauvoo.

use thiserror::Error;

/// Primary error type for all Nauvoo operations.
#[derive(Error, Debug)]
pub enum NauvooError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tool loop exceeded depth bound at depth {depth}")]
    ToolLoopExceeded { depth: usize },

    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidToolArguments { tool: String, reason: String },

    #[error("Tool execution error: {tool_name} — {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl NauvooError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error is a structural failure of the dispatch loop
    /// (as opposed to a transport or configuration problem).
    pub fn is_loop_failure(&self) -> bool {
        matches!(
            self,
            Self::ToolLoopExceeded { .. }
                | Self::ToolNotFound { .. }
                | Self::InvalidToolArguments { .. }
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, NauvooError>;
