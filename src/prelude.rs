//! Convenience re-exports for common use.

pub use crate::agent::Agent;
pub use crate::config::{Backend, Config};
pub use crate::error::{NauvooError, Result};
pub use crate::provider::{ChatProvider, ChatRequest, ChatResponse, ToolDefinition};
pub use crate::tools::{FunctionTool, Tool, ToolArguments, ToolParameters, ToolRegistry};
pub use crate::types::{
    ContentPart, Conversation, GenerationSettings, Message, Role, ToolCall, ToolResult,
};
