//! Core conversation and generation types.

pub mod conversation;
pub mod generation;
pub mod message;

pub use conversation::Conversation;
pub use generation::GenerationSettings;
pub use message::{ContentPart, Message, Role, ToolCall, ToolResult};
