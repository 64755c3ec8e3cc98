//! Model invocation collaborator: trait and implementations.

pub mod http;
pub mod openai_compatible;

use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::error::{NauvooError, Result};
use crate::types::{GenerationSettings, Message, ToolCall};

pub use openai_compatible::OpenAiCompatibleProvider;

/// A request sent to a chat backend.
///
/// Tools are bound per request: the declarations name what the model may
/// call for this invocation only.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub tools: Option<Vec<ToolDefinition>>,
    pub settings: GenerationSettings,
}

/// Tool declaration sent to the backend API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One assistant turn returned by a chat backend.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
}

impl ChatResponse {
    /// Convert into an assistant [`Message`], carrying any tool-call parts.
    pub fn into_message(self) -> Message {
        if self.tool_calls.is_empty() {
            Message::assistant(self.text)
        } else {
            Message::assistant_with_calls(self.text, self.tool_calls)
        }
    }
}

/// Core trait implemented by chat backends.
///
/// The dispatch loop receives an implementation by reference, so tests can
/// substitute a scripted stub and servers can configure one instance per
/// conversation.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Backend name (e.g., "ollama", "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Produce the next assistant message for the given conversation.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// Create a provider for the configured backend.
pub fn create_provider(config: &Config) -> Result<Box<dyn ChatProvider>> {
    match &config.backend {
        Backend::Ollama { base_url, model } => Ok(Box::new(OpenAiCompatibleProvider::ollama(
            base_url.clone(),
            model.clone(),
        ))),
        Backend::OpenAi { api_key, model } => {
            if api_key.is_empty() {
                return Err(NauvooError::Configuration(
                    "OPENAI_API_KEY is required for the openai backend".into(),
                ));
            }
            Ok(Box::new(OpenAiCompatibleProvider::openai(
                api_key.clone(),
                model.clone(),
            )))
        }
    }
}
