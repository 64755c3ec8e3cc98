//! Conversational agent owning its history and dependencies.

use std::sync::Arc;

use crate::dispatch;
use crate::error::Result;
use crate::provider::ChatProvider;
use crate::tools::ToolRegistry;
use crate::types::{Conversation, GenerationSettings, Message};

/// An agent that maintains conversation state and can use tools.
///
/// Provider and registry are injected, so each session gets its own
/// configured instances and tests can substitute doubles. The conversation
/// lives for the life of the agent.
pub struct Agent {
    provider: Arc<dyn ChatProvider>,
    registry: ToolRegistry,
    settings: GenerationSettings,
    conversation: Conversation,
}

impl Agent {
    /// Create a new agent.
    pub fn new(provider: Arc<dyn ChatProvider>, registry: ToolRegistry) -> Self {
        Self {
            provider,
            registry,
            settings: GenerationSettings::default(),
            conversation: Conversation::new(),
        }
    }

    /// Set the system prompt (seeds the conversation).
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.conversation = Conversation::with_system(prompt);
        self
    }

    /// Set generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Send a user message and resolve the turn, returning the assistant's
    /// final text. Both the user message and the final assistant message are
    /// appended to the history.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<String> {
        self.conversation.push(Message::user(text));

        let reply = dispatch::resolve_turn(
            self.provider.as_ref(),
            &self.registry,
            &mut self.conversation,
            &self.settings,
        )
        .await?;

        let text = reply.text();
        self.conversation.push(reply);
        Ok(text)
    }

    /// Get the conversation history.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}
