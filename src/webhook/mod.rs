//! Webhook-facing message handling.
//!
//! Routing, signature verification, and bot-token management belong to the
//! hosting service; this module consumes only the extracted user text and a
//! capability for sending replies. Each inbound event gets a fresh
//! conversation: nothing persists across events.

use std::sync::Arc;

use async_trait::async_trait;

use crate::dispatch;
use crate::error::Result;
use crate::provider::ChatProvider;
use crate::tools::ToolRegistry;
use crate::types::{Conversation, GenerationSettings, Message};

const ACK_MESSAGE: &str = "Sure, I'll get right on that!";

/// Capability for sending a text reply back to the messaging platform.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Handles one mention event: acknowledge, resolve, reply.
pub struct MentionHandler {
    provider: Arc<dyn ChatProvider>,
    registry: ToolRegistry,
    system_prompt: String,
    settings: GenerationSettings,
}

impl MentionHandler {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        registry: ToolRegistry,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            registry,
            system_prompt: system_prompt.into(),
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Handle one event carrying already-extracted user text.
    ///
    /// Sends an acknowledgement first, then the resolved assistant reply.
    pub async fn handle(&self, text: &str, responder: &dyn Responder) -> Result<()> {
        responder.send(ACK_MESSAGE).await?;

        let mut conversation = Conversation::with_system(&self.system_prompt);
        conversation.push(Message::user(text));

        let reply = dispatch::resolve_turn(
            self.provider.as_ref(),
            &self.registry,
            &mut conversation,
            &self.settings,
        )
        .await?;

        responder.send(&reply.text()).await
    }
}
