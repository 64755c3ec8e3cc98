//! Tests for the webhook mention handler.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use common::{call, text_response, tool_call_response, CountingTool, ScriptedProvider};
use nauvoo::error::Result;
use nauvoo::tools::{ToolParameters, ToolRegistry};
use nauvoo::types::Role;
use nauvoo::webhook::{MentionHandler, Responder};

#[derive(Default)]
struct RecordingResponder {
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn send(&self, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn acknowledges_then_replies_with_resolved_text() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response(vec![call(
            "call_w",
            "get_weather",
            json!({"location": "Houston TX"}),
        )]),
        text_response("31C and sunny."),
    ]));
    let counting = CountingTool::new(
        "get_weather",
        ToolParameters::object()
            .string("location", "City", true)
            .build(),
        json!("sunny"),
    );
    let mut registry = ToolRegistry::new();
    registry.register(counting.tool());

    let handler = MentionHandler::new(
        provider.clone(),
        registry,
        "You are a weather assistant.",
    );
    let responder = RecordingResponder::default();

    handler
        .handle("weather in Houston TX?", &responder)
        .await
        .unwrap();

    let sent = responder.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], "Sure, I'll get right on that!");
    assert_eq!(sent[1], "31C and sunny.");
    assert_eq!(counting.count(), 1);
}

#[tokio::test]
async fn each_event_gets_a_fresh_conversation() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        text_response("first reply"),
        text_response("second reply"),
    ]));
    let handler = MentionHandler::new(provider.clone(), ToolRegistry::new(), "system prompt");
    let responder = RecordingResponder::default();

    handler.handle("first question", &responder).await.unwrap();
    handler.handle("second question", &responder).await.unwrap();

    // The second request starts over: one system and one user message,
    // nothing carried across events.
    let requests = provider.requests();
    assert_eq!(requests[1].messages.len(), 2);
    assert_eq!(requests[1].messages[0].role, Role::System);
    assert_eq!(requests[1].messages[1].text(), "second question");
}
