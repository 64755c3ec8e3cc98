//! Chat Completions wire format, shared by Ollama's `/v1` endpoint and
//! hosted OpenAI-style backends.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{NauvooError, Result};
use crate::types::{Message, Role, ToolCall};

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{ChatProvider, ChatRequest, ChatResponse};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiCompatibleProvider {
    name: &'static str,
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiCompatibleProvider {
    /// Local Ollama backend; no credentials, `{base_url}/v1` endpoint.
    pub fn ollama(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            name: "ollama",
            model: model.into(),
            api_key: String::new(),
            base_url: format!("{}/v1", base_url.trim_end_matches('/')),
        }
    }

    /// Hosted OpenAI backend with a Bearer API key.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: "openai",
            model: model.into(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    /// Any other endpoint speaking the same wire format (also used by tests).
    pub fn custom(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: "openai-compatible",
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_wire)
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });
        let obj = body.as_object_mut().expect("body is an object");

        if let Some(max) = request.settings.max_tokens {
            obj.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = request.settings.temperature {
            obj.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = request.settings.top_p {
            obj.insert("top_p".into(), top_p.into());
        }
        if let Some(ref stops) = request.settings.stop_sequences {
            obj.insert("stop".into(), serde_json::json!(stops));
        }
        if let Some(seed) = request.settings.seed {
            obj.insert("seed".into(), seed.into());
        }

        if let Some(ref tools) = request.tools {
            if !tools.is_empty() {
                let tool_defs: Vec<serde_json::Value> = tools
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "type": "function",
                            "function": {
                                "name": t.name,
                                "description": t.description,
                                "parameters": t.parameters,
                            }
                        })
                    })
                    .collect();
                obj.insert("tools".into(), tool_defs.into());
            }
        }

        body
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleProvider {
    fn provider_name(&self) -> &str {
        self.name
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model, provider = self.name, "chat completion request");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: WireChatResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| NauvooError::api(200, "No choices in chat response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall {
                id: tc.id,
                name: tc.function.name,
                // Arguments arrive as a JSON-encoded string; an unparseable
                // payload is kept verbatim so validation can reject it.
                arguments: serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(serde_json::Value::String(tc.function.arguments)),
            })
            .collect();

        Ok(ChatResponse {
            text: choice.message.content.unwrap_or_default(),
            tool_calls,
        })
    }
}

/// Map a [`Message`] to the chat-completions wire shape.
fn message_to_wire(message: &Message) -> serde_json::Value {
    match message.role {
        Role::System => serde_json::json!({
            "role": "system",
            "content": message.text(),
        }),
        Role::User => serde_json::json!({
            "role": "user",
            "content": message.text(),
        }),
        Role::Assistant => {
            let text = message.text();
            let mut wire = serde_json::json!({
                "role": "assistant",
                "content": if text.is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::Value::String(text)
                },
            });
            let calls = message.tool_calls();
            if !calls.is_empty() {
                let wire_calls: Vec<serde_json::Value> = calls
                    .iter()
                    .map(|tc| {
                        serde_json::json!({
                            "id": tc.id,
                            "type": "function",
                            "function": {
                                "name": tc.name,
                                "arguments": tc.arguments.to_string(),
                            }
                        })
                    })
                    .collect();
                wire.as_object_mut()
                    .expect("wire message is an object")
                    .insert("tool_calls".into(), wire_calls.into());
            }
            wire
        }
        Role::Tool => {
            let (id, payload) = message
                .tool_result_part()
                .map(|tr| (tr.tool_call_id.clone(), tool_result_to_string(&tr.result)))
                .unwrap_or_default();
            serde_json::json!({
                "role": "tool",
                "tool_call_id": id,
                "content": payload,
            })
        }
    }
}

/// Convert a tool result JSON value into a string payload for the wire.
fn tool_result_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(v) => v.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => value.to_string(),
    }
}

#[derive(Deserialize)]
struct WireChatResponse {
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Deserialize)]
struct WireMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunction,
}

#[derive(Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}
