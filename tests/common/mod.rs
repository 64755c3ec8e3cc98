//! Shared test doubles.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use nauvoo::error::{NauvooError, Result};
use nauvoo::provider::{ChatProvider, ChatRequest, ChatResponse};
use nauvoo::tools::{FunctionTool, Tool, ToolParameters};
use nauvoo::types::ToolCall;

/// A chat backend that replays a fixed script of responses.
///
/// Records every request it receives; when the script runs out it either
/// repeats the last response (looping mode) or fails the test.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<ChatResponse>>,
    looping: Option<ChatResponse>,
    invocations: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<ChatResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            looping: None,
            invocations: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same response, forever.
    pub fn looping(response: ChatResponse) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            looping: Some(response),
            invocations: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return Ok(next);
        }
        if let Some(repeat) = &self.looping {
            return Ok(repeat.clone());
        }
        Err(NauvooError::api(500, "scripted provider exhausted"))
    }
}

/// A plain-text assistant response.
pub fn text_response(text: &str) -> ChatResponse {
    ChatResponse {
        text: text.to_string(),
        tool_calls: Vec::new(),
    }
}

/// An assistant response requesting the given tool calls.
pub fn tool_call_response(calls: Vec<ToolCall>) -> ChatResponse {
    ChatResponse {
        text: String::new(),
        tool_calls: calls,
    }
}

pub fn call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

/// A tool that counts executions and records the argument objects it saw.
pub struct CountingTool {
    pub executions: Arc<AtomicUsize>,
    pub seen_args: Arc<Mutex<Vec<serde_json::Value>>>,
    tool: Arc<dyn Tool>,
}

impl CountingTool {
    pub fn new(name: &str, parameters: ToolParameters, result: serde_json::Value) -> Self {
        let executions = Arc::new(AtomicUsize::new(0));
        let seen_args = Arc::new(Mutex::new(Vec::new()));

        let exec = executions.clone();
        let seen = seen_args.clone();
        let tool: Arc<dyn Tool> = Arc::new(FunctionTool::new(
            name,
            "test tool",
            parameters,
            move |args, _ctx| {
                let exec = exec.clone();
                let seen = seen.clone();
                let result = result.clone();
                async move {
                    exec.fetch_add(1, Ordering::SeqCst);
                    seen.lock().unwrap().push(args.raw().clone());
                    Ok(result)
                }
            },
        ));

        Self {
            executions,
            seen_args,
            tool,
        }
    }

    pub fn tool(&self) -> Arc<dyn Tool> {
        self.tool.clone()
    }

    pub fn count(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}
