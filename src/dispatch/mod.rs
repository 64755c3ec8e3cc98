//! The tool-dispatch loop.
//!
//! Alternates between asking the model for a response and executing any
//! tools it requests, until a tool-call-free response is produced or the
//! depth bound is exceeded. The loop is an explicit iteration with a
//! counter; each tool call in a turn runs sequentially, in the order the
//! model produced it.

use tracing::{debug, warn};

use crate::error::{NauvooError, Result};
use crate::provider::{ChatProvider, ChatRequest};
use crate::tools::registry::ToolRegistry;
use crate::tools::tool::ToolContext;
use crate::tools::{validation, ToolArguments};
use crate::types::{Conversation, GenerationSettings, Message, ToolCall};

/// Maximum dispatch depth: the model is invoked at depths `0..=MAX_TOOL_DEPTH`,
/// so a single turn makes at most `MAX_TOOL_DEPTH + 1` model invocations.
pub const MAX_TOOL_DEPTH: usize = 5;

/// Resolve one assistant turn with the default depth bound.
///
/// Returns the final, tool-call-free assistant message. The final message is
/// not appended to the conversation; intermediate assistant tool-call
/// messages and their tool results are. On a structural failure
/// ([`NauvooError::ToolLoopExceeded`], [`NauvooError::ToolNotFound`],
/// [`NauvooError::InvalidToolArguments`]) the conversation keeps whatever
/// state it reached; there is no rollback.
pub async fn resolve_turn(
    provider: &dyn ChatProvider,
    registry: &ToolRegistry,
    conversation: &mut Conversation,
    settings: &GenerationSettings,
) -> Result<Message> {
    resolve_turn_with_depth(provider, registry, conversation, settings, MAX_TOOL_DEPTH).await
}

/// Resolve one assistant turn with an explicit depth bound.
pub async fn resolve_turn_with_depth(
    provider: &dyn ChatProvider,
    registry: &ToolRegistry,
    conversation: &mut Conversation,
    settings: &GenerationSettings,
    max_depth: usize,
) -> Result<Message> {
    let definitions = registry.definitions();
    let tools = if definitions.is_empty() {
        None
    } else {
        Some(definitions)
    };

    let mut depth = 0usize;
    loop {
        if depth > max_depth {
            warn!(depth, "tool loop exceeded depth bound");
            return Err(NauvooError::ToolLoopExceeded { depth });
        }

        let request = ChatRequest {
            messages: conversation.messages().to_vec(),
            tools: tools.clone(),
            settings: settings.clone(),
        };
        let response = provider.complete(&request).await?;
        let assistant = response.into_message();

        let calls: Vec<ToolCall> = assistant.tool_calls().into_iter().cloned().collect();
        if calls.is_empty() {
            debug!(depth, "turn resolved");
            return Ok(assistant);
        }

        debug!(depth, requested = calls.len(), "assistant requested tools");
        conversation.push(assistant);

        for call in &calls {
            execute_call(registry, conversation, call).await?;
        }

        depth += 1;
    }
}

/// Execute one requested tool call and append its result message.
///
/// Lookup and validation failures are fatal for the turn; execution
/// failures are appended as error-flagged results the model can read.
async fn execute_call(
    registry: &ToolRegistry,
    conversation: &mut Conversation,
    call: &ToolCall,
) -> Result<()> {
    let tool = registry
        .get(&call.name)
        .ok_or_else(|| NauvooError::ToolNotFound {
            name: call.name.clone(),
        })?;

    validation::validate_arguments(&call.arguments, &tool.parameters().schema).map_err(
        |reason| NauvooError::InvalidToolArguments {
            tool: call.name.clone(),
            reason,
        },
    )?;

    let args = ToolArguments::new(call.arguments.clone());
    let ctx = ToolContext {
        tool_call_id: Some(call.id.clone()),
        tool_name: Some(call.name.clone()),
    };

    let (result, is_error) = match tool.execute(&args, &ctx).await {
        Ok(value) => (value, false),
        Err(e) => {
            warn!(tool = %call.name, error = %e, "tool execution failed");
            (serde_json::json!({ "error": e.to_string() }), true)
        }
    };

    conversation.push(Message::tool_result(&call.id, result, is_error));
    Ok(())
}
