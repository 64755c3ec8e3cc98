//! Name-keyed tool lookup table.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use super::tool::Tool;
use crate::provider::ToolDefinition;

/// Registry mapping a tool name to its implementation.
///
/// Built once at startup; the dispatch loop looks tools up by lower-cased
/// name, so registration lower-cases keys. No dynamic registration happens
/// during a conversation — callers assemble the registry before dispatching.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its lower-cased name, replacing any previous
    /// entry with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let key = tool.name().to_lowercase();
        if self.tools.insert(key.clone(), tool).is_some() {
            warn!(name = %key, "tool registered twice, keeping the later one");
        }
    }

    /// Look up a tool by name (case-insensitive exact match).
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(&name.to_lowercase())
    }

    /// Declarations for every registered tool, for the model request.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}
