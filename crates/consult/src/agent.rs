use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{PipelineError, PipelineResult};
use crate::prompt_template;
use crate::providers::base::CompletionProvider;

/// How many memory entries are replayed into prompt construction. Older
/// entries stay stored for audit but never re-enter the context.
pub const MEMORY_WINDOW: usize = 3;

/// Immutable identity of one roster member. Built once at roster
/// construction, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub name: String,
    pub role: String,
    pub persona: String,
    pub model: String,
}

impl AgentIdentity {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        persona: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            persona: persona.into(),
            model: model.into(),
        }
    }
}

/// Append-only record of one agent's prior exchanges. Only the most recent
/// `MEMORY_WINDOW` entries are visible to prompt construction; nothing is
/// ever truncated.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConversationMemory {
    entries: Vec<String>,
}

impl ConversationMemory {
    pub fn append(&mut self, speaker: &str, content: &str) {
        self.entries.push(format!("{}: {}", speaker, content));
    }

    /// The window replayed into the next prompt, newest last.
    pub fn recent(&self) -> &[String] {
        let start = self.entries.len().saturating_sub(MEMORY_WINDOW);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Text produced for one task. A provider failure is folded into visibly
/// tagged content instead of an error so the pipeline keeps moving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub text: String,
    pub failed: bool,
}

impl GeneratedContent {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: false,
        }
    }

    pub fn failed(agent_name: &str, reason: &str) -> Self {
        Self {
            text: format!("Error in {}: {}", agent_name, reason),
            failed: true,
        }
    }
}

/// One role-bound worker: an identity, a private bounded memory, and a
/// handle to the completion backend. Memory is never shared between agents
/// so persona voices cannot cross-contaminate.
pub struct Agent {
    identity: AgentIdentity,
    memory: ConversationMemory,
    provider: Arc<dyn CompletionProvider>,
    tasks_completed: usize,
}

impl Agent {
    pub fn new(identity: AgentIdentity, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            identity,
            memory: ConversationMemory::default(),
            provider,
            tasks_completed: 0,
        }
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Observability only; never consulted for control flow.
    pub fn tasks_completed(&self) -> usize {
        self.tasks_completed
    }

    /// Run one task through the completion backend.
    ///
    /// The prompt is built deterministically as identity, context, bounded
    /// memory, task -- task last. A provider failure does not escape the
    /// agent boundary: it is returned as failure-tagged content and is not
    /// appended to memory.
    pub async fn think(&mut self, task: &str, context: &str) -> PipelineResult<GeneratedContent> {
        if task.trim().is_empty() {
            return Err(PipelineError::EmptyTask);
        }

        let prompt =
            prompt_template::agent_prompt(&self.identity, context, self.memory.recent(), task)?;

        match self.provider.complete(&self.identity.model, &prompt).await {
            Ok(text) => {
                self.memory.append(&self.identity.name, &text);
                self.tasks_completed += 1;
                Ok(GeneratedContent::ok(text))
            }
            Err(e) => {
                tracing::warn!(agent = %self.identity.name, error = %e, "completion failed");
                Ok(GeneratedContent::failed(&self.identity.name, &e.to_string()))
            }
        }
    }
}
