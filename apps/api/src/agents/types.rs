use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::llm::TokenUsage;

/// Output of one task executed by its agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub name: String,
    pub agent: String,
    /// Task description after placeholder substitution
    pub description: String,
    pub expected_output: String,
    pub raw: String,
    pub tool_calls: u32,
    pub token_usage: TokenUsage,
}

/// Result of a full crew run; `raw` is the last task's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewOutput {
    pub id: Uuid,
    pub raw: String,
    pub tasks_output: Vec<TaskOutput>,
    pub token_usage: TokenUsage,
    pub completed_at: DateTime<Utc>,
}

impl CrewOutput {
    pub fn from_tasks(tasks_output: Vec<TaskOutput>) -> Self {
        let raw = tasks_output
            .last()
            .map(|task| task.raw.clone())
            .unwrap_or_default();

        let mut token_usage = TokenUsage::default();
        for task in &tasks_output {
            token_usage += task.token_usage;
        }

        Self {
            id: Uuid::new_v4(),
            raw,
            tasks_output,
            token_usage,
            completed_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
