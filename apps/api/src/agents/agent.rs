use std::collections::HashMap;
use std::sync::Arc;

use super::errors::{AgentError, AgentResult};
use super::prompts::library;
use super::tools::Tool;
use crate::domain::llm::{
    ChatMessage, CompletionRequest, ContentBlock, LanguageModel, StopReason, TokenUsage, ToolCall,
    ToolChoice, ToolSpec,
};

/// Model and loop settings shared by every agent in a crew
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSettings {
    pub temperature: Option<f32>,
    pub max_tokens: u32,
    /// Tool rounds allowed before the agent must answer
    pub max_iterations: u32,
    pub verbose: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            temperature: Some(0.5),
            max_tokens: 4096,
            max_iterations: 5,
            verbose: true,
        }
    }
}

/// Result of one agent working through one task
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRun {
    pub text: String,
    pub tool_calls: u32,
    pub usage: TokenUsage,
}

/// A role-bound agent: composes prompts, calls the model, runs tools
///
/// Agents are immutable once built; all per-task state lives inside
/// [`Agent::execute`].
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    tools: Vec<Arc<dyn Tool>>,
    llm: Arc<dyn LanguageModel>,
    settings: AgentSettings,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("tools", &self.tool_names())
            .field("model", &self.llm.model())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Agent {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
            llm,
            settings: AgentSettings::default(),
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_settings(mut self, settings: AgentSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// System prompt built from role, backstory, goal and available tools
    pub fn system_prompt(&self) -> String {
        let mut vars = HashMap::new();
        vars.insert("role", self.role.clone());
        vars.insert("goal", self.goal.clone());
        vars.insert("backstory", self.backstory.clone());
        let mut prompt = library::agent_system().render(&vars);

        if !self.tools.is_empty() {
            let mut vars = HashMap::new();
            vars.insert("tools", self.tool_names().join(", "));
            prompt.push_str("\n\n");
            prompt.push_str(&library::tool_usage().render(&vars));
        }
        prompt
    }

    /// User prompt for a task, with outputs of earlier tasks as context
    pub fn task_prompt(&self, description: &str, expected_output: &str, context: &[String]) -> String {
        let mut vars = HashMap::new();
        vars.insert("description", description.to_string());
        vars.insert("expected_output", expected_output.to_string());
        let mut prompt = library::task().render(&vars);

        let context: Vec<&str> = context
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if !context.is_empty() {
            let mut vars = HashMap::new();
            vars.insert("context", context.join("\n\n----------\n\n"));
            prompt.push_str("\n\n");
            prompt.push_str(&library::task_context().render(&vars));
        }
        prompt
    }

    /// Work a task to completion
    ///
    /// Loops while the model asks for tools. After `max_iterations` tool
    /// rounds the model is told to answer and offered no further tool use,
    /// so the reply to that call always ends the loop.
    pub async fn execute(
        &self,
        description: &str,
        expected_output: &str,
        context: &[String],
    ) -> AgentResult<AgentRun> {
        let system = self.system_prompt();
        let tool_specs: Vec<ToolSpec> = self.tools.iter().map(|tool| tool.spec()).collect();
        let mut messages = vec![ChatMessage::user(self.task_prompt(
            description,
            expected_output,
            context,
        ))];
        let mut usage = TokenUsage::default();
        let mut tool_calls = 0u32;

        let mut iteration = 0u32;
        loop {
            let tools_allowed = !tool_specs.is_empty() && iteration < self.settings.max_iterations;
            let request = CompletionRequest {
                system: Some(system.clone()),
                messages: messages.clone(),
                tools: tool_specs.clone(),
                tool_choice: if tools_allowed {
                    ToolChoice::Auto
                } else {
                    ToolChoice::None
                },
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
            };

            let completion = self.llm.complete(request).await.map_err(AgentError::Llm)?;
            usage += completion.usage;

            let calls = completion.tool_calls();
            if !tools_allowed || completion.stop_reason != StopReason::ToolUse || calls.is_empty() {
                let text = completion.text().trim().to_string();
                if text.is_empty() {
                    return Err(AgentError::EmptyResponse {
                        role: self.role.clone(),
                    });
                }
                if self.settings.verbose {
                    tracing::info!(role = %self.role, tool_calls, "final answer: {}", preview(&text));
                } else {
                    tracing::debug!(role = %self.role, tool_calls, "final answer ready");
                }
                return Ok(AgentRun {
                    text,
                    tool_calls,
                    usage,
                });
            }

            messages.push(ChatMessage::assistant(completion.content));

            let mut results = Vec::with_capacity(calls.len());
            for call in &calls {
                tool_calls += 1;
                results.push(self.invoke_tool(call).await);
            }
            if iteration + 1 == self.settings.max_iterations {
                results.push(ContentBlock::text(
                    library::force_final_answer().render(&HashMap::new()),
                ));
            }
            messages.push(ChatMessage::tool_results(results));
            iteration += 1;
        }
    }

    /// Run one tool call; failures become an error result for the model
    async fn invoke_tool(&self, call: &ToolCall) -> ContentBlock {
        let Some(tool) = self.tools.iter().find(|tool| tool.name() == call.name) else {
            tracing::warn!(role = %self.role, tool = %call.name, "model requested unknown tool");
            return ContentBlock::tool_result(
                &call.id,
                format!(
                    "Unknown tool '{}'. Available tools: {}",
                    call.name,
                    self.tool_names().join(", ")
                ),
                true,
            );
        };

        if self.settings.verbose {
            tracing::info!(role = %self.role, tool = %call.name, input = %call.input, "using tool");
        } else {
            tracing::debug!(role = %self.role, tool = %call.name, "using tool");
        }

        match tool.call(&call.input).await {
            Ok(output) => ContentBlock::tool_result(&call.id, output, false),
            Err(err) => {
                tracing::warn!(role = %self.role, tool = %call.name, "tool failed: {}", err);
                ContentBlock::tool_result(&call.id, format!("Tool error: {}", err), true)
            }
        }
    }
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 200;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(LIMIT).collect::<String>())
    }
}
