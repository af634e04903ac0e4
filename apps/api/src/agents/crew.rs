use std::collections::HashMap;

use super::agent::Agent;
use super::errors::{AgentError, AgentResult};
use super::task::Task;
use super::types::{CrewOutput, TaskOutput};

/// Ordered agents and tasks executed as a sequential process
///
/// Each task sees the raw outputs of every task before it as context. The
/// crew itself holds no per-run state, so one instance can serve concurrent
/// kickoffs.
#[derive(Debug)]
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    verbose: bool,
}

impl Crew {
    /// Build a crew, checking every task refers to an existing agent
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>, verbose: bool) -> AgentResult<Self> {
        if tasks.is_empty() {
            return Err(AgentError::ConfigError("a crew needs at least one task".to_string()));
        }

        if let Some(task) = tasks.iter().find(|task| task.agent >= agents.len()) {
            return Err(AgentError::ConfigError(format!(
                "task '{}' refers to agent #{} but the crew has {} agents",
                task.name,
                task.agent,
                agents.len()
            )));
        }

        Ok(Self {
            agents,
            tasks,
            verbose,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Run every task in order and collect the outputs
    ///
    /// Inputs are checked against all task templates before the first model
    /// call. Any task failure aborts the run and is returned unchanged.
    pub async fn kickoff(&self, inputs: &HashMap<String, String>) -> AgentResult<CrewOutput> {
        for task in &self.tasks {
            task.interpolate(inputs)?;
        }

        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());
        for index in 0..self.tasks.len() {
            let context: Vec<String> = outputs.iter().map(|output| output.raw.clone()).collect();
            let output = self.run_task(index, inputs, &context).await?;
            outputs.push(output);
        }

        Ok(CrewOutput::from_tasks(outputs))
    }

    /// Run a single task with explicit context
    pub async fn run_task(
        &self,
        index: usize,
        inputs: &HashMap<String, String>,
        context: &[String],
    ) -> AgentResult<TaskOutput> {
        let task = self
            .tasks
            .get(index)
            .ok_or_else(|| AgentError::ConfigError(format!("no task at index {}", index)))?;
        let agent = &self.agents[task.agent];
        let description = task.interpolate(inputs)?;

        if self.verbose {
            tracing::info!(task = %task.name, agent = %agent.role, "starting task");
        } else {
            tracing::debug!(task = %task.name, agent = %agent.role, "starting task");
        }

        let run = agent
            .execute(&description, &task.expected_output, context)
            .await?;

        if self.verbose {
            tracing::info!(
                task = %task.name,
                agent = %agent.role,
                tool_calls = run.tool_calls,
                input_tokens = run.usage.input_tokens,
                output_tokens = run.usage.output_tokens,
                "task completed"
            );
        }

        Ok(TaskOutput {
            name: task.name.clone(),
            agent: agent.role.clone(),
            description,
            expected_output: task.expected_output.clone(),
            raw: run.text,
            tool_calls: run.tool_calls,
            token_usage: run.usage,
        })
    }
}
