// Prompt templates for LLM interactions
//
// This module contains all prompt templates used by the agent system.
// Prompts are versioned for reproducibility.

use std::collections::HashMap;

/// Prompt template structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: String,
    pub version: String,
    pub template: String,
}

impl PromptTemplate {
    /// Render the template, replacing `{{name}}` markers with their values
    ///
    /// Substitution is single-pass: values are never re-scanned, and markers
    /// without a matching variable are kept verbatim.
    pub fn render(&self, variables: &HashMap<&str, String>) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    match variables.get(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

pub mod library {
    use super::PromptTemplate;

    pub fn agent_system() -> PromptTemplate {
        PromptTemplate {
            name: "agent_system".to_string(),
            version: "1.0.0".to_string(),
            template: "You are {{role}}. {{backstory}}\n\
                       Your personal goal is: {{goal}}"
                .to_string(),
        }
    }

    pub fn tool_usage() -> PromptTemplate {
        PromptTemplate {
            name: "tool_usage".to_string(),
            version: "1.0.0".to_string(),
            template: "You ONLY have access to the following tools: {{tools}}.\n\
                       Use them whenever they help you complete the task. Once you have \
                       gathered enough information, stop calling tools and reply with \
                       your final answer."
                .to_string(),
        }
    }

    pub fn task() -> PromptTemplate {
        PromptTemplate {
            name: "task".to_string(),
            version: "1.0.0".to_string(),
            template: "Current Task: {{description}}\n\n\
                       This is the expected criteria for your final answer: {{expected_output}}\n\
                       You MUST return the actual complete content as the final answer, \
                       not a summary."
                .to_string(),
        }
    }

    pub fn task_context() -> PromptTemplate {
        PromptTemplate {
            name: "task_context".to_string(),
            version: "1.0.0".to_string(),
            template: "This is the context you're working with:\n{{context}}".to_string(),
        }
    }

    pub fn force_final_answer() -> PromptTemplate {
        PromptTemplate {
            name: "force_final_answer".to_string(),
            version: "1.0.0".to_string(),
            template: "You have reached the maximum number of tool uses. Do not call any \
                       more tools; give your best final answer now using what you have."
                .to_string(),
        }
    }
}
