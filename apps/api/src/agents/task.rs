use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::{AgentError, AgentResult};

/// A unit of work bound to one agent of a crew
///
/// `description` may contain `{name}` placeholders that are filled from the
/// crew's kickoff inputs. Braces that do not wrap an identifier are left as
/// they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    /// Index of the owning agent in the crew's agent list
    pub agent: usize,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: usize,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
        }
    }

    /// Placeholder names referenced by the description, in order of appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for segment in segments(&self.description) {
            if let Segment::Placeholder(name) = segment {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Description with every placeholder replaced by its input
    pub fn interpolate(&self, inputs: &HashMap<String, String>) -> AgentResult<String> {
        let mut out = String::with_capacity(self.description.len());
        for segment in segments(&self.description) {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = inputs
                        .get(name)
                        .ok_or_else(|| AgentError::MissingInput(name.to_string()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_identifier(&after[..close]) => {
                if open > 0 {
                    segments.push(Segment::Literal(&rest[..open]));
                }
                segments.push(Segment::Placeholder(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                segments.push(Segment::Literal(&rest[..=open]));
                rest = after;
            }
        }
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn interpolates_query_placeholder() {
        let task = Task::new(
            "research",
            "Research about the user's query and generate insights: {query}",
            "A report",
            0,
        );

        let description = task
            .interpolate(&inputs(&[("query", "What is artificial intelligence?")]))
            .unwrap();
        assert_eq!(
            description,
            "Research about the user's query and generate insights: What is artificial intelligence?"
        );
    }

    #[test]
    fn missing_input_is_an_error() {
        let task = Task::new("t", "About {topic} for {audience}", "x", 0);
        let err = task.interpolate(&inputs(&[("topic", "rust")])).unwrap_err();
        assert!(matches!(err, AgentError::MissingInput(name) if name == "audience"));
    }

    #[test]
    fn non_identifier_braces_are_literal() {
        let task = Task::new("t", "Return {\"a\": 1} or {} for {query}", "x", 0);

        assert_eq!(task.placeholders(), vec!["query"]);
        assert_eq!(
            task.interpolate(&inputs(&[("query", "q")])).unwrap(),
            "Return {\"a\": 1} or {} for q"
        );
    }

    #[test]
    fn values_are_not_reinterpolated() {
        let task = Task::new("t", "{query} / {query}", "x", 0);

        assert_eq!(task.placeholders(), vec!["query"]);
        assert_eq!(
            task.interpolate(&inputs(&[("query", "{other}")])).unwrap(),
            "{other} / {other}"
        );
    }
}
