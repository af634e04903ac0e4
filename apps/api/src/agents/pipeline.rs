// Research-then-write pipeline served by the API

use std::collections::HashMap;
use std::sync::Arc;

use super::agent::{Agent, AgentSettings};
use super::crew::Crew;
use super::errors::AgentResult;
use super::task::Task;
use super::tools::SearchTool;
use super::types::CrewOutput;
use crate::domain::llm::LanguageModel;
use crate::domain::search::SearchProvider;

pub const QUERY_INPUT: &str = "query";

const RESEARCH_TASK: usize = 0;
const WRITE_TASK: usize = 1;

/// Two-agent crew: a Researcher with web search, then a Writer
#[derive(Debug)]
pub struct ResearchPipeline {
    crew: Crew,
}

impl ResearchPipeline {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        search: Arc<dyn SearchProvider>,
        settings: AgentSettings,
    ) -> AgentResult<Self> {
        let researcher = Agent::new(
            "Researcher",
            "Research about the user's query and generate insights",
            "You are a helpful assistant that can answer questions about the document.",
            llm.clone(),
        )
        .with_tool(Arc::new(SearchTool::new(search)))
        .with_settings(settings.clone());

        let writer = Agent::new(
            "Writer",
            "Use the available insights to write a concise and informative response to the user's query",
            "You are a helpful assistant that can write a report about the user's query",
            llm,
        )
        .with_settings(settings.clone());

        let research_task = Task::new(
            "research",
            "Research about the user's query and generate insights: {query}",
            "A concise and informative report about the user's query",
            0,
        );

        let write_task = Task::new(
            "write",
            "Use the available insights to write a concise and informative response to the user's query: {query}",
            "A concise and informative response to the user's query",
            1,
        );

        let crew = Crew::new(
            vec![researcher, writer],
            vec![research_task, write_task],
            settings.verbose,
        )?;

        Ok(Self { crew })
    }

    pub fn crew(&self) -> &Crew {
        &self.crew
    }

    /// Research the query and return the insight report
    pub async fn research(&self, query: &str) -> AgentResult<String> {
        let output = self
            .crew
            .run_task(RESEARCH_TASK, &inputs(query), &[])
            .await?;
        Ok(output.raw)
    }

    /// Draft the final response from previously gathered insights
    pub async fn write(&self, query: &str, insights: &str) -> AgentResult<String> {
        let output = self
            .crew
            .run_task(WRITE_TASK, &inputs(query), &[insights.to_string()])
            .await?;
        Ok(output.raw)
    }

    /// Research then write, returning both task outputs
    pub async fn run(&self, query: &str) -> AgentResult<CrewOutput> {
        tracing::info!(query, "running research pipeline");
        self.crew.kickoff(&inputs(query)).await
    }
}

fn inputs(query: &str) -> HashMap<String, String> {
    HashMap::from([(QUERY_INPUT.to_string(), query.to_string())])
}
