use std::sync::Arc;

use crate::agents::ResearchPipeline;

/// Shared, read-only state handed to every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Arc<ResearchPipeline>,
}

impl AppState {
    pub fn new(pipeline: ResearchPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
