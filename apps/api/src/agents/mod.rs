// Agent system modules
//
// Role-bound agents with a tool loop, task templates, and the sequential
// crew that threads each task's output into the next.

pub mod agent;
pub mod crew;
pub mod errors;
pub mod pipeline;
pub mod prompts;
pub mod task;
pub mod tools;
pub mod types;

// Re-export main types
pub use agent::{Agent, AgentRun, AgentSettings};
pub use crew::Crew;
pub use errors::{AgentError, AgentResult};
pub use pipeline::ResearchPipeline;
pub use task::Task;
pub use tools::{SearchTool, Tool};
pub use types::{CrewOutput, TaskOutput};
