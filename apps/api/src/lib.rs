//! Research Crew API Library
//!
//! A two-agent "research then write" pipeline served over HTTP: a Researcher
//! agent investigates a query with web search, a Writer agent drafts the
//! answer, and `POST /predict` exposes the pair.

pub mod agents;
pub mod api;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod infrastructure;
