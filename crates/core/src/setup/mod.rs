//! One-shot database setup workflow.
//!
//! [`orchestrator::SetupOrchestrator`] gates on the completion marker, finds
//! a reachable database host, runs the initialization script against it, and
//! records completion. Each collaborator sits behind a trait so tests and
//! alternative deployments can swap it.

pub mod config;
pub mod marker;
pub mod orchestrator;
pub mod probe;
pub mod resolver;
