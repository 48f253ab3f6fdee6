//! Adapters for the collaborators the orchestrator reaches through ports.

pub mod audit_log;
pub mod in_memory;
pub mod listeners;
pub mod sandbox;
pub mod transport;
