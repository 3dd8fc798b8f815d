//! A2A Orchestrator Library
//!
//! This library discovers remote agents through their capability cards,
//! picks one for each submitted work item and forwards the item over the
//! JSON-RPC task protocol.

pub mod agents;
pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
