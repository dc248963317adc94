//! Error types for Flowlane operations.
//!
//! Expected data inconsistencies (unreadable geometry payloads, links whose
//! sockets have no representation) never surface here; they are skipped
//! with a diagnostic log entry and recorded on the sync report. The
//! variants below cover the hard failures: structurally invalid process
//! graphs and invalid configuration.

use thiserror::Error;

/// The main error type for Flowlane operations.
#[derive(Debug, Error)]
pub enum FlowlaneError {
    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Config error: {0}")]
    Config(String),
}
