use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reaching or reading the completion backend. Contained inside
/// `Agent::think`, which substitutes failure-tagged content so the rest of
/// the pipeline keeps moving.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ProviderError {
    #[error("Failed to reach completion endpoint: {0}")]
    Connection(String),

    #[error("Completion endpoint returned status {0}")]
    Status(u16),

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Failure persisting a structured document to the workspace.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum RenderError {
    #[error("Failed to create workspace at {path}: {reason}")]
    Workspace { path: String, reason: String },

    #[error("Failed to write document {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Failure assembling or sending one delivery package. One attempt, one
/// outcome for the whole package.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum DeliveryError {
    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("Failed to assemble message: {0}")]
    Assembly(String),

    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Errors surfaced at the orchestration boundary. Everything else is
/// contained at the step that produced it and reported inside the run.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum PipelineError {
    #[error("Project request must not be empty")]
    EmptyRequest,

    #[error("Agent task must not be empty")]
    EmptyTask,

    #[error("Prompt rendering failed: {0}")]
    Template(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
