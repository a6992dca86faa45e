use std::io;
use thiserror::Error;

/// Record-level invariant violations raised while constructing a claim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error(
        "No claim without evidence_ref: claims must have at least one supporting or counter evidence reference"
    )]
    NoEvidenceRefs,

    #[error("Confidence {0} is outside the closed interval [0.0, 1.0]")]
    ConfidenceOutOfRange(f64),
}

#[derive(Error, Debug)]
pub enum WatchtowerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Evidence not found: {evidence_id}")]
    ReferentialIntegrity { evidence_id: String },

    #[error("Plugin '{0}' is already registered")]
    DuplicateName(String),

    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    #[error("Invalid plugin configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl WatchtowerError {
    /// True for failures caused by the caller's input rather than the backend.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            WatchtowerError::Validation(_) | WatchtowerError::ReferentialIntegrity { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, WatchtowerError>;

// Downstream crates that need their own error type can wrap this one:
//
// #[derive(Error, Debug)]
// pub enum IngestError {
//     #[error("Upstream feed rejected: {0}")]
//     Feed(String),
//
//     #[error(transparent)]
//     Watchtower(#[from] WatchtowerError),
// }
