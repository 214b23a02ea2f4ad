//! Error types for HandoverX.

use std::path::PathBuf;

use thiserror::Error;

use crate::workflow::{SessionId, Stage};

/// Result type for workflow actions.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors raised by the workflow controller and runner.
///
/// The analysis engine itself never fails; these only describe misuse of the
/// state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Action invoked in a stage that does not accept it.
    #[error("Cannot {action} while in the {stage} stage")]
    InvalidTransition { action: &'static str, stage: Stage },

    /// Answer supplied for a question that was never generated.
    #[error("Unknown follow-up question: {0}")]
    UnknownQuestion(String),

    /// Delivery for the live session arrived in a stage that was not waiting for it.
    #[error("Unexpected delivery for session {session} in the {stage} stage")]
    StaleDelivery { session: SessionId, stage: Stage },
}

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not determine the platform config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// IO error.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization failure.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Unrecognised context key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown context '{0}' (expected healthcare, workplace, student or general)")]
pub struct ParseContextError(pub String);

/// Unrecognised output format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown output format '{0}' (expected text, markdown or json)")]
pub struct ParseFormatError(pub String);
