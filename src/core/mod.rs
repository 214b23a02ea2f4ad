//! Core types for HandoverX.
//!
//! This module contains the data model shared by the analysis engine and the
//! workflow controller: contexts, questions, analyses, configuration and
//! errors.

mod config;
mod context;
mod error;
mod model;

pub use config::{Config, GeneralConfig, OutputConfig, OutputFormat, PacingConfig};
pub use context::{Context, ContextProfile};
pub use error::{
    ConfigError, ParseContextError, ParseFormatError, WorkflowError, WorkflowResult,
};
pub use model::{
    Analysis, AnswerMap, FollowUpQuestion, Reliability, Risk, Severity, MAX_CONFIDENCE,
};
