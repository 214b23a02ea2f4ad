//! # HandoverX
//!
//! Turn free-text handover notes into structured, risk-aware handover reports.
//!
//! A note is classified by context, checked for missing information with a
//! fixed set of keyword rules, optionally clarified through follow-up
//! questions, and summarised with a confidence score.
//!
//! ## Features
//!
//! - **Contexts**: Healthcare, workplace, student and general handovers
//! - **Gap Detection**: Deterministic rules raise follow-up questions
//! - **Workflow**: Explicit stage machine with cancellable pacing delays
//! - **Reports**: Plain text, Markdown and JSON output
//!
//! ## Quick Start
//!
//! ```no_run
//! use handoverx::{Config, Context, WorkflowRunner};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut runner = WorkflowRunner::from_config(&Config::default());
//! runner.select_context(Context::Workplace)?;
//! runner.set_submission_text("Report due Thursday. Sarah checks the budget.")?;
//! runner.start_analysis()?;
//! runner.settle().await?;
//!
//! for question in &runner.snapshot().questions {
//!     println!("{}: {}", question.category, question.question);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::format_push_string)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod core;
pub mod engine;
pub mod workflow;

// Re-export commonly used types
pub use crate::core::{
    Analysis, AnswerMap, Config, Context, ContextProfile, FollowUpQuestion, OutputFormat,
    PacingConfig, Reliability, Risk, Severity, WorkflowError, WorkflowResult,
};
pub use engine::{AnalysisEngine, RuleEngine};
pub use workflow::{HandoverController, SessionId, Snapshot, Stage, WorkflowRunner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "handoverx";
