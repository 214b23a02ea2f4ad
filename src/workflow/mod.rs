//! Handover workflow.
//!
//! A submission moves through a fixed sequence of stages:
//!
//! - `setup` - choose a context and write the note
//! - `analyzing` - the engine looks for gaps
//! - `follow-up` - answer clarifying questions (skipped when there are none)
//! - `generating` - the final report is assembled
//! - `summary` - the report is shown until reset
//!
//! ## Components
//!
//! - `HandoverController` - synchronous state machine owning the session
//! - `WorkflowRunner` - async driver applying pacing delays with cancellation

mod controller;
mod job;
mod runner;
mod session;
mod stage;

pub use controller::HandoverController;
pub use job::{Delivery, Job, Refinement};
pub use runner::WorkflowRunner;
pub use session::{SessionId, Snapshot};
pub use stage::{Action, Stage};
