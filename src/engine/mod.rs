//! Analysis engine.
//!
//! Turns a note and its context into follow-up questions and a structured
//! [`Analysis`], and refines that analysis once answers are in.
//!
//! ## Engines
//!
//! - [`RuleEngine`] - deterministic keyword rules and report templates
//!
//! The workflow only talks to the [`AnalysisEngine`] trait, so a different
//! backend can be plugged in without touching the state machine.

mod heuristic;
pub mod report;
mod rules;

pub use heuristic::{RuleEngine, CONFIDENCE_BOOST, PREVIEW_CHARS};
pub use rules::{detect_gaps, rules_for, GapRule};

use crate::core::{Analysis, AnswerMap, Context, FollowUpQuestion};

/// Capability that derives questions and analyses from handover notes.
///
/// Implementations must be pure and total: identical inputs give identical
/// outputs and no input makes them fail. Timing is the caller's business.
pub trait AnalysisEngine: Send + Sync {
    /// Questions for information missing from `text`.
    fn generate_questions(&self, context: Context, text: &str) -> Vec<FollowUpQuestion>;

    /// Initial analysis of `text`.
    fn generate_analysis(&self, context: Context, text: &str) -> Analysis;

    /// Fold follow-up answers into an analysis.
    ///
    /// Answers whose id is not among `questions` are ignored.
    fn refine_analysis(
        &self,
        analysis: &Analysis,
        questions: &[FollowUpQuestion],
        answers: &AnswerMap,
    ) -> Analysis;

    /// Engine name, for logs.
    fn name(&self) -> &str;
}
