//! Engine jobs scheduled by the controller and the results they deliver.

use std::time::Duration;

use crate::core::{Analysis, AnswerMap, Context, FollowUpQuestion, PacingConfig};
use crate::engine::AnalysisEngine;

use super::session::SessionId;

/// Work the controller hands to a scheduler when it enters a pending stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Produce questions and the initial analysis
    Analyze { session: SessionId, context: Context, text: String },

    /// Produce the final analysis, refined if answers were collected
    Generate { session: SessionId, analysis: Analysis, refinement: Option<Refinement> },
}

/// Inputs for refining an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    pub questions: Vec<FollowUpQuestion>,
    pub answers: AnswerMap,
}

/// Result of a finished job, tagged with the session that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Output of [`Job::Analyze`]
    Analyzed { session: SessionId, questions: Vec<FollowUpQuestion>, analysis: Analysis },

    /// Output of [`Job::Generate`]
    Generated { session: SessionId, analysis: Analysis, refined: bool },
}

impl Job {
    /// Session that scheduled this job.
    pub fn session(&self) -> SessionId {
        match self {
            Self::Analyze { session, .. } | Self::Generate { session, .. } => *session,
        }
    }

    /// Pacing delay before the result is delivered.
    pub fn delay(&self, pacing: &PacingConfig) -> Duration {
        match self {
            Self::Analyze { .. } => pacing.analyze_delay(),
            Self::Generate { .. } => pacing.generate_delay(),
        }
    }

    /// Run the job against an engine.
    pub fn run(self, engine: &dyn AnalysisEngine) -> Delivery {
        match self {
            Self::Analyze { session, context, text } => Delivery::Analyzed {
                session,
                questions: engine.generate_questions(context, &text),
                analysis: engine.generate_analysis(context, &text),
            },
            Self::Generate { session, analysis, refinement } => match refinement {
                Some(Refinement { questions, answers }) => Delivery::Generated {
                    session,
                    analysis: engine.refine_analysis(&analysis, &questions, &answers),
                    refined: true,
                },
                None => Delivery::Generated { session, analysis, refined: false },
            },
        }
    }
}

impl Delivery {
    /// Session the delivery belongs to.
    pub fn session(&self) -> SessionId {
        match self {
            Self::Analyzed { session, .. } | Self::Generated { session, .. } => *session,
        }
    }
}
