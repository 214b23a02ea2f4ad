//! Workflow stages and the actions each one accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One phase of the handover workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Choosing a context and writing the note
    #[default]
    Setup,
    /// Waiting for the engine's questions and initial analysis
    Analyzing,
    /// Answering clarifying questions
    FollowUp,
    /// Waiting for the final report
    Generating,
    /// Final report on display
    Summary,
}

/// Inbound user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectContext,
    SetSubmissionText,
    LoadDemo,
    StartAnalysis,
    SetAnswer,
    CompleteAnalysis,
    SkipQuestions,
    Reset,
}

impl Action {
    /// Name used in errors and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::SelectContext => "select a context",
            Self::SetSubmissionText => "edit the note",
            Self::LoadDemo => "load the demo note",
            Self::StartAnalysis => "start analysis",
            Self::SetAnswer => "answer a question",
            Self::CompleteAnalysis => "complete analysis",
            Self::SkipQuestions => "skip questions",
            Self::Reset => "reset",
        }
    }
}

impl Stage {
    /// Whether `action` is valid in this stage.
    ///
    /// `Reset` is accepted everywhere; every other action belongs to exactly
    /// one stage.
    pub fn accepts(self, action: Action) -> bool {
        match (self, action) {
            (_, Action::Reset) => true,
            (
                Self::Setup,
                Action::SelectContext
                | Action::SetSubmissionText
                | Action::LoadDemo
                | Action::StartAnalysis,
            ) => true,
            (
                Self::FollowUp,
                Action::SetAnswer | Action::CompleteAnalysis | Action::SkipQuestions,
            ) => true,
            _ => false,
        }
    }

    /// Stages that wait on a scheduled delivery and take no user input.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Analyzing | Self::Generating)
    }

    /// Stages in which an analysis exists.
    pub fn has_analysis(self) -> bool {
        matches!(self, Self::FollowUp | Self::Generating | Self::Summary)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Analyzing => "analyzing",
            Self::FollowUp => "follow-up",
            Self::Generating => "generating",
            Self::Summary => "summary",
        })
    }
}
