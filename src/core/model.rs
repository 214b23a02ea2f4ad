//! Handover data model.
//!
//! Follow-up questions, risks and the structured analysis produced by the
//! engine. Everything here is plain data; the rules that build it live in
//! [`crate::engine`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of the confidence score.
pub const MAX_CONFIDENCE: u8 = 100;

/// Collected follow-up answers, keyed by question id.
pub type AnswerMap = HashMap<String, String>;

/// A clarifying question generated for a missing piece of information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    /// Identifier, unique within one generation
    pub id: String,

    /// Question text shown to the user
    pub question: String,

    /// Short category label (e.g., "Safety")
    pub category: String,
}

impl FollowUpQuestion {
    /// Create a new question.
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), question: question.into(), category: category.into() }
    }
}

/// Risk severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    /// Upper-case badge text.
    pub fn badge(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("high"),
            Self::Medium => f.write_str("medium"),
        }
    }
}

/// A flagged risk in a handover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub severity: Severity,
    pub message: String,
}

impl Risk {
    /// Create a new risk.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self { severity, message: message.into() }
    }
}

/// Structured handover report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// One-sentence summary of the handover
    pub overview: String,

    /// Ongoing duties the receiver takes over
    pub responsibilities: Vec<String>,

    /// Concrete tasks, including answered follow-ups after refinement
    pub tasks: Vec<String>,

    /// Flagged risks
    pub risks: Vec<Risk>,

    /// Recommended next steps, in order
    pub next_actions: Vec<String>,

    /// Completeness heuristic in `0..=100`
    pub confidence_score: u8,
}

impl Analysis {
    /// Reliability band for the current confidence score.
    pub fn reliability(&self) -> Reliability {
        Reliability::from_score(self.confidence_score)
    }

    /// Number of high-severity risks.
    pub fn high_risk_count(&self) -> usize {
        self.risks.iter().filter(|r| r.severity == Severity::High).count()
    }
}

/// Coarse reading of the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    /// Score above 80
    High,
    /// Score of 80 or below
    Moderate,
}

impl Reliability {
    /// Band for a confidence score.
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            Self::High
        } else {
            Self::Moderate
        }
    }

    /// Sentence describing the band.
    pub fn description(self) -> &'static str {
        match self {
            Self::High => "High reliability. Information is well-structured and complete.",
            Self::Moderate => "Moderate reliability. Some gaps may still exist.",
        }
    }
}
