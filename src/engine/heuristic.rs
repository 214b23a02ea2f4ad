//! Rule-based analysis engine.
//!
//! No inference happens here: questions come from the gap rules and the
//! analysis is a fixed report skeleton whose only input-driven parts are the
//! overview preview and the confidence score.

use crate::core::{
    Analysis, AnswerMap, Context, FollowUpQuestion, Risk, Severity, MAX_CONFIDENCE,
};

use super::rules::detect_gaps;
use super::AnalysisEngine;

/// Characters of the note quoted in the overview.
pub const PREVIEW_CHARS: usize = 50;

/// Score added by refinement.
pub const CONFIDENCE_BOOST: u8 = 15;

/// Notes longer than this (trimmed, in chars) count as detailed.
const DETAILED_NOTE_CHARS: usize = 100;

const DETAILED_CONFIDENCE: u8 = 85;
const BRIEF_CONFIDENCE: u8 = 65;

const RESPONSIBILITIES: [&str; 3] = [
    "Monitoring ongoing status",
    "Ensuring deadline compliance",
    "Coordinating with relevant stakeholders",
];

const TASKS: [&str; 3] = [
    "Review current documentation",
    "Execute pending items mentioned in input",
    "Confirm receipt of handover",
];

const NEXT_ACTIONS: [&str; 3] =
    ["Schedule follow-up check-in", "Update central tracking system", "Verify resource access"];

/// Deterministic engine backed by keyword rules and templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Create a new rule engine.
    pub fn new() -> Self {
        Self
    }
}

impl AnalysisEngine for RuleEngine {
    fn generate_questions(&self, context: Context, text: &str) -> Vec<FollowUpQuestion> {
        let questions = detect_gaps(context, text);
        tracing::debug!(%context, count = questions.len(), "Detected information gaps");
        questions
    }

    fn generate_analysis(&self, context: Context, text: &str) -> Analysis {
        // Preview quotes the note as written; only the confidence rule trims.
        let preview = if text.chars().count() > PREVIEW_CHARS {
            let head: String = text.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            "provided information".to_string()
        };

        let confidence_score = if text.trim().chars().count() > DETAILED_NOTE_CHARS {
            DETAILED_CONFIDENCE
        } else {
            BRIEF_CONFIDENCE
        };

        Analysis {
            overview: format!(
                "Structured handover for {preview} in a {} context.",
                context.label()
            ),
            responsibilities: to_owned_list(&RESPONSIBILITIES),
            tasks: to_owned_list(&TASKS),
            risks: vec![
                Risk::new(
                    Severity::High,
                    "Potential information gap in specific procedural details.",
                ),
                Risk::new(Severity::Medium, "Dependency on external party verification."),
            ],
            next_actions: to_owned_list(&NEXT_ACTIONS),
            confidence_score,
        }
    }

    fn refine_analysis(
        &self,
        analysis: &Analysis,
        questions: &[FollowUpQuestion],
        answers: &AnswerMap,
    ) -> Analysis {
        let mut refined = analysis.clone();
        refined.confidence_score =
            analysis.confidence_score.saturating_add(CONFIDENCE_BOOST).min(MAX_CONFIDENCE);

        for question in questions {
            if let Some(answer) = answers.get(&question.id) {
                refined.tasks.push(format!("Follow-up: {} - {}", question.question, answer));
            }
        }

        refined
    }

    fn name(&self) -> &str {
        "rules"
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
