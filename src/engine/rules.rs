//! Gap-detection rules.
//!
//! Each context has a fixed, ordered rule list. A rule fires when none of its
//! keywords occur in the lower-cased note, and firing yields one follow-up
//! question.

use crate::core::{Context, FollowUpQuestion};

/// A keyword-absence check paired with the question it raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRule {
    /// Question id (unique within a context)
    pub id: &'static str,

    /// Lower-case keywords; any one of them satisfies the rule
    pub keywords: &'static [&'static str],

    /// Question asked when the rule fires
    pub question: &'static str,

    /// Category label for the question
    pub category: &'static str,
}

impl GapRule {
    /// Whether the note already covers this rule.
    ///
    /// `lowered` must be lower-cased by the caller.
    pub fn is_satisfied(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }

    /// Build the question this rule raises.
    pub fn to_question(&self) -> FollowUpQuestion {
        FollowUpQuestion::new(self.id, self.question, self.category)
    }
}

const HEALTHCARE_RULES: &[GapRule] = &[
    GapRule {
        id: "q1",
        keywords: &["allergy"],
        question: "Does the patient have any known allergies?",
        category: "Safety",
    },
    GapRule {
        id: "q2",
        keywords: &["fluid", "intake"],
        question: "Is the patient on strict I/O monitoring or specific IV fluids?",
        category: "Clinical",
    },
];

const WORKPLACE_RULES: &[GapRule] = &[
    GapRule {
        id: "q1",
        keywords: &["link", "drive"],
        question: "Where are the relevant project documents or dashboards located?",
        category: "Resources",
    },
    GapRule {
        id: "q2",
        keywords: &["backup", "contact"],
        question: "Who is the primary point of contact if an emergency arises?",
        category: "Communication",
    },
];

/// Rule list for a context. Student and general notes have no rules yet.
pub fn rules_for(context: Context) -> &'static [GapRule] {
    match context {
        Context::Healthcare => HEALTHCARE_RULES,
        Context::Workplace => WORKPLACE_RULES,
        Context::Student | Context::General => &[],
    }
}

/// Questions raised by every rule the note fails, in rule order.
pub fn detect_gaps(context: Context, text: &str) -> Vec<FollowUpQuestion> {
    let lowered = text.to_lowercase();
    rules_for(context)
        .iter()
        .filter(|rule| !rule.is_satisfied(&lowered))
        .map(GapRule::to_question)
        .collect()
}
