//! Handover contexts.
//!
//! A context selects which gap-detection rules apply to a note and carries
//! the static copy a front-end shows next to the note editor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseContextError;

/// Domain category of a handover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    /// Shift changes and clinical handovers
    Healthcare,
    /// Project status and task delegation
    Workplace,
    /// Group assignments and research sharing
    Student,
    /// Anything else
    #[default]
    General,
}

/// Presentation metadata for a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextProfile {
    /// Human-readable name
    pub label: &'static str,

    /// One-line description of typical handovers
    pub description: &'static str,

    /// Prompt shown in an empty note editor
    pub placeholder: &'static str,

    /// Canned example note
    pub sample: &'static str,
}

impl Context {
    /// All contexts, in display order.
    pub const ALL: [Self; 4] = [Self::Healthcare, Self::Workplace, Self::Student, Self::General];

    /// Lower-case key used in config files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Healthcare => "healthcare",
            Self::Workplace => "workplace",
            Self::Student => "student",
            Self::General => "general",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        self.profile().label
    }

    /// Static presentation metadata.
    pub fn profile(self) -> ContextProfile {
        match self {
            Self::Healthcare => ContextProfile {
                label: "Healthcare",
                description: "Shift changes, patient status, clinical handovers",
                placeholder: "Describe the patient status, meds given, upcoming vitals, and any urgent concerns...",
                sample: "Patient in room 302, John Doe, post-op day 1. Stable but needs vitals every 4h. Dr. Smith wants to be notified if BP drops below 100/60. Meds given at 2pm. Pain management started.",
            },
            Self::Workplace => ContextProfile {
                label: "Workplace",
                description: "Project status, out-of-office, task delegation",
                placeholder: "List pending tasks, blockers, deadlines, and key contacts...",
                sample: "Finalizing the Q4 marketing report. Most slides done but need Sarah to verify the budget figures in slide 12. Deadline is Thursday 5pm. Client call scheduled for tomorrow morning.",
            },
            Self::Student => ContextProfile {
                label: "Student Project",
                description: "Group assignments, lab work, research sharing",
                placeholder: "Detail your contribution, next steps for the team, and resource locations...",
                sample: "Finished the literature review section. Still need to run the data analysis on the new survey results. All files are in the shared Drive folder under 'Drafts'. Meeting set for Friday.",
            },
            Self::General => ContextProfile {
                label: "General",
                description: "Household chores, pet care, event planning",
                placeholder: "General handover details, instructions, or status updates...",
                sample: "Feeding the cat twice a day, 1 scoop each. Please water the plants in the living room on Wednesday. Keys are under the mat if the neighbor stops by.",
            },
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Context {
    type Err = ParseContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|ctx| ctx.key() == wanted)
            .ok_or_else(|| ParseContextError(s.to_string()))
    }
}
