//! Session data and read-only snapshots.

use std::fmt;

use serde::Serialize;

use crate::core::{Analysis, AnswerMap, Context, FollowUpQuestion};

use super::stage::Stage;

/// Identifier of one session. Bumped on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct SessionId(u64);

impl SessionId {
    /// The session after this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything a session owns. Dropped as a whole on reset.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub id: SessionId,
    pub context: Context,
    pub text: String,
    pub questions: Vec<FollowUpQuestion>,
    pub answers: AnswerMap,
    pub analysis: Option<Analysis>,
    pub refined: bool,
}

impl Session {
    pub fn new(id: SessionId, context: Context) -> Self {
        Self {
            id,
            context,
            text: String::new(),
            questions: Vec::new(),
            answers: AnswerMap::new(),
            analysis: None,
            refined: false,
        }
    }

    pub fn snapshot(&self, stage: Stage) -> Snapshot {
        Snapshot {
            session: self.id,
            stage,
            context: self.context,
            text: self.text.clone(),
            questions: self.questions.clone(),
            answers: self.answers.clone(),
            analysis: self.analysis.clone(),
            refined: self.refined,
        }
    }
}

/// Read-only view of the workflow for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Live session
    pub session: SessionId,

    /// Current stage
    pub stage: Stage,

    /// Selected context
    pub context: Context,

    /// Note text as entered
    pub text: String,

    /// Generated follow-up questions (empty before analysis)
    pub questions: Vec<FollowUpQuestion>,

    /// Answers collected so far
    pub answers: AnswerMap,

    /// Current analysis, if any
    pub analysis: Option<Analysis>,

    /// Whether the analysis has been refined with answers
    pub refined: bool,
}

impl Snapshot {
    /// Length of the note in characters.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the note would pass the start-analysis check.
    pub fn can_start(&self) -> bool {
        self.stage == Stage::Setup && !self.text.trim().is_empty()
    }
}
