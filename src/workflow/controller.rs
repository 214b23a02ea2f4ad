//! Handover workflow controller.
//!
//! Owns the stage state machine and all session data. The controller never
//! waits: actions that enter a pending stage return a [`Job`], and whoever
//! drives the controller runs that job (after its pacing delay) and feeds the
//! resulting [`Delivery`] back through [`HandoverController::apply`].
//!
//! ```text
//! setup --start--> analyzing --(questions)--> follow-up --complete--> generating --> summary
//!                      |                          |                      ^
//!                      +------(no questions)------+-------skip-----------+-------> summary
//!
//! any stage --reset--> setup
//! ```

use crate::core::{
    Analysis, AnswerMap, Config, Context, FollowUpQuestion, WorkflowError, WorkflowResult,
};

use super::job::{Delivery, Job, Refinement};
use super::session::{Session, SessionId, Snapshot};
use super::stage::{Action, Stage};

/// State machine for one handover at a time.
#[derive(Debug, Clone)]
pub struct HandoverController {
    /// Context restored on reset
    default_context: Context,

    /// Current stage
    stage: Stage,

    /// Live session data
    session: Session,
}

impl HandoverController {
    /// Create a controller whose sessions start in `default_context`.
    pub fn new(default_context: Context) -> Self {
        Self {
            default_context,
            stage: Stage::Setup,
            session: Session::new(SessionId::default(), default_context),
        }
    }

    /// Create a controller from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.general.default_context)
    }

    // ------------------------------------------------------------------
    // Outbound state
    // ------------------------------------------------------------------

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Live session identifier.
    pub fn session_id(&self) -> SessionId {
        self.session.id
    }

    /// Selected context.
    pub fn context(&self) -> Context {
        self.session.context
    }

    /// Note text.
    pub fn text(&self) -> &str {
        &self.session.text
    }

    /// Generated questions.
    pub fn questions(&self) -> &[FollowUpQuestion] {
        &self.session.questions
    }

    /// Collected answers.
    pub fn answers(&self) -> &AnswerMap {
        &self.session.answers
    }

    /// Current analysis, if one exists.
    pub fn analysis(&self) -> Option<&Analysis> {
        self.session.analysis.as_ref()
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot(self.stage)
    }

    // ------------------------------------------------------------------
    // Inbound actions
    // ------------------------------------------------------------------

    /// Choose the handover context.
    pub fn select_context(&mut self, context: Context) -> WorkflowResult<()> {
        self.ensure(Action::SelectContext)?;
        self.session.context = context;
        Ok(())
    }

    /// Replace the note text.
    pub fn set_submission_text(&mut self, text: impl Into<String>) -> WorkflowResult<()> {
        self.ensure(Action::SetSubmissionText)?;
        self.session.text = text.into();
        Ok(())
    }

    /// Fill the form with the healthcare sample note.
    pub fn load_demo(&mut self) -> WorkflowResult<()> {
        self.ensure(Action::LoadDemo)?;
        self.session.context = Context::Healthcare;
        self.session.text = Context::Healthcare.profile().sample.to_string();
        Ok(())
    }

    /// Submit the note for analysis.
    ///
    /// Returns `Ok(None)` without changing anything when the note is blank.
    pub fn start_analysis(&mut self) -> WorkflowResult<Option<Job>> {
        self.ensure(Action::StartAnalysis)?;

        if self.session.text.trim().is_empty() {
            tracing::debug!(session = %self.session.id, "Ignoring start with an empty note");
            return Ok(None);
        }

        self.enter(Stage::Analyzing);
        Ok(Some(Job::Analyze {
            session: self.session.id,
            context: self.session.context,
            text: self.session.text.clone(),
        }))
    }

    /// Record the answer to a follow-up question.
    ///
    /// A blank answer clears any previous one.
    pub fn set_answer(&mut self, question_id: &str, text: impl Into<String>) -> WorkflowResult<()> {
        self.ensure(Action::SetAnswer)?;

        if !self.session.questions.iter().any(|q| q.id == question_id) {
            return Err(WorkflowError::UnknownQuestion(question_id.to_string()));
        }

        let text = text.into();
        if text.trim().is_empty() {
            self.session.answers.remove(question_id);
        } else {
            self.session.answers.insert(question_id.to_string(), text);
        }
        Ok(())
    }

    /// Finish the follow-up stage and refine the analysis with the answers.
    pub fn complete_analysis(&mut self) -> WorkflowResult<Job> {
        self.ensure(Action::CompleteAnalysis)?;
        let analysis = self.current_analysis()?;

        self.enter(Stage::Generating);
        Ok(Job::Generate {
            session: self.session.id,
            analysis,
            refinement: Some(Refinement {
                questions: self.session.questions.clone(),
                answers: self.session.answers.clone(),
            }),
        })
    }

    /// Drop the answers and go straight to the summary.
    pub fn skip_questions(&mut self) -> WorkflowResult<()> {
        self.ensure(Action::SkipQuestions)?;
        self.session.answers.clear();
        self.enter(Stage::Summary);
        Ok(())
    }

    /// Discard the session and start over.
    ///
    /// Returns the new session id. Deliveries for older sessions are ignored
    /// from here on.
    pub fn reset(&mut self) -> SessionId {
        let previous = self.session.id;
        self.session = Session::new(previous.next(), self.default_context);
        self.stage = Stage::Setup;
        tracing::info!(from = %previous, to = %self.session.id, "Session reset");
        self.session.id
    }

    // ------------------------------------------------------------------
    // Deliveries
    // ------------------------------------------------------------------

    /// Apply a finished job.
    ///
    /// Deliveries for a superseded session are ignored. A delivery may
    /// schedule a follow-on job (analysis without questions goes straight to
    /// generating).
    pub fn apply(&mut self, delivery: Delivery) -> WorkflowResult<Option<Job>> {
        if delivery.session() != self.session.id {
            tracing::debug!(
                delivered = %delivery.session(),
                live = %self.session.id,
                "Dropping delivery for superseded session"
            );
            return Ok(None);
        }

        match (self.stage, delivery) {
            (Stage::Analyzing, Delivery::Analyzed { questions, analysis, .. }) => {
                let no_questions = questions.is_empty();
                self.session.questions = questions;
                self.session.analysis = Some(analysis.clone());

                if no_questions {
                    self.enter(Stage::Generating);
                    Ok(Some(Job::Generate { session: self.session.id, analysis, refinement: None }))
                } else {
                    self.enter(Stage::FollowUp);
                    Ok(None)
                }
            }
            (Stage::Generating, Delivery::Generated { analysis, refined, .. }) => {
                self.session.analysis = Some(analysis);
                self.session.refined = refined;
                self.enter(Stage::Summary);
                Ok(None)
            }
            (stage, _) => {
                Err(WorkflowError::StaleDelivery { session: self.session.id, stage })
            }
        }
    }

    fn ensure(&self, action: Action) -> WorkflowResult<()> {
        if self.stage.accepts(action) {
            Ok(())
        } else {
            tracing::warn!(stage = %self.stage, action = action.name(), "Rejected action");
            Err(WorkflowError::InvalidTransition { action: action.name(), stage: self.stage })
        }
    }

    fn current_analysis(&self) -> WorkflowResult<Analysis> {
        self.session
            .analysis
            .clone()
            .ok_or(WorkflowError::StaleDelivery { session: self.session.id, stage: self.stage })
    }

    fn enter(&mut self, stage: Stage) {
        tracing::info!(session = %self.session.id, from = %self.stage, to = %stage, "Stage transition");
        self.stage = stage;
    }
}

impl Default for HandoverController {
    fn default() -> Self {
        Self::new(Context::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AnalysisEngine, RuleEngine};

    /// Run jobs synchronously until the controller stops scheduling them.
    fn drive(controller: &mut HandoverController, job: Option<Job>) {
        let engine = RuleEngine::new();
        let mut next = job;
        while let Some(job) = next {
            next = controller.apply(job.run(&engine)).unwrap();
        }
    }

    fn controller_with(context: Context, text: &str) -> HandoverController {
        let mut controller = HandoverController::default();
        controller.select_context(context).unwrap();
        controller.set_submission_text(text).unwrap();
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = HandoverController::default();
        assert_eq!(controller.stage(), Stage::Setup);
        assert_eq!(controller.context(), Context::General);
        assert!(controller.text().is_empty());
        assert!(controller.analysis().is_none());
    }

    #[test]
    fn test_blank_note_is_a_no_op() {
        let mut controller = controller_with(Context::Healthcare, "   \n\t ");
        assert_eq!(controller.start_analysis().unwrap(), None);
        assert_eq!(controller.stage(), Stage::Setup);
        assert!(controller.analysis().is_none());
    }

    #[test]
    fn test_start_enters_analyzing() {
        let mut controller = controller_with(Context::Healthcare, "Patient stable.");
        let job = controller.start_analysis().unwrap().unwrap();
        assert_eq!(controller.stage(), Stage::Analyzing);
        assert!(controller.analysis().is_none());
        assert_eq!(job.session(), controller.session_id());
    }

    #[test]
    fn test_questions_lead_to_follow_up() {
        let mut controller = controller_with(Context::Healthcare, "Patient stable.");
        let job = controller.start_analysis().unwrap();
        drive(&mut controller, job);

        assert_eq!(controller.stage(), Stage::FollowUp);
        assert_eq!(controller.questions().len(), 2);
        assert!(controller.analysis().is_some());
    }

    #[test]
    fn test_no_questions_skip_follow_up() {
        let mut controller =
            controller_with(Context::Healthcare, "No allergy known. Fluid intake noted.");
        let job = controller.start_analysis().unwrap().unwrap();

        let follow_on = controller.apply(job.run(&RuleEngine::new())).unwrap();
        assert_eq!(controller.stage(), Stage::Generating);
        assert!(controller.analysis().is_some());

        drive(&mut controller, follow_on);
        assert_eq!(controller.stage(), Stage::Summary);
        assert!(!controller.snapshot().refined);
    }

    #[test]
    fn test_complete_refines_analysis() {
        let text = "a".repeat(150);
        let mut controller = controller_with(Context::Healthcare, &text);
        let job = controller.start_analysis().unwrap();
        drive(&mut controller, job);
        assert_eq!(controller.analysis().unwrap().confidence_score, 85);

        controller.set_answer("q1", "None known").unwrap();
        let job = controller.complete_analysis().unwrap();
        assert_eq!(controller.stage(), Stage::Generating);
        drive(&mut controller, Some(job));

        let analysis = controller.analysis().unwrap();
        assert_eq!(controller.stage(), Stage::Summary);
        assert_eq!(analysis.confidence_score, 100);
        assert_eq!(analysis.tasks.len(), 4);
        assert_eq!(
            analysis.tasks[3],
            "Follow-up: Does the patient have any known allergies? - None known"
        );
        assert!(controller.snapshot().refined);
    }

    #[test]
    fn test_skip_leaves_analysis_unrefined() {
        let mut controller = controller_with(Context::Workplace, "Wrap up the report.");
        let job = controller.start_analysis().unwrap();
        drive(&mut controller, job);
        let before = controller.analysis().cloned();

        controller.set_answer("q1", "Shared drive").unwrap();
        controller.skip_questions().unwrap();

        assert_eq!(controller.stage(), Stage::Summary);
        assert!(controller.answers().is_empty());
        assert_eq!(controller.analysis().cloned(), before);
    }

    #[test]
    fn test_blank_answer_clears_entry() {
        let mut controller = controller_with(Context::Workplace, "Wrap up the report.");
        let job = controller.start_analysis().unwrap();
        drive(&mut controller, job);

        controller.set_answer("q2", "Sam").unwrap();
        controller.set_answer("q2", "  ").unwrap();
        assert!(controller.answers().is_empty());
    }

    #[test]
    fn test_unknown_answer_rejected() {
        let mut controller = controller_with(Context::Workplace, "Wrap up the report.");
        let job = controller.start_analysis().unwrap();
        drive(&mut controller, job);

        let err = controller.set_answer("q9", "?").unwrap_err();
        assert_eq!(err, WorkflowError::UnknownQuestion("q9".to_string()));
    }

    #[test]
    fn test_out_of_stage_actions_rejected() {
        let mut controller = controller_with(Context::General, "Water the plants.");
        assert!(matches!(
            controller.complete_analysis(),
            Err(WorkflowError::InvalidTransition { stage: Stage::Setup, .. })
        ));

        controller.start_analysis().unwrap();
        assert!(controller.set_submission_text("changed").is_err());
        assert!(controller.select_context(Context::Student).is_err());
        assert!(controller.start_analysis().is_err());
        assert!(controller.skip_questions().is_err());
        assert_eq!(controller.text(), "Water the plants.");
        assert_eq!(controller.stage(), Stage::Analyzing);
    }

    #[test]
    fn test_reset_from_every_stage() {
        let mut controller = HandoverController::new(Context::Workplace);

        // setup
        controller.set_submission_text("Wrap up").unwrap();
        controller.reset();
        assert_eq!(controller.snapshot().text, "");

        // analyzing
        controller.set_submission_text("Wrap up").unwrap();
        controller.start_analysis().unwrap();
        controller.reset();
        assert_eq!(controller.stage(), Stage::Setup);

        // follow-up
        controller.set_submission_text("Wrap up").unwrap();
        let job = controller.start_analysis().unwrap();
        drive(&mut controller, job);
        controller.set_answer("q1", "drive").unwrap();
        controller.reset();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.stage, Stage::Setup);
        assert_eq!(snapshot.context, Context::Workplace);
        assert!(snapshot.text.is_empty());
        assert!(snapshot.questions.is_empty());
        assert!(snapshot.answers.is_empty());
        assert!(snapshot.analysis.is_none());
        assert!(!snapshot.refined);
    }

    #[test]
    fn test_reset_restores_default_context() {
        let mut controller = HandoverController::new(Context::Student);
        controller.select_context(Context::Healthcare).unwrap();
        controller.reset();
        assert_eq!(controller.context(), Context::Student);
    }

    #[test]
    fn test_superseded_delivery_ignored() {
        let mut controller = controller_with(Context::Healthcare, "Patient stable.");
        let stale_job = controller.start_analysis().unwrap().unwrap();
        let stale = stale_job.run(&RuleEngine::new());

        controller.reset();
        controller.set_submission_text("New note").unwrap();

        assert_eq!(controller.apply(stale).unwrap(), None);
        assert_eq!(controller.stage(), Stage::Setup);
        assert_eq!(controller.text(), "New note");
        assert!(controller.questions().is_empty());
    }

    #[test]
    fn test_delivery_in_wrong_stage_is_an_error() {
        let mut controller = controller_with(Context::Student, "Lit review done.");
        let engine = RuleEngine::new();
        let delivery = Delivery::Generated {
            session: controller.session_id(),
            analysis: engine.generate_analysis(Context::Student, "Lit review done."),
            refined: false,
        };

        assert!(matches!(
            controller.apply(delivery),
            Err(WorkflowError::StaleDelivery { stage: Stage::Setup, .. })
        ));
    }

    #[test]
    fn test_load_demo() {
        let mut controller = HandoverController::default();
        controller.load_demo().unwrap();
        assert_eq!(controller.context(), Context::Healthcare);
        assert!(controller.text().starts_with("Patient in room 302"));
    }

    #[test]
    fn test_analysis_exists_only_in_analysis_stages() {
        let mut controller = controller_with(Context::Healthcare, "Patient stable.");
        assert_eq!(controller.analysis().is_some(), controller.stage().has_analysis());

        let job = controller.start_analysis().unwrap();
        assert_eq!(controller.analysis().is_some(), controller.stage().has_analysis());

        drive(&mut controller, job);
        assert_eq!(controller.analysis().is_some(), controller.stage().has_analysis());

        let job = controller.complete_analysis().unwrap();
        assert_eq!(controller.analysis().is_some(), controller.stage().has_analysis());

        drive(&mut controller, Some(job));
        assert_eq!(controller.analysis().is_some(), controller.stage().has_analysis());
    }
}
