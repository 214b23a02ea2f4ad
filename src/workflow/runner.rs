//! Async driver for the handover controller.
//!
//! Runs engine jobs on the tokio runtime after their pacing delay and feeds
//! the results back into the controller. Resetting cancels every in-flight
//! job; anything that slips through is dropped by the controller's session
//! check.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{Config, Context, PacingConfig, WorkflowResult};
use crate::engine::{AnalysisEngine, RuleEngine};

use super::controller::HandoverController;
use super::job::{Delivery, Job};
use super::session::{SessionId, Snapshot};
use super::stage::Stage;

/// Drives a [`HandoverController`] with real (cancellable) delays.
///
/// Action methods never block; they must be called from within a tokio
/// runtime because they may spawn jobs.
pub struct WorkflowRunner {
    controller: HandoverController,
    engine: Arc<dyn AnalysisEngine>,
    pacing: PacingConfig,
    deliveries_tx: mpsc::UnboundedSender<Delivery>,
    deliveries_rx: mpsc::UnboundedReceiver<Delivery>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for WorkflowRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowRunner")
            .field("engine", &self.engine.name())
            .field("stage", &self.controller.stage())
            .field("session", &self.controller.session_id())
            .field("pacing", &self.pacing)
            .finish()
    }
}

impl WorkflowRunner {
    /// Create a runner around an engine.
    pub fn new(
        engine: Arc<dyn AnalysisEngine>,
        pacing: PacingConfig,
        default_context: Context,
    ) -> Self {
        let (deliveries_tx, deliveries_rx) = mpsc::unbounded_channel();
        Self {
            controller: HandoverController::new(default_context),
            engine,
            pacing,
            deliveries_tx,
            deliveries_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Create a rule-engine runner from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(RuleEngine::new()), config.pacing, config.general.default_context)
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.controller.stage()
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        self.controller.snapshot()
    }

    /// Choose the handover context.
    pub fn select_context(&mut self, context: Context) -> WorkflowResult<()> {
        self.controller.select_context(context)
    }

    /// Replace the note text.
    pub fn set_submission_text(&mut self, text: impl Into<String>) -> WorkflowResult<()> {
        self.controller.set_submission_text(text)
    }

    /// Fill the form with the demo note.
    pub fn load_demo(&mut self) -> WorkflowResult<()> {
        self.controller.load_demo()
    }

    /// Submit the note. Returns `false` when the note was blank.
    pub fn start_analysis(&mut self) -> WorkflowResult<bool> {
        match self.controller.start_analysis()? {
            Some(job) => {
                self.spawn(job);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Record a follow-up answer.
    pub fn set_answer(&mut self, question_id: &str, text: impl Into<String>) -> WorkflowResult<()> {
        self.controller.set_answer(question_id, text)
    }

    /// Finish follow-up and generate the refined report.
    pub fn complete_analysis(&mut self) -> WorkflowResult<()> {
        let job = self.controller.complete_analysis()?;
        self.spawn(job);
        Ok(())
    }

    /// Skip the remaining questions.
    pub fn skip_questions(&mut self) -> WorkflowResult<()> {
        self.controller.skip_questions()
    }

    /// Cancel pending work and start a clean session.
    pub fn reset(&mut self) -> SessionId {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.controller.reset()
    }

    /// Wait for the next delivery and apply it.
    ///
    /// Returns the current stage at once when no job is in flight.
    /// Deliveries for superseded sessions are consumed and ignored.
    pub async fn next_delivery(&mut self) -> WorkflowResult<Stage> {
        if !self.controller.stage().is_pending() {
            return Ok(self.controller.stage());
        }

        // The runner holds a sender, so the channel never closes.
        if let Some(delivery) = self.deliveries_rx.recv().await {
            if let Some(job) = self.controller.apply(delivery)? {
                self.spawn(job);
            }
        }
        Ok(self.controller.stage())
    }

    /// Wait until the workflow leaves its pending stages.
    ///
    /// Returns immediately when nothing is pending.
    pub async fn settle(&mut self) -> WorkflowResult<Stage> {
        while self.controller.stage().is_pending() {
            self.next_delivery().await?;
        }
        Ok(self.controller.stage())
    }

    fn spawn(&self, job: Job) {
        let delay = job.delay(&self.pacing);
        let session = job.session();
        let engine = Arc::clone(&self.engine);
        let tx = self.deliveries_tx.clone();
        let cancel = self.cancel.clone();

        tracing::debug!(%session, ?delay, engine = engine.name(), "Scheduling job");

        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!(%session, "Job cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    let delivery = job.run(engine.as_ref());
                    let _ = tx.send(delivery);
                }
            }
        });
    }
}
