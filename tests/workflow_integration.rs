//! Workflow Integration Tests
//!
//! Drives complete handover sessions through the async runner.

use std::collections::HashSet;
use std::sync::Arc;

use handoverx::{
    AnalysisEngine, Context, PacingConfig, RuleEngine, Stage, WorkflowError, WorkflowRunner,
};

fn runner() -> WorkflowRunner {
    WorkflowRunner::new(Arc::new(RuleEngine::new()), PacingConfig::default(), Context::General)
}

async fn analyze(runner: &mut WorkflowRunner, context: Context, text: &str) -> Stage {
    runner.select_context(context).unwrap();
    runner.set_submission_text(text).unwrap();
    assert!(runner.start_analysis().unwrap());
    runner.settle().await.unwrap()
}

// ============================================================================
// Gap Detection Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_healthcare_note_missing_allergy_and_fluids() {
    let mut runner = runner();
    let stage = analyze(&mut runner, Context::Healthcare, "Patient stable.").await;

    assert_eq!(stage, Stage::FollowUp);
    let questions = runner.snapshot().questions;
    assert_eq!(questions.len(), 2);

    let ids: HashSet<_> = questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), 2);

    let categories: Vec<_> = questions.iter().map(|q| q.category.as_str()).collect();
    assert_eq!(categories, vec!["Safety", "Clinical"]);
}

#[tokio::test(start_paused = true)]
async fn test_complete_healthcare_note_goes_straight_to_summary() {
    let mut runner = runner();
    runner.select_context(Context::Healthcare).unwrap();
    runner
        .set_submission_text("Penicillin allergy on file. Fluid intake noted every 2h.")
        .unwrap();
    runner.start_analysis().unwrap();

    let mut visited = vec![runner.stage()];
    while runner.stage().is_pending() {
        visited.push(runner.next_delivery().await.unwrap());
    }

    assert_eq!(visited, vec![Stage::Analyzing, Stage::Generating, Stage::Summary]);
    assert!(runner.snapshot().questions.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_workplace_note_with_resources_and_backup() {
    let mut runner = runner();
    let stage = analyze(
        &mut runner,
        Context::Workplace,
        "See the shared drive link. Contact Sam as backup.",
    )
    .await;

    assert_eq!(stage, Stage::Summary);
    assert!(runner.snapshot().questions.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_long_note_refined_to_full_confidence() {
    let text = "Patient in bed 4 recovering well after surgery, vitals checked hourly, \
                pain managed with scheduled doses, family updated this afternoon at 3pm.";
    assert!(text.chars().count() > 100);

    let mut runner = runner();
    assert_eq!(analyze(&mut runner, Context::Healthcare, text).await, Stage::FollowUp);

    let before = runner.snapshot().analysis.unwrap();
    assert_eq!(before.confidence_score, 85);

    runner.set_answer("q1", "No known allergies").unwrap();
    runner.complete_analysis().unwrap();
    assert_eq!(runner.stage(), Stage::Generating);
    assert_eq!(runner.settle().await.unwrap(), Stage::Summary);

    let after = runner.snapshot().analysis.unwrap();
    assert_eq!(after.confidence_score, 100);
    assert_eq!(after.tasks.len(), before.tasks.len() + 1);
    assert_eq!(
        after.tasks.last().unwrap(),
        "Follow-up: Does the patient have any known allergies? - No known allergies"
    );
}

// ============================================================================
// Session Lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_skip_keeps_initial_analysis() {
    let mut runner = runner();
    analyze(&mut runner, Context::Workplace, "Deadline Thursday.").await;
    let initial = runner.snapshot().analysis;

    runner.skip_questions().unwrap();

    let snapshot = runner.snapshot();
    assert_eq!(snapshot.stage, Stage::Summary);
    assert_eq!(snapshot.analysis, initial);
    assert!(!snapshot.refined);
}

#[tokio::test(start_paused = true)]
async fn test_reset_from_summary_starts_clean_session() {
    let mut runner = runner();
    analyze(&mut runner, Context::Student, "Finished the literature review.").await;
    assert_eq!(runner.stage(), Stage::Summary);
    let first = runner.snapshot().session;

    let second = runner.reset();
    assert_ne!(first, second);

    let snapshot = runner.snapshot();
    assert_eq!(snapshot.stage, Stage::Setup);
    assert_eq!(snapshot.context, Context::General);
    assert!(snapshot.text.is_empty());
    assert!(snapshot.analysis.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_summary_rejects_further_actions() {
    let mut runner = runner();
    analyze(&mut runner, Context::General, "Keys under the mat.").await;

    assert!(matches!(
        runner.start_analysis(),
        Err(WorkflowError::InvalidTransition { stage: Stage::Summary, .. })
    ));
    assert!(runner.complete_analysis().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_generating_discards_refinement() {
    let mut runner = runner();
    analyze(&mut runner, Context::Healthcare, "Patient stable.").await;
    runner.set_answer("q2", "Strict I/O").unwrap();
    runner.complete_analysis().unwrap();

    runner.reset();
    tokio::time::sleep(std::time::Duration::from_secs(10)).await;

    let snapshot = runner.snapshot();
    assert_eq!(snapshot.stage, Stage::Setup);
    assert!(snapshot.analysis.is_none());
    assert!(snapshot.answers.is_empty());
}

#[test]
fn test_engine_is_deterministic_for_every_context() {
    let engine = RuleEngine::new();
    for context in Context::ALL {
        for text in ["", "Patient stable.", "See the link, backup is Jo."] {
            assert_eq!(
                engine.generate_questions(context, text),
                engine.generate_questions(context, text)
            );
            assert_eq!(
                engine.generate_analysis(context, text),
                engine.generate_analysis(context, text)
            );
        }
    }
}
