use std::sync::Arc;

use coach_core::model::PersonaRegistry;

use super::test_harness::{FailingFeedback, FixedFeedback, GatedFeedback, setup_view_harness};
use crate::vm::InterviewIntent;

const QUESTIONS: [&str; 2] = [
    "Tell me about a challenge.",
    "Describe a conflict you resolved.",
];

#[tokio::test(flavor = "current_thread")]
async fn interview_view_smoke_renders_first_question() {
    let harness = setup_view_harness(&QUESTIONS, Arc::new(FixedFeedback("unused")));
    let html = harness.render();

    assert!(html.contains("Data Analyst Edition"), "missing title in {html}");
    assert!(html.contains("Question 1 of 2"), "missing header in {html}");
    assert!(html.contains("Tell me about a challenge."), "missing question in {html}");
    for name in PersonaRegistry::builtin().names() {
        assert!(html.contains(name), "missing persona {name} in {html}");
    }
    assert!(html.contains("Submit Answer"), "missing submit in {html}");
    assert!(!html.contains("Download PDF"), "download shown too early in {html}");
    assert!(!html.contains("Review Summary"), "empty review shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn interview_view_smoke_submit_advance_and_download() {
    let mut harness = setup_view_harness(&QUESTIONS, Arc::new(FixedFeedback("Good use of STAR.")));

    harness.dispatch(InterviewIntent::EditDraft("I led a project".to_string()));
    harness.dispatch(InterviewIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Good use of STAR."), "missing feedback in {html}");
    assert!(html.contains("Review Summary"), "missing review panel in {html}");
    assert!(html.contains("Q1:"), "missing review entry in {html}");
    assert!(html.contains("I led a project"), "missing answer in {html}");

    harness.dispatch(InterviewIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "missing second header in {html}");
    assert!(!html.contains("Download PDF"), "download shown too early in {html}");

    harness.dispatch(InterviewIntent::Next);
    let html = harness.render();
    assert!(html.contains("completed all questions"), "missing banner in {html}");
    assert!(html.contains("Download PDF Summary"), "missing download in {html}");
    assert!(!html.contains("Submit Answer"), "submit shown after completion in {html}");

    harness.dispatch(InterviewIntent::Download);
    harness.drive_async().await;
    harness.drive_async().await;

    let written = harness.summaries.written_summaries().expect("summaries");
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with(b"%PDF"));
    let html = harness.render();
    assert!(html.contains("Saved to interview_summary.pdf"), "missing status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn interview_view_smoke_blank_answer_warns() {
    let mut harness = setup_view_harness(&QUESTIONS, Arc::new(FixedFeedback("unused")));

    harness.dispatch(InterviewIntent::Submit);
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Please write your answer before submitting."),
        "missing warning in {html}"
    );
    assert_eq!(harness.with_vm(|vm| vm.review_entries().len()), Some(0));
}

#[tokio::test(flavor = "current_thread")]
async fn interview_view_smoke_feedback_failure_keeps_state() {
    let mut harness = setup_view_harness(&QUESTIONS, Arc::new(FailingFeedback));

    harness.dispatch(InterviewIntent::EditDraft("My answer".to_string()));
    harness.dispatch(InterviewIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("service unavailable"), "missing error in {html}");
    assert!(html.contains("Question 1 of 2"), "index moved in {html}");
    assert!(!html.contains("Review Summary"), "failed entry recorded in {html}");
    assert_eq!(
        harness.with_vm(|vm| vm.draft().to_string()),
        Some("My answer".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn interview_view_smoke_persona_switch() {
    let mut harness = setup_view_harness(&QUESTIONS, Arc::new(FixedFeedback("unused")));
    let names: Vec<String> = PersonaRegistry::builtin()
        .names()
        .map(str::to_string)
        .collect();

    harness.dispatch(InterviewIntent::SelectPersona(names[2].clone()));
    assert_eq!(
        harness.with_vm(|vm| vm.persona_name().to_string()),
        Some(names[2].clone())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn interview_view_smoke_page_stays_up_while_feedback_pending() {
    let gate = Arc::new(tokio::sync::Notify::new());
    let mut harness = setup_view_harness(
        &QUESTIONS,
        Arc::new(GatedFeedback {
            gate: Arc::clone(&gate),
        }),
    );

    gate.notify_one();
    harness.dispatch(InterviewIntent::EditDraft("First try".to_string()));
    harness.dispatch(InterviewIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;
    assert!(harness.render().contains("Feedback on: First try"));

    harness.dispatch(InterviewIntent::EditDraft("Second try".to_string()));
    harness.dispatch(InterviewIntent::Submit);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "header lost while pending in {html}");
    assert!(html.contains("Tell me about a challenge."), "question lost while pending in {html}");
    assert!(html.contains("Review Summary"), "review lost while pending in {html}");
    assert!(html.contains("Getting feedback..."), "missing busy label in {html}");
    assert!(!html.contains("Submit Answer"), "idle label while pending in {html}");

    gate.notify_one();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Feedback on: Second try"), "missing feedback in {html}");
    assert!(html.contains("Submit Answer"), "busy label stuck in {html}");
    assert_eq!(harness.with_vm(|vm| vm.review_entries().len()), Some(2));
}
