use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use coach_core::model::{PersonaRegistry, QuestionBank, TranscriptEntry};
use services::{
    Advance, AppServices, FeedbackError, FeedbackRequester, SessionError, SessionLoopService,
};
use storage::{InMemoryRepository, Storage, StorageError};

/// Replays scripted replies in order.
struct ScriptedFeedback {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl ScriptedFeedback {
    fn new(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FeedbackRequester for ScriptedFeedback {
    async fn request(
        &self,
        system_prompt: &str,
        question: &str,
        answer: &str,
    ) -> Result<String, FeedbackError> {
        self.calls.lock().unwrap().push((
            system_prompt.to_string(),
            question.to_string(),
            answer.to_string(),
        ));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(cause)) => Err(FeedbackError::Upstream(cause)),
            None => Err(FeedbackError::EmptyResponse),
        }
    }
}

fn two_question_bank() -> QuestionBank {
    QuestionBank::new(
        "data_analyst",
        vec![
            "Tell me about a challenge.".to_string(),
            "Describe a conflict you resolved.".to_string(),
        ],
    )
    .unwrap()
}

fn build_loop(
    feedback: Arc<ScriptedFeedback>,
    repo: &InMemoryRepository,
) -> SessionLoopService {
    SessionLoopService::new(
        Arc::new(two_question_bank()),
        Arc::new(PersonaRegistry::builtin()),
        feedback,
        Arc::new(repo.clone()),
    )
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[tokio::test]
async fn full_session_reaches_terminal_state_and_exports() {
    let repo = InMemoryRepository::new();
    let feedback = ScriptedFeedback::new(vec![Ok("Good use of STAR."), Ok("Add more detail.")]);
    let loop_svc = build_loop(Arc::clone(&feedback), &repo);
    let mut session = loop_svc.start_session();

    assert_eq!(session.question_index(), 0);
    assert_eq!(session.draft(), "");
    assert!(session.transcript().is_empty());

    session.set_draft("I led a project");
    let result = loop_svc
        .submit_answer(&mut session, "I led a project")
        .await
        .unwrap();
    assert_eq!(
        result.entry,
        TranscriptEntry::new(
            "Tell me about a challenge.",
            "I led a project",
            "Good use of STAR."
        )
    );
    assert_eq!(result.answered, 1);
    assert_eq!(session.question_index(), 0);
    assert_eq!(session.draft(), "I led a project");

    assert_eq!(session.advance(), Advance::Next { index: 1 });
    assert_eq!(session.draft(), "");

    loop_svc
        .submit_answer(&mut session, "I mediated a dispute")
        .await
        .unwrap();
    assert_eq!(session.transcript().len(), 2);

    assert!(matches!(
        loop_svc.export_transcript(&session),
        Err(SessionError::NotComplete)
    ));

    assert_eq!(session.advance(), Advance::Completed);
    assert_eq!(session.question_index(), 2);
    assert!(session.can_export());

    let document = loop_svc.export_transcript(&session).unwrap();
    assert!(contains(&document, b"(Question 1: Tell me about a challenge.)"));
    assert!(contains(&document, b"(Question 2: Describe a conflict you resolved.)"));
    assert!(contains(&document, b"(Good use of STAR.)"));
    assert!(contains(&document, b"(Add more detail.)"));
    assert!(!contains(&document, b"Question 3:"));

    let again = loop_svc.export_transcript(&session).unwrap();
    assert_eq!(document, again);
    assert_eq!(session.transcript().len(), 2);
    assert_eq!(session.question_index(), 2);

    let path = loop_svc.save_summary(&session).await.unwrap();
    assert_eq!(path.to_str(), Some("interview_summary.pdf"));
    assert_eq!(repo.written_summaries().unwrap(), vec![document]);

    let calls = feedback.calls();
    assert_eq!(calls[0].1, "Tell me about a challenge.");
    assert_eq!(calls[1].2, "I mediated a dispute");
}

#[tokio::test]
async fn feedback_failure_leaves_session_unchanged() {
    let repo = InMemoryRepository::new();
    let feedback = ScriptedFeedback::new(vec![Err("upstream unavailable"), Ok("Better.")]);
    let loop_svc = build_loop(Arc::clone(&feedback), &repo);
    let mut session = loop_svc.start_session();
    session.set_draft("My answer");

    let err = loop_svc
        .submit_answer(&mut session, "My answer")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Feedback(FeedbackError::Upstream(_))));
    assert!(err.to_string().contains("upstream unavailable"));
    assert!(session.transcript().is_empty());
    assert_eq!(session.question_index(), 0);
    assert_eq!(session.draft(), "My answer");

    // A fresh explicit submission is the only retry.
    loop_svc
        .submit_answer(&mut session, "My answer")
        .await
        .unwrap();
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(feedback.calls().len(), 2);
}

#[tokio::test]
async fn blank_submissions_are_validation_warnings() {
    let repo = InMemoryRepository::new();
    let feedback = ScriptedFeedback::new(vec![]);
    let loop_svc = build_loop(Arc::clone(&feedback), &repo);
    let mut session = loop_svc.start_session();

    for answer in ["", "   "] {
        let err = loop_svc.submit_answer(&mut session, answer).await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyAnswer));
    }
    assert!(session.transcript().is_empty());
    assert_eq!(session.question_index(), 0);
    assert!(feedback.calls().is_empty());
}

#[tokio::test]
async fn skipped_questions_still_export() {
    let repo = InMemoryRepository::new();
    let feedback = ScriptedFeedback::new(vec![Ok("Solid.")]);
    let loop_svc = build_loop(feedback, &repo);
    let mut session = loop_svc.start_session();

    session.advance();
    loop_svc
        .submit_answer(&mut session, "Only the second one")
        .await
        .unwrap();
    session.advance();
    assert_eq!(session.advance(), Advance::AlreadyComplete);

    let document = loop_svc.export_transcript(&session).unwrap();
    assert!(contains(&document, b"(Question 1: Describe a conflict you resolved.)"));
    assert!(!contains(&document, b"Question 2:"));

    let err = loop_svc
        .submit_answer(&mut session, "too late")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Completed));
}

#[tokio::test]
async fn app_services_load_fails_for_missing_category() {
    let repo = InMemoryRepository::new();
    repo.insert_bank(two_question_bank()).unwrap();
    let storage = Storage::in_memory(repo);
    let feedback = ScriptedFeedback::new(vec![]);

    let loaded = AppServices::load(&storage, "data_analyst", feedback.clone())
        .await
        .expect("bank loads");
    assert_eq!(loaded.bank().count(), 2);
    assert_eq!(loaded.session_loop().start_session().total_questions(), 2);
    assert_eq!(loaded.personas().len(), 4);

    let err = AppServices::load(&storage, "designer", feedback)
        .await
        .err()
        .expect("missing category");
    assert!(matches!(
        err,
        services::AppServicesError::Storage(StorageError::MissingCategory { .. })
    ));
}
