use std::path::PathBuf;
use std::sync::Arc;

use coach_core::model::{PersonaRegistry, QuestionBank, TranscriptEntry};
use storage::SummarySink;

use super::service::SessionService;
use crate::error::SessionError;
use crate::export::TranscriptExporter;
use crate::feedback::FeedbackRequester;

/// Result of a successful answer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAnswerResult {
    pub entry: TranscriptEntry,
    /// Transcript length after the entry was appended.
    pub answered: usize,
}

/// Orchestrates session start, feedback requests and summary export.
#[derive(Clone)]
pub struct SessionLoopService {
    bank: Arc<QuestionBank>,
    personas: Arc<PersonaRegistry>,
    feedback: Arc<dyn FeedbackRequester>,
    summaries: Arc<dyn SummarySink>,
    exporter: TranscriptExporter,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        personas: Arc<PersonaRegistry>,
        feedback: Arc<dyn FeedbackRequester>,
        summaries: Arc<dyn SummarySink>,
    ) -> Self {
        Self {
            bank,
            personas,
            feedback,
            summaries,
            exporter: TranscriptExporter::new(),
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn personas(&self) -> &PersonaRegistry {
        &self.personas
    }

    /// Start a fresh session at the first question.
    #[must_use]
    pub fn start_session(&self) -> SessionService {
        tracing::info!(
            category = self.bank.category(),
            questions = self.bank.count(),
            "session started"
        );
        SessionService::new(Arc::clone(&self.bank), Arc::clone(&self.personas))
    }

    /// Ask for feedback on `answer` to the current question and record it.
    ///
    /// A single attempt is made. On failure the session is left exactly as it
    /// was and the user may submit again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyAnswer` for a blank answer,
    /// `SessionError::Completed` for a terminal session, and
    /// `SessionError::Feedback` if the feedback request fails.
    pub async fn submit_answer(
        &self,
        session: &mut SessionService,
        answer: &str,
    ) -> Result<SessionAnswerResult, SessionError> {
        let pending = session.begin_submission(answer)?;

        let feedback = self
            .feedback
            .request(&pending.system_prompt, &pending.question, &pending.answer)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, index = session.question_index(), "feedback request failed");
                err
            })?;

        let entry = session.record_feedback(pending, feedback).clone();
        tracing::debug!(
            index = session.question_index(),
            answered = session.transcript().len(),
            "feedback recorded"
        );

        Ok(SessionAnswerResult {
            entry,
            answered: session.transcript().len(),
        })
    }

    /// Render the transcript as PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotComplete` before the terminal state and
    /// `SessionError::Export` if the document cannot be encoded.
    pub fn export_transcript(&self, session: &SessionService) -> Result<Vec<u8>, SessionError> {
        if !session.can_export() {
            return Err(SessionError::NotComplete);
        }
        Ok(self.exporter.export(session.transcript().entries())?)
    }

    /// Export the transcript and hand it to the summary sink.
    ///
    /// # Errors
    ///
    /// Returns the errors of `export_transcript`, plus `SessionError::Storage`
    /// if the document cannot be written.
    pub async fn save_summary(&self, session: &SessionService) -> Result<PathBuf, SessionError> {
        let document = self.export_transcript(session)?;
        Ok(self.summaries.write_summary(&document).await?)
    }
}
