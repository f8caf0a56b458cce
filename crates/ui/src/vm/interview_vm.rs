use std::path::PathBuf;

use services::{Advance, SessionLoopService, SessionService};

use crate::views::ViewError;
use crate::vm::{ReviewEntryVm, map_review_entries};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InterviewIntent {
    SelectPersona(String),
    EditDraft(String),
    Submit,
    Next,
    Download,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub feedback: String,
    pub answered: usize,
}

/// View-model over a single interview session.
///
/// Owns the `SessionService`; the view keeps it in a signal and takes it out
/// while a feedback request is in flight.
#[derive(Clone)]
pub struct InterviewVm {
    session: SessionService,
    /// Feedback for the question on screen; cleared when moving on.
    feedback: Option<String>,
}

impl InterviewVm {
    #[must_use]
    pub fn new(session: SessionService) -> Self {
        Self {
            session,
            feedback: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionService {
        &self.session
    }

    #[must_use]
    pub fn header_label(&self) -> String {
        self.session.progress().label()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&str> {
        self.session.current_question()
    }

    #[must_use]
    pub fn persona_names(&self) -> Vec<String> {
        self.session
            .personas()
            .names()
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn persona_name(&self) -> &str {
        self.session.persona().name()
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        self.session.draft()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[must_use]
    pub fn can_export(&self) -> bool {
        self.session.can_export()
    }

    #[must_use]
    pub fn review_entries(&self) -> Vec<ReviewEntryVm> {
        map_review_entries(self.session.transcript())
    }

    pub fn set_draft(&mut self, text: String) {
        self.session.set_draft(text);
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the name is not a registered persona.
    pub fn select_persona(&mut self, name: &str) -> Result<(), ViewError> {
        self.session
            .select_persona(name)
            .map(|_| ())
            .map_err(ViewError::from)
    }

    pub fn advance(&mut self) -> Advance {
        let outcome = self.session.advance();
        if outcome != Advance::AlreadyComplete {
            self.feedback = None;
        }
        outcome
    }

    /// Submit the current draft and keep the returned feedback on screen.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::EmptyAnswer` for a blank draft,
    /// `ViewError::Feedback` when the feedback request fails, and
    /// `ViewError::Completed` once every question has been passed.
    pub async fn submit(
        &mut self,
        session_loop: &SessionLoopService,
    ) -> Result<SubmitOutcome, ViewError> {
        let answer = self.session.draft().to_string();
        let result = session_loop
            .submit_answer(&mut self.session, &answer)
            .await
            .map_err(ViewError::from)?;

        let feedback = result.entry.feedback().to_string();
        self.feedback = Some(feedback.clone());
        Ok(SubmitOutcome {
            feedback,
            answered: result.answered,
        })
    }

    /// # Errors
    ///
    /// Returns `ViewError::NotReady` before the last question has been passed
    /// and `ViewError::Save` if the document cannot be written.
    pub async fn download(&self, session_loop: &SessionLoopService) -> Result<PathBuf, ViewError> {
        session_loop
            .save_summary(&self.session)
            .await
            .map_err(ViewError::from)
    }
}
