use std::fmt;
use std::sync::Arc;

use coach_core::model::{Persona, PersonaRegistry, QuestionBank, Transcript, TranscriptEntry};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── TRANSITION OUTCOMES ───────────────────────────────────────────────────────
//

/// Result of moving past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A further question is now on screen.
    Next { index: usize },
    /// The last question was passed; the session is now terminal.
    Completed,
    /// The session was already terminal; nothing changed.
    AlreadyComplete,
}

/// Everything needed to request feedback, captured before the call so the
/// session does not change underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingSubmission {
    pub question: String,
    pub answer: String,
    pub system_prompt: String,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory interview session over a question bank.
///
/// Steps through the bank in order. `question_index` only moves forward and
/// stops at `total_questions()`, the terminal state where the summary can be
/// exported. The transcript is append-only.
#[derive(Clone)]
pub struct SessionService {
    bank: Arc<QuestionBank>,
    personas: Arc<PersonaRegistry>,
    persona: Persona,
    current: usize,
    draft: String,
    transcript: Transcript,
}

impl SessionService {
    /// Start a session at the first question with the default persona.
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, personas: Arc<PersonaRegistry>) -> Self {
        let persona = personas.default_persona().clone();
        Self {
            bank,
            personas,
            persona,
            current: 0,
            draft: String::new(),
            transcript: Transcript::new(),
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

    /// Persona whose prompt will be used by the next submission.
    #[must_use]
    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.bank.count()
    }

    /// The question on screen, or `None` once the session is terminal.
    #[must_use]
    pub fn current_question(&self) -> Option<&str> {
        self.bank.question_at(self.current)
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.bank.count()
    }

    /// Export is only offered in the terminal state.
    #[must_use]
    pub fn can_export(&self) -> bool {
        self.is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.total_questions();
        SessionProgress {
            position: (self.current + 1).min(total),
            total,
            answered: self.transcript.len(),
            remaining: total.saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    /// Replace the draft answer with what the user has typed so far.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Switch persona for subsequent submissions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Persona` if `name` is not registered; the current
    /// persona is kept.
    pub fn select_persona(&mut self, name: &str) -> Result<&Persona, SessionError> {
        let persona = self.personas.resolve(name)?.clone();
        tracing::debug!(persona = persona.name(), "persona selected");
        self.persona = persona;
        Ok(&self.persona)
    }

    /// Move to the next question, clearing the draft.
    ///
    /// Passing the last question makes the session terminal. Calling this on a
    /// terminal session changes nothing.
    pub fn advance(&mut self) -> Advance {
        let total = self.bank.count();
        if self.current >= total {
            return Advance::AlreadyComplete;
        }

        self.current += 1;
        self.draft.clear();

        if self.current < total {
            tracing::debug!(index = self.current, total, "advanced to next question");
            Advance::Next {
                index: self.current,
            }
        } else {
            tracing::info!(
                total,
                answered = self.transcript.len(),
                "all questions completed"
            );
            Advance::Completed
        }
    }

    /// Validate a submission and capture the question and persona prompt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` for a terminal session and
    /// `SessionError::EmptyAnswer` if the answer is blank after trimming.
    pub(crate) fn begin_submission(&self, answer: &str) -> Result<PendingSubmission, SessionError> {
        let Some(question) = self.current_question() else {
            return Err(SessionError::Completed);
        };
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        Ok(PendingSubmission {
            question: question.to_string(),
            answer: answer.to_string(),
            system_prompt: self.persona.prompt().to_string(),
        })
    }

    /// Append the transcript entry for a successful feedback request.
    pub(crate) fn record_feedback(
        &mut self,
        pending: PendingSubmission,
        feedback: String,
    ) -> &TranscriptEntry {
        self.transcript.append(TranscriptEntry::new(
            pending.question,
            pending.answer,
            feedback,
        ))
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("category", &self.bank.category())
            .field("questions_len", &self.bank.count())
            .field("current", &self.current)
            .field("persona", &self.persona.name())
            .field("draft_len", &self.draft.len())
            .field("transcript_len", &self.transcript.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
