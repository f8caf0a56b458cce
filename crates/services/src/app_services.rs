use std::sync::Arc;

use coach_core::model::{PersonaRegistry, QuestionBank};
use storage::Storage;

use crate::error::AppServicesError;
use crate::feedback::FeedbackRequester;
use crate::sessions::SessionLoopService;

/// Assembles app-facing services from storage and a feedback requester.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    personas: Arc<PersonaRegistry>,
    session_loop: Arc<SessionLoopService>,
}

impl AppServices {
    /// Load the question bank for `category` and wire the session loop.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the bank cannot be loaded. This is
    /// fatal at startup.
    pub async fn load(
        storage: &Storage,
        category: &str,
        feedback: Arc<dyn FeedbackRequester>,
    ) -> Result<Self, AppServicesError> {
        let bank = storage.question_banks.load_bank(category).await?;
        Ok(Self::from_parts(
            bank,
            PersonaRegistry::builtin(),
            feedback,
            storage,
        ))
    }

    #[must_use]
    pub fn from_parts(
        bank: QuestionBank,
        personas: PersonaRegistry,
        feedback: Arc<dyn FeedbackRequester>,
        storage: &Storage,
    ) -> Self {
        let bank = Arc::new(bank);
        let personas = Arc::new(personas);
        let session_loop = Arc::new(SessionLoopService::new(
            Arc::clone(&bank),
            Arc::clone(&personas),
            feedback,
            Arc::clone(&storage.summaries),
        ));

        Self {
            bank,
            personas,
            session_loop,
        }
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn personas(&self) -> Arc<PersonaRegistry> {
        Arc::clone(&self.personas)
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }
}
