use services::SessionError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptyAnswer,
    Completed,
    NotReady,
    Feedback(String),
    Save(String),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::EmptyAnswer => "Please write your answer before submitting.".to_string(),
            ViewError::Completed => "You’ve completed all questions!".to_string(),
            ViewError::NotReady => {
                "The summary is available after the final question.".to_string()
            }
            ViewError::Feedback(cause) => format!("Error: {cause}"),
            ViewError::Save(cause) => format!("Could not save the summary: {cause}"),
            ViewError::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Validation problems the user can fix, as opposed to service failures.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ViewError::EmptyAnswer | ViewError::Completed | ViewError::NotReady
        )
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::EmptyAnswer => ViewError::EmptyAnswer,
            SessionError::Completed => ViewError::Completed,
            SessionError::NotComplete => ViewError::NotReady,
            SessionError::Feedback(cause) => ViewError::Feedback(cause.to_string()),
            SessionError::Storage(cause) => ViewError::Save(cause.to_string()),
            SessionError::Export(cause) => ViewError::Save(cause.to_string()),
            _ => ViewError::Unknown,
        }
    }
}
