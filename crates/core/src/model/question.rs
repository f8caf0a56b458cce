use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank category cannot be empty")]
    EmptyCategory,

    #[error("question bank `{category}` has no questions")]
    NoQuestions { category: String },

    #[error("question {index} in `{category}` is blank")]
    BlankQuestion { category: String, index: usize },
}

/// Ordered, immutable list of interview questions for one category.
///
/// A question's identity is its position in the bank. Banks are loaded once
/// at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    category: String,
    questions: Vec<String>,
}

impl QuestionBank {
    /// Build a bank from an ordered list of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::EmptyCategory` if the category name is blank,
    /// `QuestionBankError::NoQuestions` if the list is empty, and
    /// `QuestionBankError::BlankQuestion` if any question is only whitespace.
    pub fn new(
        category: impl Into<String>,
        questions: Vec<String>,
    ) -> Result<Self, QuestionBankError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(QuestionBankError::EmptyCategory);
        }
        if questions.is_empty() {
            return Err(QuestionBankError::NoQuestions { category });
        }
        if let Some(index) = questions.iter().position(|q| q.trim().is_empty()) {
            return Err(QuestionBankError::BlankQuestion { category, index });
        }

        Ok(Self {
            category,
            questions,
        })
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Question at `index`, or `None` once the index reaches `count()`.
    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(String::as_str)
    }
}
