use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use coach_core::model::QuestionBank;
use serde_json::{Map, Value};

use crate::repository::{QuestionBankRepository, StorageError};

/// Reads question banks from a JSON object of `category -> [question, ...]`.
#[derive(Debug, Clone)]
pub struct JsonQuestionBankRepository {
    path: PathBuf,
}

impl JsonQuestionBankRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionBankRepository for JsonQuestionBankRepository {
    async fn load_bank(&self, category: &str) -> Result<QuestionBank, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => StorageError::NotFound(self.path.display().to_string()),
                _ => StorageError::Io(err.to_string()),
            })?;

        let bank = parse_question_bank(&raw, category)?;
        tracing::info!(
            path = %self.path.display(),
            category,
            questions = bank.count(),
            "loaded question bank"
        );
        Ok(bank)
    }
}

/// Parse one category out of a question-bank document.
///
/// Other categories in the document are ignored, whatever their shape.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the document is not a JSON object or
/// the category is not an array of strings, `StorageError::MissingCategory` if
/// the key is absent, and `StorageError::Bank` if the list is empty or blank.
pub fn parse_question_bank(raw: &str, category: &str) -> Result<QuestionBank, StorageError> {
    let document: Map<String, Value> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let value = document
        .get(category)
        .cloned()
        .ok_or_else(|| StorageError::MissingCategory {
            category: category.to_string(),
        })?;

    let questions: Vec<String> = serde_json::from_value(value)
        .map_err(|e| StorageError::Serialization(format!("category `{category}`: {e}")))?;

    Ok(QuestionBank::new(category, questions)?)
}
