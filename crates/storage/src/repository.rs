use async_trait::async_trait;
use coach_core::model::{QuestionBank, QuestionBankError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::file::{FileSummarySink, JsonQuestionBankRepository, SUMMARY_FILE_NAME};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("question bank has no category `{category}`")]
    MissingCategory { category: String },

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Bank(#[from] QuestionBankError),
}

/// Source of question banks, keyed by category name.
#[async_trait]
pub trait QuestionBankRepository: Send + Sync {
    /// Load the ordered question list for `category`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the backing source is missing,
    /// `StorageError::MissingCategory` if the category is absent, and
    /// `StorageError::Serialization` / `StorageError::Bank` for malformed data.
    async fn load_bank(&self, category: &str) -> Result<QuestionBank, StorageError>;
}

/// Destination for rendered summary documents.
#[async_trait]
pub trait SummarySink: Send + Sync {
    /// Store the document and return where it was written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    async fn write_summary(&self, document: &[u8]) -> Result<PathBuf, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    banks: Arc<Mutex<HashMap<String, QuestionBank>>>,
    summaries: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bank under its own category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_bank(&self, bank: QuestionBank) -> Result<(), StorageError> {
        let mut guard = self
            .banks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(bank.category().to_string(), bank);
        Ok(())
    }

    /// Every document written so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn written_summaries(&self) -> Result<Vec<Vec<u8>>, StorageError> {
        let guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl QuestionBankRepository for InMemoryRepository {
    async fn load_bank(&self, category: &str) -> Result<QuestionBank, StorageError> {
        let guard = self
            .banks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(category)
            .cloned()
            .ok_or_else(|| StorageError::MissingCategory {
                category: category.to_string(),
            })
    }
}

#[async_trait]
impl SummarySink for InMemoryRepository {
    async fn write_summary(&self, document: &[u8]) -> Result<PathBuf, StorageError> {
        let mut guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(document.to_vec());
        Ok(PathBuf::from(SUMMARY_FILE_NAME))
    }
}

/// Aggregates the question-bank source and summary sink behind trait objects.
#[derive(Clone)]
pub struct Storage {
    pub question_banks: Arc<dyn QuestionBankRepository>,
    pub summaries: Arc<dyn SummarySink>,
}

impl Storage {
    /// Read banks from a JSON file and write summaries into `output_dir`.
    #[must_use]
    pub fn files(bank_path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            question_banks: Arc::new(JsonQuestionBankRepository::new(bank_path.as_ref())),
            summaries: Arc::new(FileSummarySink::new(output_dir.as_ref())),
        }
    }

    #[must_use]
    pub fn in_memory(repo: InMemoryRepository) -> Self {
        let question_banks: Arc<dyn QuestionBankRepository> = Arc::new(repo.clone());
        let summaries: Arc<dyn SummarySink> = Arc::new(repo);
        Self {
            question_banks,
            summaries,
        }
    }
}
