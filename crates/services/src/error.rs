//! Shared error types for the services crate.

use thiserror::Error;

use coach_core::model::PersonaError;
use storage::StorageError;

/// Errors emitted by a `FeedbackRequester`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error("feedback service is not configured (set OPENAI_API_KEY)")]
    Disabled,
    #[error("feedback service returned an empty response")]
    EmptyResponse,
    #[error("feedback request failed with status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to decode feedback response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("feedback request failed: {0}")]
    Upstream(String),
}

/// Errors emitted by `TranscriptExporter`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("failed to encode summary document: {0}")]
    Pdf(String),
}

/// Errors emitted by session transitions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("please write your answer before submitting")]
    EmptyAnswer,
    #[error("all questions have been completed")]
    Completed,
    #[error("the summary is available once every question has been visited")]
    NotComplete,
    #[error(transparent)]
    Persona(#[from] PersonaError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
