use std::path::PathBuf;

use async_trait::async_trait;

use crate::repository::{StorageError, SummarySink};

/// Fixed filename offered for the downloadable summary.
pub const SUMMARY_FILE_NAME: &str = "interview_summary.pdf";

/// Writes summaries to `<output_dir>/interview_summary.pdf`, replacing any
/// previous export.
#[derive(Debug, Clone)]
pub struct FileSummarySink {
    output_dir: PathBuf,
}

impl FileSummarySink {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn target_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE_NAME)
    }
}

#[async_trait]
impl SummarySink for FileSummarySink {
    async fn write_summary(&self, document: &[u8]) -> Result<PathBuf, StorageError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let path = self.target_path();
        tokio::fs::write(&path, document)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::info!(path = %path.display(), bytes = document.len(), "wrote summary");
        Ok(path)
    }
}
