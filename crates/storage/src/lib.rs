#![forbid(unsafe_code)]

pub mod file;
pub mod repository;

pub use file::{FileSummarySink, JsonQuestionBankRepository, SUMMARY_FILE_NAME};
pub use repository::{
    InMemoryRepository, QuestionBankRepository, Storage, StorageError, SummarySink,
};
