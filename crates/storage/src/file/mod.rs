mod question_bank;
mod summary;

pub use question_bank::{JsonQuestionBankRepository, parse_question_bank};
pub use summary::{FileSummarySink, SUMMARY_FILE_NAME};
