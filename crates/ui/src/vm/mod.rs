mod interview_vm;
mod markdown_vm;
mod transcript_vm;

pub use interview_vm::{InterviewIntent, InterviewVm, SubmitOutcome};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use transcript_vm::{ReviewEntryVm, edition_label, map_review_entries, page_title};
