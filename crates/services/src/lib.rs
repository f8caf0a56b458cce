#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod export;
pub mod feedback;
pub mod sessions;

pub use sessions as session;

pub use app_services::AppServices;
pub use error::{AppServicesError, ExportError, FeedbackError, SessionError};
pub use export::TranscriptExporter;
pub use feedback::{ChatFeedbackConfig, ChatFeedbackRequester, FeedbackRequester};
pub use sessions::{Advance, SessionAnswerResult, SessionLoopService, SessionProgress, SessionService};
