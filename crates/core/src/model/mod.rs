mod persona;
mod question;
mod transcript;

pub use persona::{Persona, PersonaError, PersonaRegistry};
pub use question::{QuestionBank, QuestionBankError};
pub use transcript::{Transcript, TranscriptEntry};
