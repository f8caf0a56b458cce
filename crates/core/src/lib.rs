#![forbid(unsafe_code)]

pub mod model;

pub use model::{
    Persona, PersonaError, PersonaRegistry, QuestionBank, QuestionBankError, Transcript,
    TranscriptEntry,
};
