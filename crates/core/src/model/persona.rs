use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PersonaError {
    #[error("unknown persona: {name}")]
    Unknown { name: String },

    #[error("duplicate persona: {name}")]
    Duplicate { name: String },

    #[error("persona registry cannot be empty")]
    Empty,
}

/// A named system-prompt preset shaping the tone of the feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    name: String,
    prompt: String,
}

impl Persona {
    #[must_use]
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

const BUILTIN_PERSONAS: [(&str, &str); 4] = [
    (
        "Professional Coach",
        "You are a professional interview coach. Give clear, encouraging, STAR-based feedback to improve the candidate's answer.",
    ),
    (
        "Mentor",
        "You are a mentor providing supportive feedback. Offer suggestions while staying positive and constructive.",
    ),
    (
        "Technical Reviewer",
        "You are a senior data analyst reviewing answers critically for technical accuracy, detail, and completeness.",
    ),
    (
        "Tough Critic",
        "You are a strict interviewer. Give blunt, honest feedback and point out flaws clearly but constructively.",
    ),
];

/// Immutable lookup table from persona display name to system prompt.
///
/// Display order is the insertion order; the first persona is the default
/// selection for a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Build a registry from an ordered list of personas.
    ///
    /// # Errors
    ///
    /// Returns `PersonaError::Empty` for an empty list and
    /// `PersonaError::Duplicate` if two personas share a name.
    pub fn new(personas: Vec<Persona>) -> Result<Self, PersonaError> {
        if personas.is_empty() {
            return Err(PersonaError::Empty);
        }
        for (idx, persona) in personas.iter().enumerate() {
            if personas[..idx].iter().any(|p| p.name == persona.name) {
                return Err(PersonaError::Duplicate {
                    name: persona.name.clone(),
                });
            }
        }
        Ok(Self { personas })
    }

    /// The four coaching styles shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            personas: BUILTIN_PERSONAS
                .iter()
                .map(|(name, prompt)| Persona::new(*name, *prompt))
                .collect(),
        }
    }

    /// Resolve a display name to its persona.
    ///
    /// # Errors
    ///
    /// Returns `PersonaError::Unknown` if no persona has that name.
    pub fn resolve(&self, name: &str) -> Result<&Persona, PersonaError> {
        self.personas
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PersonaError::Unknown {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn default_persona(&self) -> &Persona {
        // Non-empty by construction.
        &self.personas[0]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.personas.iter().map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
