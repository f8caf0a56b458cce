use coach_core::model::Transcript;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewEntryVm {
    pub label: String,
    pub question: String,
    pub answer: String,
    pub feedback: String,
}

#[must_use]
pub fn map_review_entries(transcript: &Transcript) -> Vec<ReviewEntryVm> {
    transcript
        .iter()
        .enumerate()
        .map(|(idx, entry)| ReviewEntryVm {
            label: format!("Q{}", idx + 1),
            question: entry.question().to_string(),
            answer: entry.answer().to_string(),
            feedback: entry.feedback().to_string(),
        })
        .collect()
}

/// Human label for a bank category: `data_analyst` becomes `Data Analyst`.
#[must_use]
pub fn edition_label(category: &str) -> String {
    category
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn page_title(category: &str) -> String {
    let edition = edition_label(category);
    if edition.is_empty() {
        "AI Interview Coach".to_string()
    } else {
        format!("AI Interview Coach – {edition} Edition")
    }
}
