use dioxus::prelude::*;

use crate::vm::ReviewEntryVm;

/// Sidebar listing every recorded answer with its feedback.
#[component]
pub fn ReviewPanel(entries: Vec<ReviewEntryVm>) -> Element {
    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        aside { class: "review-panel",
            h2 { class: "review-title", "📋 Review Summary" }
            for entry in entries {
                div { class: "review-entry", key: "{entry.label}",
                    p { class: "review-question",
                        strong { "{entry.label}:" }
                        " {entry.question}"
                    }
                    ul { class: "review-details",
                        li {
                            strong { "Answer:" }
                            " {entry.answer}"
                        }
                        li {
                            strong { "AI Feedback:" }
                            " {entry.feedback}"
                        }
                    }
                    hr {}
                }
            }
        }
    }
}
