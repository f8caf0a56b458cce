use dioxus::prelude::*;
use services::Advance;

use crate::context::AppContext;
use crate::views::{ReviewPanel, ViewError};
use crate::vm::{InterviewIntent, InterviewVm, ReviewEntryVm, markdown_to_html};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct InterviewData {
    header: String,
    question: Option<String>,
    persona_names: Vec<String>,
    persona: String,
    draft: String,
    feedback_html: Option<String>,
    is_complete: bool,
    can_export: bool,
    entries: Vec<ReviewEntryVm>,
}

impl InterviewData {
    fn from_vm(vm: &InterviewVm) -> Self {
        Self {
            header: vm.header_label(),
            question: vm.current_question().map(str::to_string),
            persona_names: vm.persona_names(),
            persona: vm.persona_name().to_string(),
            draft: vm.draft().to_string(),
            feedback_html: vm.feedback().map(markdown_to_html),
            is_complete: vm.is_complete(),
            can_export: vm.can_export(),
            entries: vm.review_entries(),
        }
    }
}

#[component]
pub fn InterviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let session_loop = ctx.session_loop();

    let vm = use_signal(|| Some(InterviewVm::new(ctx.start_session())));
    let error = use_signal(|| None::<ViewError>);
    let busy = use_signal(|| false);
    let saved_path = use_signal(|| None::<String>);
    // What the page showed when a submission started; rendered while the
    // session is checked out of `vm`.
    let in_flight = use_signal(|| None::<InterviewData>);

    let dispatch = {
        let session_loop = session_loop.clone();
        use_callback(move |intent: InterviewIntent| {
            let mut vm = vm;
            let mut error = error;
            let mut busy = busy;
            let mut saved_path = saved_path;
            let mut in_flight = in_flight;

            match intent {
                InterviewIntent::SelectPersona(name) => {
                    let result = vm.write().as_mut().map(|vm| vm.select_persona(&name));
                    if let Some(Err(err)) = result {
                        error.set(Some(err));
                    }
                }
                InterviewIntent::EditDraft(text) => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.set_draft(text);
                    }
                }
                InterviewIntent::Next => {
                    if busy() {
                        return;
                    }
                    let outcome = vm.write().as_mut().map(InterviewVm::advance);
                    if let Some(Advance::Next { .. } | Advance::Completed) = outcome {
                        error.set(None);
                    }
                }
                InterviewIntent::Submit => {
                    if busy() {
                        return;
                    }
                    let session_loop = session_loop.clone();
                    let snapshot = vm.read().as_ref().map(InterviewData::from_vm);
                    in_flight.set(snapshot);
                    busy.set(true);
                    spawn(async move {
                        let mut local_vm = {
                            let mut guard = vm.write();
                            guard.take()
                        };
                        let Some(mut vm_value) = local_vm.take() else {
                            error.set(Some(ViewError::Unknown));
                            in_flight.set(None);
                            busy.set(false);
                            return;
                        };

                        let result = vm_value.submit(&session_loop).await;

                        // Put the session back even on failure so the draft survives.
                        {
                            let mut guard = vm.write();
                            *guard = Some(vm_value);
                        }
                        in_flight.set(None);
                        busy.set(false);

                        match result {
                            Ok(_) => error.set(None),
                            Err(err) => error.set(Some(err)),
                        }
                    });
                }
                InterviewIntent::Download => {
                    let Some(snapshot) = vm.read().clone() else {
                        return;
                    };
                    let session_loop = session_loop.clone();
                    spawn(async move {
                        match snapshot.download(&session_loop).await {
                            Ok(path) => {
                                saved_path.set(Some(path.display().to_string()));
                                error.set(None);
                            }
                            Err(err) => error.set(Some(err)),
                        }
                    });
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<InterviewTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let data = vm
        .read()
        .as_ref()
        .map(InterviewData::from_vm)
        .or_else(|| in_flight());
    let Some(data) = data else {
        return rsx! {
            div { class: "page interview-page",
                p { class: "interview-busy", "Getting feedback..." }
            }
        };
    };

    let message = error().map(|err| (err.is_warning(), err.message()));
    let submitting = busy();

    rsx! {
        div { class: "page interview-page",
            main { class: "interview-main",
                label { class: "persona-label", r#for: "persona-select",
                    "Choose your AI Coach Persona:"
                }
                select {
                    id: "persona-select",
                    class: "persona-select",
                    value: "{data.persona}",
                    onchange: move |evt| dispatch.call(InterviewIntent::SelectPersona(evt.value())),
                    for name in data.persona_names.iter() {
                        option {
                            value: "{name}",
                            selected: *name == data.persona,
                            "{name}"
                        }
                    }
                }

                h3 { class: "interview-header", "{data.header}" }
                if let Some(question) = data.question.as_ref() {
                    p { class: "interview-question", "{question}" }
                    label { class: "answer-label", r#for: "answer-input", "Your Answer" }
                    textarea {
                        id: "answer-input",
                        class: "answer-input",
                        rows: "8",
                        disabled: submitting,
                        value: "{data.draft}",
                        oninput: move |evt| dispatch.call(InterviewIntent::EditDraft(evt.value())),
                    }
                    div { class: "interview-actions",
                        button {
                            id: "submit-answer",
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: submitting,
                            onclick: move |_| dispatch.call(InterviewIntent::Submit),
                            if submitting { "Getting feedback..." } else { "Submit Answer" }
                        }
                        button {
                            id: "next-question",
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: submitting,
                            onclick: move |_| dispatch.call(InterviewIntent::Next),
                            "Next Question"
                        }
                    }
                }

                if let Some((is_warning, text)) = message {
                    p {
                        class: if is_warning { "notice notice--warning" } else { "notice notice--error" },
                        "{text}"
                    }
                }

                if let Some(html) = data.feedback_html.as_ref() {
                    section { class: "feedback-panel",
                        h4 { class: "feedback-title", "AI Feedback" }
                        div { class: "feedback-body", dangerous_inner_html: "{html}" }
                    }
                }

                if data.is_complete {
                    p { class: "notice notice--success", "🎉 You’ve completed all questions!" }
                }
                if data.can_export {
                    button {
                        id: "download-summary",
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(InterviewIntent::Download),
                        "📥 Download PDF Summary"
                    }
                    if let Some(path) = saved_path() {
                        p { class: "notice notice--success", "Saved to {path}" }
                    }
                }
            }
            ReviewPanel { entries: data.entries.clone() }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct InterviewTestHandles {
    dispatch: Rc<RefCell<Option<Callback<InterviewIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<InterviewVm>>>>>,
}

#[cfg(test)]
impl InterviewTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<InterviewIntent>,
        vm: Signal<Option<InterviewVm>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<InterviewIntent> {
        (*self.dispatch.borrow()).expect("interview dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<InterviewVm>> {
        (*self.vm.borrow()).expect("interview vm registered")
    }
}
