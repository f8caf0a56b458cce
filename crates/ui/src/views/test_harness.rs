use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::Router;
use coach_core::model::{PersonaRegistry, QuestionBank};
use services::{FeedbackError, FeedbackRequester, SessionLoopService};
use storage::InMemoryRepository;

use crate::context::{UiApp, build_app_context};
use crate::routes::Route;
use crate::views::interview::InterviewTestHandles;
use crate::vm::{InterviewIntent, InterviewVm};

pub const CATEGORY: &str = "data_analyst";

#[derive(Clone)]
struct TestApp {
    session_loop: Arc<SessionLoopService>,
}

impl UiApp for TestApp {
    fn category(&self) -> String {
        CATEGORY.to_string()
    }

    fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }
}

/// Answers every request with the same reply.
pub struct FixedFeedback(pub &'static str);

#[async_trait::async_trait]
impl FeedbackRequester for FixedFeedback {
    async fn request(
        &self,
        _system_prompt: &str,
        _question: &str,
        _answer: &str,
    ) -> Result<String, FeedbackError> {
        Ok(self.0.to_string())
    }
}

pub struct FailingFeedback;

#[async_trait::async_trait]
impl FeedbackRequester for FailingFeedback {
    async fn request(
        &self,
        _system_prompt: &str,
        _question: &str,
        _answer: &str,
    ) -> Result<String, FeedbackError> {
        Err(FeedbackError::Upstream("service unavailable".to_string()))
    }
}

/// Holds every reply until the test releases it.
pub struct GatedFeedback {
    pub gate: Arc<tokio::sync::Notify>,
}

#[async_trait::async_trait]
impl FeedbackRequester for GatedFeedback {
    async fn request(
        &self,
        _system_prompt: &str,
        _question: &str,
        answer: &str,
    ) -> Result<String, FeedbackError> {
        self.gate.notified().await;
        Ok(format!("Feedback on: {answer}"))
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: InterviewTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<Route> {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub summaries: InMemoryRepository,
    handles: InterviewTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Run an intent inside the dom runtime, as an event handler would.
    pub fn dispatch(&mut self, intent: InterviewIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn with_vm<R>(&self, f: impl FnOnce(&InterviewVm) -> R) -> Option<R> {
        let vm = self.handles.vm();
        self.dom.in_runtime(|| vm.read().as_ref().map(f))
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(questions: &[&str], feedback: Arc<dyn FeedbackRequester>) -> ViewHarness {
    let bank = QuestionBank::new(
        CATEGORY,
        questions.iter().map(|q| (*q).to_string()).collect(),
    )
    .expect("valid bank");
    let summaries = InMemoryRepository::new();
    let session_loop = Arc::new(SessionLoopService::new(
        Arc::new(bank),
        Arc::new(PersonaRegistry::builtin()),
        feedback,
        Arc::new(summaries.clone()),
    ));

    let handles = InterviewTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { session_loop }),
            handles: handles.clone(),
        },
    );

    let mut harness = ViewHarness {
        dom,
        summaries,
        handles,
    };
    harness.rebuild();
    harness
}
