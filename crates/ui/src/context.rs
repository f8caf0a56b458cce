use std::sync::Arc;

use services::{SessionLoopService, SessionService};

pub trait UiApp: Send + Sync {
    /// Question-bank category the session was loaded from, e.g. `data_analyst`.
    fn category(&self) -> String;

    fn session_loop(&self) -> Arc<SessionLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    category: String,
    session_loop: Arc<SessionLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            category: app.category(),
            session_loop: app.session_loop(),
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }

    /// Fresh session at the first question with the default persona.
    #[must_use]
    pub fn start_session(&self) -> SessionService {
        self.session_loop.start_session()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
