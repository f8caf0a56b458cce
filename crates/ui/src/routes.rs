use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::context::AppContext;
use crate::views::InterviewView;
use crate::vm::page_title;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", InterviewView)] Interview {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let title = page_title(ctx.category());

    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { class: "app-title", "{title}" }
                p { class: "app-subtitle",
                    "Practice behavioral interview questions and receive AI feedback using the STAR method."
                }
            }
            Outlet::<Route> {}
        }
    }
}
