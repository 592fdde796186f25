// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

use board_core::CurrentUser;
use dioxus::prelude::*;

use ui::pages::{JobDetailPage, JobsPage, MyJobsPage, SavedJobsPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(BoardLayout)]
        #[route("/")]
        Jobs {},
        #[route("/saved-jobs")]
        SavedJobs {},
        #[route("/my-jobs")]
        MyJobs {},
        #[route("/job/:id")]
        JobDetail { id: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Signed-in state shared by all routes.
///
/// The auth provider is external; the board starts signed in as the demo
/// account and pages receive the user as a prop.
#[derive(Debug, Clone, PartialEq)]
struct Session {
    user: Option<CurrentUser>,
}

impl Session {
    fn demo() -> Self {
        Self {
            user: Some(CurrentUser::new(api::DEMO_USER_ID, "Demo User")),
        }
    }
}

fn use_current_user() -> Option<CurrentUser> {
    use_context::<Signal<Session>>().read().user.clone()
}

fn main() {
    #[cfg(feature = "server")]
    {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(Session::demo()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Layout with the top navigation bar.
#[component]
fn BoardLayout() -> Element {
    let mut session = use_context::<Signal<Session>>();
    let user = session.read().user.clone();

    rsx! {
        header { class: "navbar",
            Link { to: Route::Jobs {}, class: "navbar-logo", "Job Board" }
            nav { class: "navbar-links",
                Link { to: Route::Jobs {}, class: "nav-link", active_class: "active", "Jobs" }
                Link { to: Route::SavedJobs {}, class: "nav-link", active_class: "active", "Saved Jobs" }
                Link { to: Route::MyJobs {}, class: "nav-link", active_class: "active", "My Jobs" }
            }
            div { class: "navbar-session",
                if let Some(user) = user {
                    span { class: "navbar-user", "{user.display_name}" }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| session.write().user = None,
                        "Sign Out"
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| session.set(Session::demo()),
                        "Sign In"
                    }
                }
            }
        }

        main { class: "board-main",
            Outlet::<Route> {}
        }
    }
}

/// Jobs list page.
#[component]
fn Jobs() -> Element {
    let user = use_current_user();
    rsx! {
        JobsPage { user }
    }
}

/// Saved jobs page.
#[component]
fn SavedJobs() -> Element {
    let user = use_current_user();
    rsx! {
        SavedJobsPage { user }
    }
}

/// My jobs page.
#[component]
fn MyJobs() -> Element {
    let user = use_current_user();
    rsx! {
        MyJobsPage { user }
    }
}

/// Job detail page.
#[component]
fn JobDetail(id: String) -> Element {
    let user = use_current_user();
    rsx! {
        JobDetailPage { job_id: id, user }
    }
}
