//! Saved jobs page.

use board_core::CurrentUser;
use dioxus::prelude::*;

use crate::{JobCardList, ListingSource};

/// Saved jobs page component.
#[component]
pub fn SavedJobsPage(user: Option<CurrentUser>) -> Element {
    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Saved Jobs" }
                }
            }

            if user.is_some() {
                JobCardList {
                    source: ListingSource::Saved,
                    user,
                    empty_message: "No saved jobs yet",
                }
            } else {
                div { class: "empty-state",
                    p { "Sign in to see your saved jobs" }
                }
            }
        }
    }
}
