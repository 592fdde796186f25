//! My jobs page - postings of the signed-in user.

use board_core::CurrentUser;
use dioxus::prelude::*;

use crate::{CreateJobForm, JobCardList, ListingSource};

/// My jobs page component.
#[component]
pub fn MyJobsPage(user: Option<CurrentUser>) -> Element {
    let mut show_create_form = use_signal(|| false);
    let mut refresh = use_signal(|| 0u64);

    let Some(current) = user.clone() else {
        return rsx! {
            div { class: "page-container",
                div { class: "empty-state",
                    p { "Sign in to manage your job postings" }
                }
            }
        };
    };

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "My Jobs" }
                    p { class: "page-description", "Jobs posted by {current.display_name}" }
                }
                div { class: "page-header-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| show_create_form.set(true),
                        "+ Post a Job"
                    }
                }
            }

            if show_create_form() {
                CreateJobForm {
                    recruiter: current.clone(),
                    on_created: move |_| {
                        show_create_form.set(false);
                        *refresh.write() += 1;
                    },
                    on_cancel: move |_| show_create_form.set(false),
                }
            }

            JobCardList {
                source: ListingSource::Mine,
                user,
                refresh: refresh(),
                empty_message: "You have not posted any jobs",
            }
        }
    }
}
