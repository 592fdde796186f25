//! Jobs page - every open job with search and location filters.

use board_core::CurrentUser;
use dioxus::prelude::*;

use crate::{JobCardList, ListingSource};

const LOCATIONS: [&str; 5] = ["Amsterdam", "Berlin", "Lisbon", "Paris", "Remote"];

/// Jobs page component.
#[component]
pub fn JobsPage(user: Option<CurrentUser>) -> Element {
    let mut draft = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut location = use_signal(String::new);

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Latest Jobs" }
                }
            }

            form {
                class: "search-bar",
                onsubmit: move |e| {
                    e.prevent_default();
                    search.set(draft().trim().to_string());
                },
                input {
                    r#type: "text",
                    placeholder: "Search jobs by title...",
                    value: "{draft}",
                    oninput: move |e| draft.set(e.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Search" }
            }

            div { class: "filters",
                select {
                    value: "{location}",
                    onchange: move |e| location.set(e.value()),

                    option { value: "", "All locations" }
                    for loc in LOCATIONS {
                        option { value: loc, "{loc}" }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| {
                        draft.set(String::new());
                        search.set(String::new());
                        location.set(String::new());
                    },
                    "Clear Filters"
                }
            }

            JobCardList {
                source: ListingSource::All,
                user,
                search: search(),
                location: location(),
            }
        }
    }
}
