//! Job card list: loads listings and refreshes them after card actions.

use api::ListJobsRequest;
use board_core::{CurrentUser, JobListing, UserId};
use dioxus::prelude::*;

use crate::JobCard;

/// Which listings a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    /// Every open job, filtered by search and location.
    All,
    /// Jobs the user has saved.
    Saved,
    /// Jobs the user posted. Cards render in owner mode.
    Mine,
}

#[derive(Debug, Clone, PartialEq)]
struct ListingQuery {
    source: ListingSource,
    user_id: Option<UserId>,
    search: String,
    location: String,
}

/// Tracks listing fetches so that only the newest one is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LoadTracker {
    issued: u64,
    revision: u64,
}

impl LoadTracker {
    /// Start a fetch and return its ticket.
    fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether no newer fetch has started since `ticket`.
    fn is_current(&self, ticket: u64) -> bool {
        ticket == self.issued
    }

    /// Record a successful fetch. Returns `false` for a superseded ticket.
    ///
    /// Only applied fetches move the revision that cards reconcile against.
    fn complete(&mut self, ticket: u64) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.revision += 1;
        true
    }
}

async fn fetch_listings(query: &ListingQuery) -> Result<Vec<JobListing>, ServerFnError> {
    match (query.source, query.user_id.clone()) {
        (ListingSource::All, user_id) => {
            api::list_jobs(ListJobsRequest {
                user_id,
                search: Some(query.search.clone()).filter(|s| !s.is_empty()),
                location: Some(query.location.clone()).filter(|l| !l.is_empty()),
                limit: None,
            })
            .await
        }
        (ListingSource::Saved, Some(user_id)) => api::list_saved_jobs(user_id.to_string()).await,
        (ListingSource::Mine, Some(user_id)) => api::list_my_jobs(user_id.to_string()).await,
        (_, None) => Ok(Vec::new()),
    }
}

/// Props for JobCardList component.
#[derive(Props, Clone, PartialEq)]
pub struct JobCardListProps {
    pub source: ListingSource,
    /// Signed-in user, passed through to every card.
    pub user: Option<CurrentUser>,
    #[props(default)]
    pub search: String,
    #[props(default)]
    pub location: String,
    /// Bump to force a reload from outside.
    #[props(default = 0)]
    pub refresh: u64,
    #[props(default = "No jobs found".to_string())]
    pub empty_message: String,
}

/// Grid of job cards backed by a server listing.
#[component]
pub fn JobCardList(props: JobCardListProps) -> Element {
    let mut listings = use_signal(Vec::<JobListing>::new);
    let mut loads = use_signal(LoadTracker::default);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut query = use_signal(|| None::<ListingQuery>);

    // Fetch listings; a successful, still-current fetch bumps the revision
    // so cards re-apply saved status.
    let mut reload = move |q: ListingQuery| {
        let ticket = loads.write().begin();
        spawn(async move {
            loading.set(true);
            let result = fetch_listings(&q).await;
            if !loads.peek().is_current(ticket) {
                tracing::debug!("Dropping superseded {:?} listing fetch", q.source);
                return;
            }
            match result {
                Ok(items) => {
                    listings.set(items);
                    error.set(None);
                    loads.write().complete(ticket);
                }
                Err(e) => error.set(Some(format!("Failed to load jobs: {}", e))),
            }
            loading.set(false);
        });
    };

    let source = props.source;
    let user_id = props.user.as_ref().map(|u| u.id.clone());
    let search = props.search.clone();
    let location = props.location.clone();
    let refresh = props.refresh;
    use_effect(use_reactive!(|(source, user_id, search, location, refresh)| {
        tracing::debug!("Loading {:?} listings (refresh {})", source, refresh);
        let q = ListingQuery {
            source,
            user_id,
            search,
            location,
        };
        query.set(Some(q.clone()));
        reload(q);
    }));

    let on_job_action = move |_| {
        if let Some(q) = query() {
            reload(q);
        }
    };

    let is_my_job = props.source == ListingSource::Mine;
    let items = listings();
    let revision = loads().revision;

    rsx! {
        div { class: "job-card-list",
            if let Some(err) = error() {
                div { class: "error-banner",
                    span { "{err}" }
                    button {
                        onclick: move |_| error.set(None),
                        "×"
                    }
                }
            }

            if loading() && items.is_empty() {
                div { class: "loading", "Loading jobs..." }
            } else if items.is_empty() {
                div { class: "empty-state",
                    p { "{props.empty_message}" }
                }
            } else {
                div { class: "job-grid",
                    for listing in items.iter() {
                        JobCard {
                            key: "{listing.job.id}",
                            job: listing.job.clone(),
                            saved_init: listing.saved,
                            revision,
                            is_my_job,
                            user: props.user.clone(),
                            on_job_action,
                        }
                    }
                }
            }
        }
    }
}
