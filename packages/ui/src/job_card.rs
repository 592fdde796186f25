//! Job card component for a single job listing.

use board_core::card::{request_delete, request_save};
use board_core::{ActionKind, CardState, CardView, CurrentUser, Job, SaveIcon, SavedPhase};
use dioxus::prelude::*;

use crate::actions::{CardSignal, ServerJobActions, log_outcome};

const JOB_CARD_CSS: Asset = asset!("/assets/styling/job_card.css");

/// Props for JobCard component.
#[derive(Props, Clone, PartialEq)]
pub struct JobCardProps {
    /// The job to display.
    pub job: Job,
    /// Saved status as known by the parent list.
    #[props(default = false)]
    pub saved_init: bool,
    /// Generation of the parent's listing; a new value re-applies `saved_init`.
    #[props(default = 0)]
    pub revision: u64,
    /// Show the delete control instead of the save control.
    #[props(default = false)]
    pub is_my_job: bool,
    /// Signed-in user, if any.
    pub user: Option<CurrentUser>,
    /// Called after a save or delete succeeds.
    pub on_job_action: EventHandler<()>,
}

/// Card component for displaying a job with save/delete actions.
#[component]
pub fn JobCard(props: JobCardProps) -> Element {
    let mut card = use_signal(|| CardState::new(props.saved_init));

    let saved_init = props.saved_init;
    let revision = props.revision;
    use_effect(use_reactive!(|(saved_init, revision)| {
        tracing::trace!("Reconciling card at revision {}", revision);
        card.write().reconcile(saved_init);
    }));

    use_drop(move || {
        if let Ok(mut state) = card.try_write() {
            state.teardown();
        }
    });

    let job = props.job.clone();
    let job_id = job.id;
    let summary = job.summary();
    let detail_route = job.detail_route();
    let on_job_action = props.on_job_action;

    let user = props.user.clone();
    let on_save = move |_| {
        let user = user.clone();
        spawn(async move {
            let outcome =
                request_save(&CardSignal(card), &ServerJobActions, user.as_ref(), job_id).await;
            log_outcome(ActionKind::Save, job_id, &outcome);
            if outcome.should_refresh() {
                on_job_action.call(());
            }
        });
    };

    let on_delete = move |_| {
        spawn(async move {
            let outcome = request_delete(&CardSignal(card), &ServerJobActions, job_id).await;
            log_outcome(ActionKind::Delete, job_id, &outcome);
            if outcome.should_refresh() {
                on_job_action.call(());
            }
        });
    };

    let view = CardView::derive(&card.read(), props.is_my_job);

    let saved = view.save_icon == SaveIcon::Filled;
    let phase_class = match view.phase {
        SavedPhase::Confirmed => "",
        SavedPhase::Pending => "save-pending",
        SavedPhase::Reverted => "save-reverted",
    };
    let save_title = if saved { "Saved" } else { "Save job" };

    rsx! {
        document::Link { rel: "stylesheet", href: JOB_CARD_CSS }
        div { class: "job-card",
            if view.loading {
                div { class: "bar-loader" }
            }

            div { class: "job-card-header",
                h3 { class: "job-card-title", "{job.title}" }
                if view.show_delete {
                    button {
                        class: "btn-icon btn-delete",
                        title: "Delete job",
                        disabled: view.delete_disabled,
                        onclick: on_delete,
                        TrashIcon {}
                    }
                }
            }

            div { class: "job-card-content",
                div { class: "job-card-meta",
                    if let Some(ref company) = job.company {
                        img {
                            class: "company-logo",
                            src: "{company.logo_url}",
                            alt: "{company.name}",
                        }
                    }
                    div { class: "job-location",
                        PinIcon {}
                        span { "{job.location}" }
                    }
                }
                hr {}
                p { class: "job-summary", "{summary}" }
            }

            if let Some(ref err) = view.error {
                div { class: "job-card-error",
                    span { "{err}" }
                    button {
                        onclick: move |_| card.write().dismiss_error(),
                        "×"
                    }
                }
            }

            div { class: "job-card-footer",
                Link { to: detail_route, class: "btn btn-secondary btn-block", "More Details" }
                if view.show_save {
                    button {
                        class: "btn btn-outline btn-save {phase_class}",
                        title: save_title,
                        disabled: view.save_disabled,
                        onclick: on_save,
                        HeartIcon { filled: saved }
                    }
                }
            }
        }
    }
}

/// Heart outline, filled red when the job is saved.
#[component]
fn HeartIcon(filled: bool) -> Element {
    let (fill, stroke) = if filled {
        ("red", "red")
    } else {
        ("none", "currentColor")
    };

    rsx! {
        svg {
            class: "icon icon-heart",
            width: "20",
            height: "20",
            view_box: "0 0 24 24",
            fill,
            stroke,
            stroke_width: "2",
            path { d: "M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z" }
        }
    }
}

#[component]
fn TrashIcon() -> Element {
    rsx! {
        svg {
            class: "icon icon-trash",
            width: "18",
            height: "18",
            view_box: "0 0 24 24",
            fill: "red",
            stroke: "currentColor",
            stroke_width: "2",
            path { d: "M3 6h18" }
            path { d: "M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6" }
            path { d: "M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2" }
        }
    }
}

#[component]
fn PinIcon() -> Element {
    rsx! {
        svg {
            class: "icon icon-pin",
            width: "15",
            height: "15",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            path { d: "M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z" }
            circle { cx: "12", cy: "10", r: "3" }
        }
    }
}
