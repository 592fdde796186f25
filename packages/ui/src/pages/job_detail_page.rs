//! Job detail page - full description of one job.

use board_core::{CurrentUser, Job};
use dioxus::prelude::*;

/// Props for JobDetailPage.
#[derive(Props, Clone, PartialEq)]
pub struct JobDetailPageProps {
    pub job_id: String,
    pub user: Option<CurrentUser>,
}

/// Job detail page component.
#[component]
pub fn JobDetailPage(props: JobDetailPageProps) -> Element {
    let job_id = props.job_id.clone();
    let job_resource = use_resource(use_reactive!(|(job_id)| async move {
        api::get_job(job_id).await.map_err(|e| e.to_string())
    }));

    let body = match &*job_resource.read() {
        None => rsx! {
            div { class: "loading", "Loading job..." }
        },
        Some(Err(err)) => rsx! {
            div { class: "error-banner",
                span { "Failed to load job: {err}" }
            }
        },
        Some(Ok(None)) => rsx! {
            div { class: "empty-state",
                p { "Job not found" }
            }
        },
        Some(Ok(Some(job))) => rsx! {
            JobDetails { job: job.clone(), user: props.user.clone() }
        },
    };

    rsx! {
        div { class: "page-container",
            nav { class: "breadcrumb",
                Link { to: "/", class: "breadcrumb-link", "Jobs" }
                span { class: "breadcrumb-separator", "/" }
                span { class: "breadcrumb-current", "Details" }
            }
            {body}
        }
    }
}

#[component]
fn JobDetails(job: Job, user: Option<CurrentUser>) -> Element {
    let posted = job.created_at.format("%Y-%m-%d").to_string();
    let (status_class, status_text) = if job.is_open {
        ("badge-open", "Open")
    } else {
        ("badge-closed", "Closed")
    };
    let is_mine = user.as_ref().is_some_and(|u| job.is_posted_by(&u.id));

    rsx! {
        div { class: "job-detail",
            div { class: "page-header",
                div { class: "page-header-content",
                    div { class: "page-header-title-row",
                        h1 { class: "page-title", "{job.title}" }
                        span { class: "status-badge {status_class}", {status_text} }
                    }
                    if let Some(ref company) = job.company {
                        div { class: "job-detail-company",
                            img { class: "company-logo", src: "{company.logo_url}", alt: "{company.name}" }
                            span { "{company.name}" }
                        }
                    }
                }
            }

            div { class: "detail-row",
                span { class: "detail-label", "Location" }
                span { class: "detail-value", "{job.location}" }
            }
            div { class: "detail-row",
                span { class: "detail-label", "Posted" }
                span { class: "detail-value", "{posted}" }
            }
            if is_mine {
                div { class: "detail-row",
                    span { class: "detail-label", "Owner" }
                    span { class: "detail-value", "You posted this job" }
                }
            }

            div { class: "detail-section",
                h4 { "About the job" }
                p { class: "job-description", "{job.description}" }
            }
        }
    }
}
