//! Create job form component.

use api::CreateJobRequest;
use board_core::CurrentUser;
use dioxus::prelude::*;

/// Props for CreateJobForm component.
#[derive(Props, Clone, PartialEq)]
pub struct CreateJobFormProps {
    /// User posting the job.
    pub recruiter: CurrentUser,
    /// Callback when job is created.
    pub on_created: EventHandler<()>,
    /// Callback when form is cancelled.
    pub on_cancel: EventHandler<()>,
}

/// Form component for posting a new job.
#[component]
pub fn CreateJobForm(props: CreateJobFormProps) -> Element {
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut location = use_signal(|| "Remote".to_string());
    let mut company = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let recruiter_id = props.recruiter.id.clone();

    let submit = move |_| {
        let request = CreateJobRequest {
            recruiter_id: recruiter_id.clone(),
            title: title(),
            description: description(),
            location: location(),
            company_name: Some(company()).filter(|c| !c.trim().is_empty()),
            company_logo_url: None,
        };

        spawn(async move {
            submitting.set(true);
            error.set(None);

            if request.title.trim().is_empty() {
                error.set(Some("Title is required".to_string()));
                submitting.set(false);
                return;
            }

            match api::create_job(request).await {
                Ok(job) => {
                    tracing::info!("Posted job {}", job.id);
                    props.on_created.call(());
                }
                Err(e) => {
                    error.set(Some(format!("Failed to post job: {}", e)));
                }
            }

            submitting.set(false);
        });
    };

    rsx! {
        div { class: "create-job-form",
            h3 { "Post a Job" }

            if let Some(err) = error() {
                div { class: "error-message", "{err}" }
            }

            div { class: "form-group",
                label { "Title" }
                input {
                    r#type: "text",
                    value: "{title}",
                    oninput: move |e| title.set(e.value()),
                }
            }

            div { class: "form-group",
                label { "Location" }
                input {
                    r#type: "text",
                    value: "{location}",
                    oninput: move |e| location.set(e.value()),
                }
            }

            div { class: "form-group",
                label { "Company" }
                input {
                    r#type: "text",
                    placeholder: "Optional",
                    value: "{company}",
                    oninput: move |e| company.set(e.value()),
                }
            }

            div { class: "form-group",
                label { "Description" }
                textarea {
                    rows: 5,
                    value: "{description}",
                    oninput: move |e| description.set(e.value()),
                }
            }

            div { class: "form-actions",
                button {
                    class: "btn btn-primary",
                    disabled: submitting(),
                    onclick: submit,
                    if submitting() { "Posting..." } else { "Post Job" }
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| props.on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
