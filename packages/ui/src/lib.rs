//! This crate contains all shared UI for the workspace.

// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

mod actions;
pub use actions::{CardSignal, ServerJobActions};

mod create_job_form;
pub use create_job_form::CreateJobForm;

mod job_card;
pub use job_card::JobCard;

mod job_card_list;
pub use job_card_list::{JobCardList, ListingSource};

pub mod pages;
