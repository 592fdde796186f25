//! Core domain types for the job board.
//!
//! This crate contains shared types used across all packages:
//! - Job, Company and JobListing for postings
//! - Save/delete action parameters, responses and the invoker trait
//! - The job card state machine

mod actions;
pub mod card;
mod job;
mod user;

pub use actions::{
    ActionError, ActionFuture, ActionKind, ActionResponse, DeleteJobParams, JobActions,
    SaveJobParams,
};
pub use card::{
    ActionOutcome, Activity, CardState, CardStore, CardView, SaveIcon, SavedPhase,
};
pub use job::{Company, Job, JobId, JobListing, detail_route, summarize};
pub use user::{CurrentUser, UserId};
