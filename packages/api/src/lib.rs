//! Server API functions for the job board.
//!
//! This crate contains all shared fullstack server functions for:
//! - Job actions (save, delete) issued by job cards
//! - Job listings (search, saved, posted by me, detail)
//! - Posting new jobs

mod jobs;

#[cfg(feature = "server")]
mod config;

#[cfg(feature = "server")]
mod init;

// Re-export all server functions
pub use jobs::*;

#[cfg(feature = "server")]
pub use config::BoardConfig;

#[cfg(feature = "server")]
pub use init::*;

/// User id of the demo account that is signed in by default and owns some
/// of the seeded postings.
pub const DEMO_USER_ID: &str = "user_demo";

// Re-export core types for convenience
pub use board_core::{
    ActionResponse, Company, CurrentUser, DeleteJobParams, Job, JobId, JobListing, SaveJobParams,
    UserId,
};
