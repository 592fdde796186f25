//! Repository implementations for database operations.

mod job_repo;
mod saved_job_repo;

pub use job_repo::{JobFilter, JobRepository};
pub use saved_job_repo::{SavedJob, SavedJobRepository};
