//! Page components for route-based navigation.

mod job_detail_page;
mod jobs_page;
mod my_jobs_page;
mod saved_jobs_page;

pub use job_detail_page::JobDetailPage;
pub use jobs_page::JobsPage;
pub use my_jobs_page::MyJobsPage;
pub use saved_jobs_page::SavedJobsPage;
