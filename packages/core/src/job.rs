//! Job listing domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::UserId;

/// Unique identifier for a job listing, using ULID for chronological sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Ulid);

impl JobId {
    /// Create a new unique job ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a job ID from a string.
    pub fn parse(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Company that posted a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// URL or asset path of the company logo.
    pub logo_url: String,
}

impl Company {
    pub fn new(name: impl Into<String>, logo_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo_url: logo_url.into(),
        }
    }
}

/// A job listing as shown on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier for this job.
    pub id: JobId,
    pub title: String,
    /// Free-form description; the first sentence doubles as the card summary.
    pub description: String,
    pub location: String,
    /// Company that posted the job, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    /// User who posted the job.
    pub recruiter_id: UserId,
    /// Whether the job still accepts applications.
    #[serde(default = "default_open")]
    pub is_open: bool,
    /// When the job was posted.
    pub created_at: DateTime<Utc>,
}

fn default_open() -> bool {
    true
}

impl Job {
    /// Create a new open job posted by `recruiter_id`.
    pub fn new(
        recruiter_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: JobId::new(),
            title: title.into(),
            description: description.into(),
            location: location.into(),
            company: None,
            recruiter_id,
            is_open: true,
            created_at: Utc::now(),
        }
    }

    /// Attach the posting company.
    pub fn with_company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }

    /// Mark the job as closed or open.
    pub fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    /// Card summary: the description up to and including its first period.
    ///
    /// A description without a period is returned whole.
    pub fn summary(&self) -> String {
        summarize(&self.description)
    }

    /// Route of the detail page for this job.
    pub fn detail_route(&self) -> String {
        detail_route(self.id)
    }

    /// Whether `user` posted this job.
    pub fn is_posted_by(&self, user: &UserId) -> bool {
        &self.recruiter_id == user
    }
}

/// Truncate a description to its first sentence.
pub fn summarize(description: &str) -> String {
    let text = description.trim();
    match text.find('.') {
        Some(end) => format!("{}.", text[..end].trim_end()),
        None => text.to_string(),
    }
}

/// Route of the detail page for a job id.
pub fn detail_route(id: JobId) -> String {
    format!("/job/{}", id)
}

/// A job paired with the requesting user's saved status.
///
/// This is what list endpoints return; `saved` is the authoritative value the
/// card reconciles against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub job: Job,
    #[serde(default)]
    pub saved: bool,
}

impl JobListing {
    pub fn new(job: Job, saved: bool) -> Self {
        Self { job, saved }
    }
}
