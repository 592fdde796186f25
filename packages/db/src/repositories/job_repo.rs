//! Job repository for CRUD operations.

use board_core::{Company, Job, JobId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::SavedJobRepository;
use crate::{DbError, get_db};

/// Repository for job posting persistence.
pub struct JobRepository;

/// Stored job fields. The job id lives in the record id.
#[derive(Debug, Serialize, Deserialize)]
struct JobContent {
    title: String,
    description: String,
    location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    company: Option<Company>,
    recruiter_id: UserId,
    is_open: bool,
    created_at: DateTime<Utc>,
}

/// Internal record type for SurrealDB.
#[derive(Debug, Deserialize)]
struct JobRecord {
    id: Thing,
    #[serde(flatten)]
    content: JobContent,
}

impl From<&Job> for JobContent {
    fn from(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            company: job.company.clone(),
            recruiter_id: job.recruiter_id.clone(),
            is_open: job.is_open,
            created_at: job.created_at,
        }
    }
}

impl TryFrom<JobRecord> for Job {
    type Error = DbError;

    fn try_from(record: JobRecord) -> Result<Self, Self::Error> {
        let raw = record.id.id.to_raw();
        let id = JobId::parse(&raw)
            .map_err(|e| DbError::InvalidRecord(format!("job id {}: {}", raw, e)))?;
        let JobContent {
            title,
            description,
            location,
            company,
            recruiter_id,
            is_open,
            created_at,
        } = record.content;
        Ok(Job {
            id,
            title,
            description,
            location,
            company,
            recruiter_id,
            is_open,
            created_at,
        })
    }
}

/// Filter options for listing jobs.
#[derive(Debug, Default, Clone)]
pub struct JobFilter {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Exact location match.
    pub location: Option<String>,
    /// Only jobs posted by this user.
    pub recruiter_id: Option<UserId>,
    /// Skip closed jobs.
    pub open_only: bool,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl JobRepository {
    /// Create a new job in the database.
    pub async fn create(job: &Job) -> Result<Job, DbError> {
        let db = get_db()?;

        let record: Option<JobRecord> = db
            .create(("job", job.id.to_string()))
            .content(JobContent::from(job))
            .await?;

        record
            .ok_or_else(|| DbError::Query("Failed to create job".into()))?
            .try_into()
    }

    /// Get a job by ID.
    pub async fn get(id: JobId) -> Result<Job, DbError> {
        let db = get_db()?;

        let record: Option<JobRecord> = db.select(("job", id.to_string())).await?;

        record
            .ok_or_else(|| DbError::NotFound(format!("Job not found: {}", id)))?
            .try_into()
    }

    /// Fetch several jobs in one query. Missing ids are left out; order is
    /// unspecified.
    pub async fn get_many(ids: &[JobId]) -> Result<Vec<Job>, DbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = get_db()?;

        let things: Vec<Thing> = ids
            .iter()
            .map(|id| Thing::from(("job".to_string(), id.to_string())))
            .collect();

        let mut response = db
            .query("SELECT * FROM job WHERE id IN $ids")
            .bind(("ids", things))
            .await?;

        let records: Vec<JobRecord> = response.take(0)?;
        records.into_iter().map(Job::try_from).collect()
    }

    /// Check whether a job exists.
    pub async fn exists(id: JobId) -> Result<bool, DbError> {
        match Self::get(id).await {
            Ok(_) => Ok(true),
            Err(DbError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// List jobs with optional filtering, newest first.
    pub async fn list(filter: JobFilter) -> Result<Vec<Job>, DbError> {
        let db = get_db()?;

        let mut conditions = Vec::new();
        let mut bindings: Vec<(&str, serde_json::Value)> = Vec::new();

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            conditions.push("string::lowercase(title) CONTAINS $search");
            bindings.push(("search", serde_json::json!(search.to_lowercase())));
        }

        if let Some(location) = &filter.location {
            conditions.push("location = $location");
            bindings.push(("location", serde_json::json!(location)));
        }

        if let Some(recruiter_id) = &filter.recruiter_id {
            conditions.push("recruiter_id = $recruiter_id");
            bindings.push(("recruiter_id", serde_json::json!(recruiter_id.as_str())));
        }

        if filter.open_only {
            conditions.push("is_open = true");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = filter
            .limit
            .map(|l| format!("LIMIT {}", l))
            .unwrap_or_default();

        let offset_clause = filter
            .offset
            .map(|o| format!("START {}", o))
            .unwrap_or_default();

        let query = format!(
            "SELECT * FROM job {} ORDER BY created_at DESC {} {}",
            where_clause, limit_clause, offset_clause
        );

        let mut result = db.query(&query);

        for (name, value) in bindings {
            result = result.bind((name, value));
        }

        let mut response = result.await?;
        let records: Vec<JobRecord> = response.take(0)?;

        records.into_iter().map(Job::try_from).collect()
    }

    /// Jobs posted by a recruiter, newest first.
    pub async fn list_by_recruiter(recruiter_id: &UserId) -> Result<Vec<Job>, DbError> {
        Self::list(JobFilter {
            recruiter_id: Some(recruiter_id.clone()),
            ..Default::default()
        })
        .await
    }

    /// Open or close a job.
    pub async fn set_open(id: JobId, is_open: bool) -> Result<Job, DbError> {
        let db = get_db()?;

        let record: Option<JobRecord> = db
            .update(("job", id.to_string()))
            .merge(serde_json::json!({ "is_open": is_open }))
            .await?;

        record
            .ok_or_else(|| DbError::NotFound(format!("Job not found: {}", id)))?
            .try_into()
    }

    /// Delete a job and every bookmark of it.
    ///
    /// Returns `false` if the job did not exist.
    pub async fn delete(id: JobId) -> Result<bool, DbError> {
        let db = get_db()?;

        let removed: Option<JobRecord> = db.delete(("job", id.to_string())).await?;
        let dropped = SavedJobRepository::delete_for_job(id).await?;

        if removed.is_some() {
            tracing::info!("Deleted job {} ({} bookmarks removed)", id, dropped);
        }

        Ok(removed.is_some())
    }
}
