//! Saved job (bookmark) repository.

use std::collections::{HashMap, HashSet};

use board_core::{Job, JobId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::JobRepository;
use crate::{DbError, get_db};

/// Repository for users' saved jobs.
pub struct SavedJobRepository;

/// A user's bookmark of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    pub user_id: UserId,
    pub job_id: JobId,
    pub saved_at: DateTime<Utc>,
}

/// Record key for a user/job pair.
fn saved_key(user_id: &UserId, job_id: JobId) -> String {
    format!("{}_{}", user_id, job_id)
}

impl SavedJobRepository {
    /// Bookmark a job for a user.
    ///
    /// Saving twice keeps the original bookmark.
    pub async fn save(user_id: &UserId, job_id: JobId) -> Result<SavedJob, DbError> {
        let db = get_db()?;
        let key = saved_key(user_id, job_id);

        let existing: Option<SavedJob> = db.select(("saved_job", key.as_str())).await?;
        if let Some(saved) = existing {
            return Ok(saved);
        }

        let saved = SavedJob {
            user_id: user_id.clone(),
            job_id,
            saved_at: Utc::now(),
        };

        let record: Option<SavedJob> = db
            .create(("saved_job", key.as_str()))
            .content(saved)
            .await?;

        record.ok_or_else(|| DbError::Query("Failed to save job".into()))
    }

    /// Remove a bookmark. Returns `false` if there was none.
    pub async fn unsave(user_id: &UserId, job_id: JobId) -> Result<bool, DbError> {
        let db = get_db()?;

        let removed: Option<SavedJob> = db
            .delete(("saved_job", saved_key(user_id, job_id)))
            .await?;

        Ok(removed.is_some())
    }

    /// Whether a user has bookmarked a job.
    pub async fn is_saved(user_id: &UserId, job_id: JobId) -> Result<bool, DbError> {
        let db = get_db()?;

        let record: Option<SavedJob> = db
            .select(("saved_job", saved_key(user_id, job_id)))
            .await?;

        Ok(record.is_some())
    }

    /// Bookmarks of a user, most recent first.
    pub async fn list_for_user(user_id: &UserId) -> Result<Vec<SavedJob>, DbError> {
        let db = get_db()?;

        let mut response = db
            .query(
                r#"
                SELECT user_id, job_id, saved_at, <datetime> saved_at AS saved_order
                FROM saved_job
                WHERE user_id = $user_id
                ORDER BY saved_order DESC
                "#,
            )
            .bind(("user_id", user_id.as_str().to_string()))
            .await?;

        let saved: Vec<SavedJob> = response.take(0)?;
        Ok(saved)
    }

    /// Ids of the jobs a user has bookmarked.
    pub async fn saved_job_ids(user_id: &UserId) -> Result<HashSet<JobId>, DbError> {
        Ok(Self::list_for_user(user_id)
            .await?
            .into_iter()
            .map(|s| s.job_id)
            .collect())
    }

    /// Jobs a user has bookmarked, most recently saved first.
    ///
    /// Bookmarks pointing at jobs that no longer exist are skipped.
    pub async fn list_saved_jobs(user_id: &UserId) -> Result<Vec<Job>, DbError> {
        let saved = Self::list_for_user(user_id).await?;
        let ids: Vec<JobId> = saved.iter().map(|s| s.job_id).collect();

        let mut by_id: HashMap<JobId, Job> = JobRepository::get_many(&ids)
            .await?
            .into_iter()
            .map(|job| (job.id, job))
            .collect();

        let mut jobs = Vec::with_capacity(by_id.len());
        for id in ids {
            match by_id.remove(&id) {
                Some(job) => jobs.push(job),
                None => tracing::debug!("Skipping bookmark of missing job {}", id),
            }
        }
        Ok(jobs)
    }

    /// Remove every bookmark of a job. Returns how many were removed.
    pub async fn delete_for_job(job_id: JobId) -> Result<usize, DbError> {
        let db = get_db()?;

        let mut response = db
            .query("DELETE saved_job WHERE job_id = $job_id RETURN BEFORE")
            .bind(("job_id", job_id.to_string()))
            .await?;

        let removed: Vec<SavedJob> = response.take(0)?;
        Ok(removed.len())
    }
}
