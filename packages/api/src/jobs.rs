//! Job board server functions.

use board_core::{ActionResponse, DeleteJobParams, Job, JobListing, SaveJobParams, UserId};
use dioxus::prelude::*;

#[cfg(feature = "server")]
use board_core::JobId;

/// Request type for searching job listings.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListJobsRequest {
    /// User whose saved status is attached to each listing.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Case-insensitive title search.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request type for posting a job.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateJobRequest {
    pub recruiter_id: UserId,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_logo_url: Option<String>,
}

#[cfg(feature = "server")]
async fn initialized() -> Result<(), ServerFnError> {
    crate::ensure_initialized()
        .await
        .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))
}

#[cfg(feature = "server")]
fn db_error(e: db::DbError) -> ServerFnError {
    ServerFnError::new(format!("Database error: {}", e))
}

/// Pair jobs with the saved status of a user.
#[cfg(feature = "server")]
async fn to_listings(jobs: Vec<Job>, user_id: Option<&UserId>) -> Result<Vec<JobListing>, ServerFnError> {
    use db::repositories::SavedJobRepository;

    let saved = match user_id {
        Some(user_id) => SavedJobRepository::saved_job_ids(user_id)
            .await
            .map_err(db_error)?,
        None => Default::default(),
    };

    Ok(jobs
        .into_iter()
        .map(|job| {
            let is_saved = saved.contains(&job.id);
            JobListing::new(job, is_saved)
        })
        .collect())
}

/// Bookmark a job for a user.
#[post("/api/jobs/save")]
pub async fn save_job(params: SaveJobParams) -> Result<ActionResponse, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::{JobRepository, SavedJobRepository};

        initialized().await?;

        if params.user_id.as_str().trim().is_empty() {
            return Ok(ActionResponse::failed("Missing user id"));
        }

        if !JobRepository::exists(params.job_id).await.map_err(db_error)? {
            tracing::warn!("Save of unknown job {} by {}", params.job_id, params.user_id);
            return Ok(ActionResponse::failed(format!("Job not found: {}", params.job_id)));
        }

        SavedJobRepository::save(&params.user_id, params.job_id)
            .await
            .map_err(db_error)?;

        tracing::info!("User {} saved job {}", params.user_id, params.job_id);
        Ok(ActionResponse::ok())
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Delete a job posting.
#[post("/api/jobs/delete")]
pub async fn delete_job(params: DeleteJobParams) -> Result<ActionResponse, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::JobRepository;

        initialized().await?;

        if JobRepository::delete(params.job_id).await.map_err(db_error)? {
            Ok(ActionResponse::ok())
        } else {
            Ok(ActionResponse::failed(format!("Job not found: {}", params.job_id)))
        }
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Search open jobs.
#[post("/api/jobs/search")]
pub async fn list_jobs(request: ListJobsRequest) -> Result<Vec<JobListing>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::{JobFilter, JobRepository};

        initialized().await?;

        let filter = JobFilter {
            search: request.search,
            location: request.location.filter(|l| !l.is_empty()),
            open_only: true,
            limit: Some(request.limit.unwrap_or(100)),
            ..Default::default()
        };

        let jobs = JobRepository::list(filter).await.map_err(db_error)?;
        to_listings(jobs, request.user_id.as_ref()).await
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Jobs a user has saved.
#[get("/api/users/:user_id/saved-jobs")]
pub async fn list_saved_jobs(user_id: String) -> Result<Vec<JobListing>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::SavedJobRepository;

        initialized().await?;

        let jobs = SavedJobRepository::list_saved_jobs(&UserId::new(user_id))
            .await
            .map_err(db_error)?;

        Ok(jobs.into_iter().map(|job| JobListing::new(job, true)).collect())
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Jobs posted by a user.
#[get("/api/users/:user_id/jobs")]
pub async fn list_my_jobs(user_id: String) -> Result<Vec<JobListing>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::JobRepository;

        initialized().await?;

        let user_id = UserId::new(user_id);
        let jobs = JobRepository::list_by_recruiter(&user_id)
            .await
            .map_err(db_error)?;
        to_listings(jobs, Some(&user_id)).await
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Get a job by ID.
#[get("/api/jobs/:id")]
pub async fn get_job(id: String) -> Result<Option<Job>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::DbError;
        use db::repositories::JobRepository;

        initialized().await?;

        let job_id = JobId::parse(&id)
            .map_err(|e| ServerFnError::new(format!("Invalid job ID: {}", e)))?;

        match JobRepository::get(job_id).await {
            Ok(job) => Ok(Some(job)),
            Err(DbError::NotFound(_)) => Ok(None),
            Err(e) => Err(db_error(e)),
        }
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Post a new job.
#[post("/api/jobs/create")]
pub async fn create_job(request: CreateJobRequest) -> Result<Job, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use board_core::Company;
        use db::repositories::JobRepository;

        initialized().await?;

        if request.title.trim().is_empty() {
            return Err(ServerFnError::new("Title is required"));
        }

        let mut job = Job::new(
            request.recruiter_id,
            request.title.trim(),
            request.description,
            request.location,
        );
        if let Some(name) = request.company_name.filter(|n| !n.trim().is_empty()) {
            job = job.with_company(Company::new(
                name,
                request.company_logo_url.unwrap_or_default(),
            ));
        }

        let created = JobRepository::create(&job).await.map_err(db_error)?;
        tracing::info!("Job {} posted by {}", created.id, created.recruiter_id);
        Ok(created)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
