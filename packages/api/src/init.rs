//! Server initialization for the job board.

use std::sync::LazyLock;

use board_core::{Company, Job, UserId};
use db::DbError;
use db::repositories::{JobFilter, JobRepository};
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::{BoardConfig, DEMO_USER_ID};

static INITIALIZED: LazyLock<OnceCell<()>> = LazyLock::new(OnceCell::new);

/// Errors raised while bringing the server up.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("database: {0}")]
    Db(#[from] DbError),
}

/// Initialize the job board once, from the environment.
///
/// Concurrent first requests wait for the same initialization.
pub async fn ensure_initialized() -> Result<(), InitError> {
    INITIALIZED
        .get_or_try_init(|| init_job_board(BoardConfig::from_env()))
        .await
        .map(|_| ())
}

/// Initialize the job board.
///
/// This should be called once at server startup before handling requests.
pub async fn init_job_board(config: BoardConfig) -> Result<(), InitError> {
    tracing::info!("Initializing job board...");

    db::init(config.db).await?;

    if config.seed_demo {
        seed_demo_jobs().await?;
    }

    tracing::info!("Job board initialized");
    Ok(())
}

/// Insert a handful of postings when the board is empty.
async fn seed_demo_jobs() -> Result<(), InitError> {
    let existing = JobRepository::list(JobFilter {
        limit: Some(1),
        ..Default::default()
    })
    .await?;
    if !existing.is_empty() {
        return Ok(());
    }

    tracing::info!("Seeding demo jobs...");

    let jobs = demo_jobs();
    for job in &jobs {
        JobRepository::create(job).await?;
    }

    tracing::info!("Seeded {} demo jobs", jobs.len());
    Ok(())
}

/// Postings inserted into an empty board. Logos are served from the web
/// package's `public/` directory.
pub fn demo_jobs() -> Vec<Job> {
    let demo_user = UserId::new(DEMO_USER_ID);
    let other = UserId::new("user_acme_hr");

    vec![
        Job::new(
            other.clone(),
            "Backend Engineer",
            "Build the services behind our checkout. Rust and Postgres experience welcome.",
            "Berlin",
        )
        .with_company(Company::new("Acme", "/companies/acme.svg")),
        Job::new(
            other.clone(),
            "Site Reliability Engineer",
            "Keep the lights on across three regions. On-call is shared and paid.",
            "Remote",
        )
        .with_company(Company::new("Acme", "/companies/acme.svg")),
        Job::new(
            other,
            "Product Designer",
            "Own the design of our mobile app end to end",
            "Lisbon",
        ),
        Job::new(
            demo_user.clone(),
            "Frontend Developer",
            "Great role. Apply now.",
            "Amsterdam",
        )
        .with_company(Company::new("Demo Labs", "/companies/demo-labs.svg")),
        Job::new(
            demo_user,
            "Data Analyst",
            "Turn product telemetry into decisions. SQL required.",
            "Remote",
        )
        .with_company(Company::new("Demo Labs", "/companies/demo-labs.svg")),
    ]
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn demo_logos_exist_in_web_public_dir() {
        let public = Path::new(env!("CARGO_MANIFEST_DIR")).join("../web/public");
        let logos: Vec<String> = demo_jobs()
            .into_iter()
            .filter_map(|job| job.company.map(|c| c.logo_url))
            .collect();

        assert!(!logos.is_empty());
        for logo in logos {
            let file = public.join(logo.trim_start_matches('/'));
            assert!(file.is_file(), "missing logo {}", file.display());
        }
    }

    #[test]
    fn demo_user_owns_some_postings() {
        let demo_user = UserId::new(DEMO_USER_ID);
        let owned = demo_jobs()
            .iter()
            .filter(|job| job.is_posted_by(&demo_user))
            .count();
        assert_eq!(owned, 2);
    }
}
