//! Database schema definitions using SurrealQL.

use crate::{DbError, get_db};

/// Initialize the database schema.
///
/// This creates all necessary tables, fields, and indexes.
pub async fn init_schema() -> Result<(), DbError> {
    let db = get_db()?;

    tracing::info!("Initializing database schema...");

    db.query(JOB_SCHEMA).await?.check()?;
    db.query(SAVED_JOB_SCHEMA).await?.check()?;

    tracing::info!("Database schema initialized");

    Ok(())
}

/// Job posting table schema.
const JOB_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS job SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS title ON job TYPE string;
DEFINE FIELD IF NOT EXISTS description ON job TYPE string;
DEFINE FIELD IF NOT EXISTS location ON job TYPE string;
DEFINE FIELD IF NOT EXISTS company ON job FLEXIBLE TYPE option<object>;
DEFINE FIELD IF NOT EXISTS recruiter_id ON job TYPE string;
DEFINE FIELD IF NOT EXISTS is_open ON job TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS created_at ON job TYPE string;

DEFINE INDEX IF NOT EXISTS job_recruiter ON job FIELDS recruiter_id;
DEFINE INDEX IF NOT EXISTS job_location ON job FIELDS location;
DEFINE INDEX IF NOT EXISTS job_created ON job FIELDS created_at;
"#;

/// Saved (bookmarked) jobs, one row per user and job.
const SAVED_JOB_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS saved_job SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS user_id ON saved_job TYPE string;
DEFINE FIELD IF NOT EXISTS job_id ON saved_job TYPE string;
DEFINE FIELD IF NOT EXISTS saved_at ON saved_job TYPE string;

DEFINE INDEX IF NOT EXISTS saved_user_job ON saved_job FIELDS user_id, job_id UNIQUE;
DEFINE INDEX IF NOT EXISTS saved_job_id ON saved_job FIELDS job_id;
"#;
