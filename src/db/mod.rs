//! Database module - AppState and database operations
//!
//! This module is split into submodules for better separation of concerns:
//! - `submission` - Postgres implementation of the submission repository
//! - `user` - User account operations
//! - `department` - Department records
//! - `task` - Weekly task plans
//! - `project` - Project overviews
//! - `letter` - Persisted offer letters and completion certificates

pub mod department;
pub mod letter;
pub mod project;
pub mod submission;
pub mod task;
pub mod user;

use dotenvy::dotenv;
use moka::future::Cache;
use sqlx::PgPool;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::mail::Mailer;
use crate::media::{HostedMediaStore, MediaConfig, MediaStore};
use crate::submission::{SubmissionConsolidator, SubmissionRepository};

pub use submission::PgSubmissionRepository;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub http_client: reqwest::Client,
    pub media: Arc<dyn MediaStore>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub consolidator: SubmissionConsolidator,
    pub department_cache: Cache<String, Vec<crate::department::models::Department>>,
    pub task_cache: Cache<String, crate::task::models::Task>,
    pub mailer: Option<Arc<Mailer>>,
}

impl AppState {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok(); // Load .env file
        let media_config = MediaConfig::from_env()?;
        Self::new_with_config(media_config).await
    }

    pub async fn new_with_config(
        media_config: MediaConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(100)
            .min_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(900))
            .max_lifetime(std::time::Duration::from_secs(1800))
            .connect(&database_url)
            .await?;

        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent("renu-internship-server/1.0")
            .build()
            .expect("Failed to create reqwest client");

        let media: Arc<dyn MediaStore> =
            Arc::new(HostedMediaStore::new(media_config, http_client.clone()));
        let submissions: Arc<dyn SubmissionRepository> =
            Arc::new(PgSubmissionRepository::new(pool.clone()));

        let mailer = match Mailer::from_env() {
            Ok(mailer) => Some(Arc::new(mailer)),
            Err(e) => {
                log::warn!("Mailer disabled, password-reset mail will fail: {e}");
                None
            }
        };

        Ok(Self::assemble(pool, http_client, media, submissions, mailer))
    }

    /// Wiring for tests: callers provide the pool and both collaborators.
    pub fn new_with_pool_and_media(
        pool: PgPool,
        media: Arc<dyn MediaStore>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent("renu-internship-server/1.0")
            .build()
            .expect("Failed to create reqwest client");

        Self::assemble(pool, http_client, media, submissions, None)
    }

    fn assemble(
        pool: PgPool,
        http_client: reqwest::Client,
        media: Arc<dyn MediaStore>,
        submissions: Arc<dyn SubmissionRepository>,
        mailer: Option<Arc<Mailer>>,
    ) -> Self {
        let department_cache = Cache::builder()
            .time_to_live(Duration::from_secs(10 * 60))
            .max_capacity(10)
            .build();

        let task_cache = Cache::builder()
            .time_to_live(Duration::from_secs(10 * 60))
            .max_capacity(100)
            .build();

        let consolidator = SubmissionConsolidator::new(media.clone(), submissions.clone());

        AppState {
            pool,
            http_client,
            media,
            submissions,
            consolidator,
            department_cache,
            task_cache,
            mailer,
        }
    }
}
