use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::report::writer::ReportWriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Draft certification answers.
    pub redis: RedisClient,
    /// Markdown report snapshots.
    pub s3: S3Client,
    pub config: Config,
    /// Template or LLM-backed report prose, chosen at startup via ENABLE_AI_REPORTS.
    pub report_writer: Arc<dyn ReportWriter>,
}
