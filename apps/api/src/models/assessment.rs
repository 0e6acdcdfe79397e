use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentResultRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub answers: Value,
    pub result: Value,
    pub level: String,
    pub primary_role: String,
    pub effective_score: f64,
    pub certifiable: bool,
    pub certificate_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileResultRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub answers: Value,
    pub profile: Value,
    pub holland_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub result_id: Uuid,
    pub content: Value,
    pub s3_key: String,
    pub writer_backend: String,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}
