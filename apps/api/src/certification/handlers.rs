//! Axum route handlers for the certification test.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::certification::answers::Answer;
use crate::certification::questions::{question_bank, PublicQuestion};
use crate::certification::scoring::{normalize_answers, score_certification, CertificationResult};
use crate::certification::session::{clear_progress, load_progress, save_progress};
use crate::certification::store::{
    decode_result, find_by_certificate_code, get_result, insert_result,
};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::profile::store::{latest_profile, profile_inputs};
use crate::rome::catalog::{match_jobs, RomeMatch};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    pub user_id: Uuid,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub answers: Vec<Answer>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub user_id: Uuid,
    pub answers: Vec<Answer>,
    /// Blend the user's latest profiling quiz into the scores. Defaults to true.
    pub use_profile: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub result_id: Uuid,
    pub certificate_code: Option<String>,
    pub result: CertificationResult,
    pub job_matches: Vec<RomeMatch>,
}

#[derive(Debug, Serialize)]
pub struct StoredResultResponse {
    pub result_id: Uuid,
    pub user_id: Uuid,
    pub certificate_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub result: CertificationResult,
}

#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub certificate_code: String,
    pub level: String,
    pub primary_role: String,
    pub effective_score: f64,
    pub issued_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/certification/questions
pub async fn handle_list_questions() -> Json<Vec<PublicQuestion>> {
    Json(question_bank().iter().map(PublicQuestion::from).collect())
}

/// GET /api/v1/certification/progress
pub async fn handle_get_progress(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<ProgressResponse>, AppError> {
    let answers = load_progress(&state.redis, params.user_id)
        .await?
        .unwrap_or_default();
    Ok(Json(ProgressResponse { answers }))
}

/// PUT /api/v1/certification/progress
///
/// Drafts are validated like a submission so a bad answer surfaces early.
pub async fn handle_save_progress(
    State(state): State<AppState>,
    AppJson(request): AppJson<SaveProgressRequest>,
) -> Result<StatusCode, AppError> {
    normalize_answers(&request.answers)?;
    save_progress(
        &state.redis,
        request.user_id,
        &request.answers,
        state.config.progress_ttl_secs,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/certification/progress
pub async fn handle_clear_progress(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    clear_progress(&state.redis, params.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/certification/submit
///
/// Scores the answers (blended with the latest profile unless disabled),
/// stores the attempt, clears the draft and returns matching ROME jobs.
pub async fn handle_submit(
    State(state): State<AppState>,
    AppJson(request): AppJson<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    if request.answers.is_empty() {
        return Err(AppError::Validation("answers cannot be empty".to_string()));
    }
    // Reject malformed answers before touching the database.
    normalize_answers(&request.answers)?;

    let profile = if request.use_profile.unwrap_or(true) {
        latest_profile(&state.db, request.user_id).await?
    } else {
        None
    };

    let result = score_certification(&request.answers, &profile_inputs(profile.as_ref()))?;
    info!(
        "Certification scored for user {}: level={} effective={:.1} coherence={:.2}",
        request.user_id,
        result.level.as_str(),
        result.effective_score,
        result.coherence.score
    );

    let row = insert_result(&state.db, request.user_id, &request.answers, &result).await?;

    if let Err(e) = clear_progress(&state.redis, request.user_id).await {
        warn!("Could not clear draft for user {}: {e}", request.user_id);
    }

    let job_matches = match_jobs(
        result.primary_role.role,
        result.secondary_role.as_ref().map(|r| r.role),
        profile.as_ref().and_then(|p| p.interest_code()),
    );

    Ok(Json(SubmitResponse {
        result_id: row.id,
        certificate_code: row.certificate_code,
        result,
        job_matches,
    }))
}

/// GET /api/v1/certification/results/:id?user_id=
///
/// A result owned by another user is reported as missing.
pub async fn handle_get_result(
    State(state): State<AppState>,
    AppPath(result_id): AppPath<Uuid>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<StoredResultResponse>, AppError> {
    let row = get_result(&state.db, result_id)
        .await?
        .filter(|r| r.user_id == params.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Result {result_id} not found")))?;
    let result = decode_result(&row)?;

    Ok(Json(StoredResultResponse {
        result_id: row.id,
        user_id: row.user_id,
        certificate_code: row.certificate_code,
        created_at: row.created_at,
        result,
    }))
}

/// GET /api/v1/certification/verify/:code
pub async fn handle_verify(
    State(state): State<AppState>,
    AppPath(code): AppPath<String>,
) -> Result<Json<VerificationResponse>, AppError> {
    let row = find_by_certificate_code(&state.db, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Certificate {code} not found")))?;
    let certificate_code = row
        .certificate_code
        .ok_or_else(|| AppError::NotFound(format!("Certificate {code} not found")))?;

    Ok(Json(VerificationResponse {
        certificate_code,
        level: row.level,
        primary_role: row.primary_role,
        effective_score: row.effective_score,
        issued_at: row.created_at,
    }))
}
