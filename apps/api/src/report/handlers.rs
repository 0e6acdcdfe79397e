//! Axum route handlers for assessment reports.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::certification::handlers::UserIdQuery;
use crate::certification::store::{decode_result, get_result};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::profile::store::latest_profile;
use crate::report::composer::{compose_report, AssessmentReport, ReportInput};
use crate::report::storage::{get_report, store_report};
use crate::rome::catalog::match_jobs;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub user_id: Uuid,
    pub result_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_id: Uuid,
    pub s3_key: String,
    pub created_at: DateTime<Utc>,
    pub report: AssessmentReport,
}

/// POST /api/v1/reports
///
/// Composes a report for a stored result, runs it through the configured
/// writer, uploads the Markdown snapshot and records the report.
pub async fn handle_create_report(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let row = get_result(&state.db, request.result_id)
        .await?
        .filter(|r| r.user_id == request.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Result {} not found", request.result_id)))?;
    let result = decode_result(&row)?;

    let profile = latest_profile(&state.db, request.user_id).await?;
    let jobs = match_jobs(
        result.primary_role.role,
        result.secondary_role.as_ref().map(|r| r.role),
        profile.as_ref().and_then(|p| p.interest_code()),
    );

    let composed = compose_report(
        ReportInput {
            user_id: request.user_id,
            result_id: row.id,
            result: &result,
            profile: profile.as_ref(),
            jobs: &jobs,
        },
        Utc::now(),
    );
    let report = state.report_writer.write(composed).await?;

    let stored = store_report(&state.db, &state.s3, &state.config.s3_bucket, &report).await?;
    info!(
        "Report {} created for result {} (backend={}, ai={})",
        stored.id, row.id, stored.writer_backend, stored.ai_generated
    );

    Ok(Json(ReportResponse {
        report_id: stored.id,
        s3_key: stored.s3_key,
        created_at: stored.created_at,
        report,
    }))
}

/// GET /api/v1/reports/:id?user_id=
///
/// A report owned by another user is reported as missing.
pub async fn handle_get_report(
    State(state): State<AppState>,
    AppPath(report_id): AppPath<Uuid>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let row = get_report(&state.db, report_id)
        .await?
        .filter(|r| r.user_id == params.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;
    let report: AssessmentReport = serde_json::from_value(row.content)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt report {report_id}: {e}")))?;

    Ok(Json(ReportResponse {
        report_id: row.id,
        s3_key: row.s3_key,
        created_at: row.created_at,
        report,
    }))
}
