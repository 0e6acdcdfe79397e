//! Axum route handlers for the profiling quiz.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::certification::answers::Answer;
use crate::certification::handlers::UserIdQuery;
use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::profile::riasec::{
    public_profile_questions, score_profile, ProfileResult, PublicProfileQuestion,
};
use crate::profile::store::{insert_profile, latest_profile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileSubmitRequest {
    pub user_id: Uuid,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Serialize)]
pub struct ProfileSubmitResponse {
    pub profile_id: Uuid,
    pub profile: ProfileResult,
}

/// GET /api/v1/profile/questions
pub async fn handle_list_profile_questions() -> Json<Vec<PublicProfileQuestion>> {
    Json(public_profile_questions())
}

/// POST /api/v1/profile/submit
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    AppJson(request): AppJson<ProfileSubmitRequest>,
) -> Result<Json<ProfileSubmitResponse>, AppError> {
    if request.answers.is_empty() {
        return Err(AppError::Validation("answers cannot be empty".to_string()));
    }

    let profile = score_profile(&request.answers)?;
    let row = insert_profile(&state.db, request.user_id, &request.answers, &profile).await?;

    Ok(Json(ProfileSubmitResponse {
        profile_id: row.id,
        profile,
    }))
}

/// GET /api/v1/profile/latest
pub async fn handle_latest_profile(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<ProfileResult>, AppError> {
    latest_profile(&state.db, params.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", params.user_id)))
}
