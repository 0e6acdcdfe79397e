//! Persistence of scored profiling quizzes.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::certification::answers::Answer;
use crate::certification::blend::ProfileInputs;
use crate::models::assessment::ProfileResultRow;
use crate::profile::riasec::ProfileResult;

pub async fn insert_profile(
    pool: &PgPool,
    user_id: Uuid,
    answers: &[Answer],
    profile: &ProfileResult,
) -> Result<ProfileResultRow> {
    let row = sqlx::query_as::<_, ProfileResultRow>(
        r#"
        INSERT INTO profile_results (id, user_id, answers, profile, holland_code)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(serde_json::to_value(answers)?)
    .bind(serde_json::to_value(profile)?)
    .bind(&profile.holland_code)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored profile {} for user {user_id} (holland={})",
        row.id, profile.holland_code
    );
    Ok(row)
}

/// Most recent profile of a user, if they took the quiz.
pub async fn latest_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileResult>> {
    let row = sqlx::query_as::<_, ProfileResultRow>(
        "SELECT * FROM profile_results WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.map(|r| serde_json::from_value::<ProfileResult>(r.profile))
        .transpose()
        .map_err(Into::into)
}

/// Profile data in the shape the certification blend expects.
pub fn profile_inputs(profile: Option<&ProfileResult>) -> ProfileInputs {
    match profile {
        Some(p) => ProfileInputs {
            riasec: p.has_riasec().then_some(p.riasec),
            cognitive: p.has_cognitive().then_some(p.cognitive),
        },
        None => ProfileInputs::default(),
    }
}
