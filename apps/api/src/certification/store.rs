//! Persistence of scored certification attempts.

use anyhow::Result;
use chrono::{Datelike, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::certification::answers::Answer;
use crate::certification::scoring::CertificationResult;
use crate::models::assessment::AssessmentResultRow;

/// `PSP-<year>-<first 8 hex digits of the result id>`.
pub fn issue_certificate_code(year: i32, result_id: Uuid) -> String {
    let hex = result_id.simple().to_string();
    format!("PSP-{year}-{}", hex[..8].to_uppercase())
}

/// Inserts a scored attempt; certifiable results get a certificate code.
pub async fn insert_result(
    pool: &PgPool,
    user_id: Uuid,
    answers: &[Answer],
    result: &CertificationResult,
) -> Result<AssessmentResultRow> {
    let id = Uuid::new_v4();
    let certificate_code = result
        .certifiable
        .then(|| issue_certificate_code(Utc::now().year(), id));

    let row = sqlx::query_as::<_, AssessmentResultRow>(
        r#"
        INSERT INTO assessment_results
            (id, user_id, answers, result, level, primary_role,
             effective_score, certifiable, certificate_code)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(serde_json::to_value(answers)?)
    .bind(serde_json::to_value(result)?)
    .bind(result.level.as_str())
    .bind(result.primary_role.role.as_str())
    .bind(result.effective_score)
    .bind(result.certifiable)
    .bind(&certificate_code)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored certification result {id} for user {user_id} (level={}, certifiable={})",
        result.level.as_str(),
        result.certifiable
    );
    Ok(row)
}

pub async fn get_result(pool: &PgPool, id: Uuid) -> Result<Option<AssessmentResultRow>> {
    Ok(
        sqlx::query_as::<_, AssessmentResultRow>("SELECT * FROM assessment_results WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn find_by_certificate_code(
    pool: &PgPool,
    code: &str,
) -> Result<Option<AssessmentResultRow>> {
    Ok(sqlx::query_as::<_, AssessmentResultRow>(
        "SELECT * FROM assessment_results WHERE certificate_code = $1",
    )
    .bind(code.trim().to_uppercase())
    .fetch_optional(pool)
    .await?)
}

/// Decodes the stored JSON result back into the scoring model.
pub fn decode_result(row: &AssessmentResultRow) -> Result<CertificationResult> {
    Ok(serde_json::from_value(row.result.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_code_format() {
        let id = Uuid::parse_str("3f2a9c10-0000-4000-8000-000000000000").unwrap();
        assert_eq!(issue_certificate_code(2026, id), "PSP-2026-3F2A9C10");
    }
}
