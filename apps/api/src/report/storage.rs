use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::assessment::ReportRow;
use crate::report::composer::{render_report_to_md, AssessmentReport};

pub fn report_s3_key(user_id: Uuid, report_id: Uuid) -> String {
    format!("reports/{user_id}/{report_id}.md")
}

/// Uploads the Markdown snapshot, then records the report row.
/// The row is only written once the upload has succeeded.
pub async fn store_report(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    report: &AssessmentReport,
) -> Result<ReportRow> {
    let report_id = Uuid::new_v4();
    let s3_key = report_s3_key(report.user_id, report_id);
    let md_content = render_report_to_md(report);

    s3.put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(md_content.into_bytes()))
        .content_type("text/markdown")
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Uploaded report to s3://{}/{}", s3_bucket, s3_key);

    let row = sqlx::query_as::<_, ReportRow>(
        r#"
        INSERT INTO reports
            (id, user_id, result_id, content, s3_key, writer_backend, ai_generated)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(report_id)
    .bind(report.user_id)
    .bind(report.result_id)
    .bind(serde_json::to_value(report)?)
    .bind(&s3_key)
    .bind(&report.writer_backend)
    .bind(report.ai_generated)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_report(pool: &PgPool, id: Uuid) -> Result<Option<ReportRow>> {
    Ok(
        sqlx::query_as::<_, ReportRow>("SELECT * FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}
