//! Draft certification answers kept in Redis while the candidate works through the test.

use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

use crate::certification::answers::Answer;
use crate::errors::AppError;

pub fn progress_key(user_id: Uuid) -> String {
    format!("perspecta:progress:{user_id}")
}

/// Overwrites the saved draft and resets its TTL.
pub async fn save_progress(
    redis: &redis::Client,
    user_id: Uuid,
    answers: &[Answer],
    ttl_secs: u64,
) -> Result<(), AppError> {
    let payload = serde_json::to_string(answers)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize progress: {e}")))?;

    let mut conn = redis.get_multiplexed_async_connection().await?;
    conn.set_ex::<_, _, ()>(progress_key(user_id), payload, ttl_secs)
        .await?;

    debug!("Saved {} draft answers for user {user_id}", answers.len());
    Ok(())
}

pub async fn load_progress(
    redis: &redis::Client,
    user_id: Uuid,
) -> Result<Option<Vec<Answer>>, AppError> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    let payload: Option<String> = conn.get(progress_key(user_id)).await?;

    payload
        .map(|p| serde_json::from_str::<Vec<Answer>>(&p))
        .transpose()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt progress for {user_id}: {e}")))
}

pub async fn clear_progress(redis: &redis::Client, user_id: Uuid) -> Result<(), AppError> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    conn.del::<_, ()>(progress_key(user_id)).await?;
    Ok(())
}
