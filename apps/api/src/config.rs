use anyhow::{Context, Result};

/// Default lifetime of saved certification progress: 7 days.
const DEFAULT_PROGRESS_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// `false` switches reports to the template writer (no LLM call).
    pub enable_ai_reports: bool,
    pub progress_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            enable_ai_reports: parse_bool(
                "ENABLE_AI_REPORTS",
                std::env::var("ENABLE_AI_REPORTS").ok().as_deref(),
                true,
            )?,
            progress_ttl_secs: std::env::var("PROGRESS_TTL_SECS")
                .ok()
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("PROGRESS_TTL_SECS must be a number of seconds")?
                .unwrap_or(DEFAULT_PROGRESS_TTL_SECS),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_bool(key: &str, raw: Option<&str>, default: bool) -> Result<bool> {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("{key} must be a boolean, got '{other}'"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("X", Some("TRUE"), false).unwrap());
        assert!(parse_bool("X", Some("1"), false).unwrap());
        assert!(!parse_bool("X", Some("off"), true).unwrap());
    }

    #[test]
    fn test_parse_bool_defaults_when_unset_or_blank() {
        assert!(parse_bool("X", None, true).unwrap());
        assert!(!parse_bool("X", Some("  "), false).unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        let err = parse_bool("ENABLE_AI_REPORTS", Some("maybe"), true).unwrap_err();
        assert!(err.to_string().contains("ENABLE_AI_REPORTS"));
    }
}
