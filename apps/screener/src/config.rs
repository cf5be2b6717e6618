use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

const DEFAULT_MEETING_LINK: &str = "https://meet.google.com/cof-qvyn-evg";
const DEFAULT_NOTIFY_FROM: &str = "recruiting@example.com";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const MAX_INTERVIEW_LEAD_DAYS: i64 = 365;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// JSON rubric; the built-in rubric is used when unset.
    pub rubric_path: Option<PathBuf>,
    /// Comma-separated skill tokens replacing the built-in vocabulary.
    pub skill_vocabulary: Option<String>,
    pub meeting_link: String,
    pub interview_lead_days: i64,
    pub notify_webhook_url: Option<String>,
    pub notify_webhook_token: Option<String>,
    pub notify_from: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            database_url: optional("DATABASE_URL")
                .context("Required environment variable 'DATABASE_URL' is not set")?,
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            rubric_path: optional("RUBRIC_PATH").map(PathBuf::from),
            skill_vocabulary: optional("SKILL_VOCABULARY"),
            meeting_link: optional("MEETING_LINK")
                .unwrap_or_else(|| DEFAULT_MEETING_LINK.to_string()),
            interview_lead_days: optional("INTERVIEW_LEAD_DAYS")
                .unwrap_or_else(|| "3".to_string())
                .parse::<i64>()
                .context("INTERVIEW_LEAD_DAYS must be a whole number of days")?,
            notify_webhook_url: optional("NOTIFY_WEBHOOK_URL"),
            notify_webhook_token: optional("NOTIFY_WEBHOOK_TOKEN"),
            notify_from: optional("NOTIFY_FROM").unwrap_or_else(|| DEFAULT_NOTIFY_FROM.to_string()),
            max_upload_bytes: match optional("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        };

        ensure!(
            (0..=MAX_INTERVIEW_LEAD_DAYS).contains(&config.interview_lead_days),
            "INTERVIEW_LEAD_DAYS must be between 0 and {MAX_INTERVIEW_LEAD_DAYS}"
        );
        Ok(config)
    }
}
