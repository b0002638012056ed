use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::recommendations::parser::DEFAULT_INTRO_MAX_CHARS;

const DEFAULT_NOTES_FETCH_TIMEOUT_MS: u64 = 3000;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
///
/// The Gemini key is optional: a missing key is reported on each
/// generation request instead of blocking the lists and notes endpoints.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    /// Lines at or above this many characters are never taken as the intro line.
    pub intro_max_chars: usize,
    pub notes_fetch_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            intro_max_chars: parse_env("INTRO_MAX_CHARS", DEFAULT_INTRO_MAX_CHARS)?,
            notes_fetch_timeout: Duration::from_millis(parse_env(
                "NOTES_FETCH_TIMEOUT_MS",
                DEFAULT_NOTES_FETCH_TIMEOUT_MS,
            )?),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by router tests; nothing here touches the network.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/hub_test".to_string(),
            gemini_api_key: Some("test-key".to_string()),
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            intro_max_chars: DEFAULT_INTRO_MAX_CHARS,
            notes_fetch_timeout: Duration::from_millis(DEFAULT_NOTES_FETCH_TIMEOUT_MS),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
