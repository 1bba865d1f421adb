use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::consultation::HistoryMode;
use crate::knowledge::Persona;
use crate::llm_client::ModelChoice;
use crate::session::DEFAULT_IDLE_TTL;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_KNOWLEDGE_PATH: &str = "curriculum.md";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub persona: Persona,
    pub knowledge_path: PathBuf,
    pub default_model: ModelChoice,
    pub history_mode: HistoryMode,
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let persona = optional_env("CONSULT_PERSONA")
            .map(|raw| raw.parse::<Persona>())
            .transpose()
            .context("CONSULT_PERSONA must be 'mentor' or 'consultant'")?
            .unwrap_or_default();

        let default_model = optional_env("DEFAULT_MODEL")
            .map(|raw| raw.parse::<ModelChoice>())
            .transpose()
            .context("DEFAULT_MODEL must be one of the offered model identifiers")?
            .unwrap_or_default();

        let history_mode = match optional_env("REPLAY_HISTORY") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("REPLAY_HISTORY must be a boolean, got '{raw}'"))?,
            None => false,
        };

        let session_idle_ttl = match optional_env("SESSION_IDLE_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| {
                    format!("SESSION_IDLE_TTL_SECS must be a whole number of seconds, got '{raw}'")
                })?,
            None => DEFAULT_IDLE_TTL,
        };

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            persona,
            knowledge_path: optional_env("KNOWLEDGE_PATH")
                .unwrap_or_else(|| DEFAULT_KNOWLEDGE_PATH.to_string())
                .into(),
            default_model,
            history_mode: if history_mode {
                HistoryMode::Replay
            } else {
                HistoryMode::SingleTurn
            },
            session_idle_ttl,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("YES"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
    }

    #[test]
    fn test_parse_flag_rejects_garbage() {
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }
}
