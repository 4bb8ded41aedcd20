use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which generative-text provider backs guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProviderKind {
    Anthropic,
    OpenAi,
    Disabled,
}

impl AiProviderKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(AiProviderKind::Anthropic),
            "openai" => Ok(AiProviderKind::OpenAi),
            "none" | "off" | "" => Ok(AiProviderKind::Disabled),
            other => bail!("AI_PROVIDER must be one of anthropic, openai, none; got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Missing credentials disable the matching provider instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ai_provider: AiProviderKind,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub ai_timeout: Duration,
    pub job_market_enabled: bool,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub adzuna_country: String,
    pub market_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ai_provider: AiProviderKind::parse(
                &std::env::var("AI_PROVIDER").unwrap_or_else(|_| "anthropic".to_string()),
            )?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            ai_timeout: seconds_env("AI_TIMEOUT_SECS", 10)?,
            job_market_enabled: bool_env("JOB_MARKET_ENABLED")?,
            adzuna_app_id: optional_env("ADZUNA_APP_ID"),
            adzuna_app_key: optional_env("ADZUNA_APP_KEY"),
            adzuna_country: std::env::var("ADZUNA_COUNTRY").unwrap_or_else(|_| "us".to_string()),
            market_timeout: seconds_env("MARKET_TIMEOUT_SECS", 10)?,
        })
    }

    /// The API key for the selected provider, if one is configured.
    pub fn ai_api_key(&self) -> Option<&str> {
        match self.ai_provider {
            AiProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
            AiProviderKind::OpenAi => self.openai_api_key.as_deref(),
            AiProviderKind::Disabled => None,
        }
    }

    /// Adzuna credentials when enrichment is switched on and fully configured.
    pub fn adzuna_credentials(&self) -> Option<(&str, &str)> {
        if !self.job_market_enabled {
            return None;
        }
        Some((self.adzuna_app_id.as_deref()?, self.adzuna_app_key.as_deref()?))
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn seconds_env(key: &str, default: u64) -> Result<Duration> {
    match optional_env(key) {
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| format!("{key} must be a whole number of seconds")),
        None => Ok(Duration::from_secs(default)),
    }
}

fn bool_env(key: &str) -> Result<bool> {
    let raw = optional_env(key).map(|v| v.to_ascii_lowercase());
    match raw.as_deref() {
        None | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => bail!("{key} must be true or false; got '{other}'"),
    }
}
