use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which ModelClient backend serves completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    /// Spawns `{ollama_bin} run {model_name} <prompt>` per call.
    Subprocess,
    /// Calls the Ollama HTTP API at `ollama_url`.
    Http,
}

impl FromStr for ModelBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subprocess" | "cli" => Ok(ModelBackend::Subprocess),
            "http" => Ok(ModelBackend::Http),
            other => bail!("MODEL_BACKEND must be 'subprocess' or 'http', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every value has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// When set, profile documents are read from Postgres.
    pub database_url: Option<String>,
    /// JSON profile used when no database is configured.
    pub profile_path: String,
    pub model_backend: ModelBackend,
    pub model_name: String,
    pub ollama_bin: String,
    pub ollama_url: String,
    pub model_timeout_secs: u64,
    /// 0 means one slot per project.
    pub enrich_max_concurrency: usize,
    pub match_threshold: f32,
    pub profile_owner: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_threshold: f32 = parse_env("MATCH_THRESHOLD", "0.6")?;
        if !(0.0..=1.0).contains(&match_threshold) {
            bail!("MATCH_THRESHOLD must be within [0, 1], got {match_threshold}");
        }

        Ok(Config {
            port: parse_env("PORT", "5000")?,
            rust_log: env_or("RUST_LOG", "info"),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            profile_path: env_or("PROFILE_PATH", "profile.json"),
            model_backend: parse_env("MODEL_BACKEND", "subprocess")?,
            model_name: env_or("MODEL_NAME", "llama3"),
            ollama_bin: env_or("OLLAMA_BIN", "ollama"),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            model_timeout_secs: parse_env("MODEL_TIMEOUT_SECS", "180")?,
            enrich_max_concurrency: parse_env("ENRICH_MAX_CONCURRENCY", "16")?,
            match_threshold,
            profile_owner: env_or("PROFILE_OWNER", "Fatheen Khan"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env_or(key, default);
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("{key} has an invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_backend_parse() {
        assert_eq!(
            "subprocess".parse::<ModelBackend>().unwrap(),
            ModelBackend::Subprocess
        );
        assert_eq!(" HTTP ".parse::<ModelBackend>().unwrap(), ModelBackend::Http);
        assert!("grpc".parse::<ModelBackend>().is_err());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("CHAT_API_TEST_UNSET_VARIABLE", "42").unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_reports_key_on_bad_value() {
        let err = parse_env::<u16>("CHAT_API_TEST_UNSET_VARIABLE_2", "not-a-port").unwrap_err();
        assert!(format!("{err:#}").contains("CHAT_API_TEST_UNSET_VARIABLE_2"));
    }
}
