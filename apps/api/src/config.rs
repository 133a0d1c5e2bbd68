use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_LLM_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o";

/// Application configuration loaded from environment variables.
/// Startup fails if the completion API credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub llm_api_base: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    /// Total attempts per completion call. 1 disables retries.
    pub llm_max_attempts: u32,
    /// Selects the PostgreSQL record store when set; records stay in memory otherwise.
    pub database_url: Option<String>,
    /// Directory holding the compiled UI bundle.
    pub static_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY")
            .or_else(|| get("OPENAI_API_KEY_ENV_VAR"))
            .context("Required environment variable 'OPENAI_API_KEY' is not set")?;

        let llm_max_attempts = parse_or(get("LLM_MAX_ATTEMPTS"), 1u32, "LLM_MAX_ATTEMPTS")?;
        if llm_max_attempts == 0 {
            bail!("LLM_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            openai_api_key,
            llm_api_base: get("LLM_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_LLM_API_BASE.to_string()),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout_secs: parse_or(get("LLM_TIMEOUT_SECS"), 120u64, "LLM_TIMEOUT_SECS")?,
            llm_max_attempts,
            database_url: get("DATABASE_URL"),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            port: parse_or(get("PORT"), 5000u16, "PORT")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T, key: &str) -> Result<T> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied_when_only_key_is_set() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.llm_api_base, DEFAULT_LLM_API_BASE);
        assert_eq!(config.llm_model, "gpt-4o");
        assert_eq!(config.llm_timeout_secs, 120);
        assert_eq!(config.llm_max_attempts, 1);
        assert_eq!(config.port, 5000);
        assert!(config.database_url.is_none());
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = config_from(&[("PORT", "8080")]).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        assert!(config_from(&[("OPENAI_API_KEY", "   ")]).is_err());
    }

    #[test]
    fn test_fallback_key_variable_is_accepted() {
        let config = config_from(&[("OPENAI_API_KEY_ENV_VAR", "sk-alt")]).unwrap();
        assert_eq!(config.openai_api_key, "sk-alt");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("OPENAI_API_KEY", "k"), ("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        assert!(config_from(&[("OPENAI_API_KEY", "k"), ("LLM_MAX_ATTEMPTS", "0")]).is_err());
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "k"),
            ("LLM_API_BASE", "http://localhost:11434/v1/"),
            ("DATABASE_URL", "postgres://localhost/qalam"),
            ("STATIC_DIR", "dist"),
        ])
        .unwrap();
        assert_eq!(config.llm_api_base, "http://localhost:11434/v1");
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/qalam"));
        assert_eq!(config.static_dir, Some(PathBuf::from("dist")));
    }
}
