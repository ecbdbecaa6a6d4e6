use anyhow::{bail, Context, Result};

use crate::search::SearchAuthScheme;

const DEFAULT_SUMMARIZER_URL: &str = "https://api.together.xyz/v1/chat/completions";
const DEFAULT_SUMMARIZER_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo";
const DEFAULT_SEARCH_URL: &str = "https://google.serper.dev/search";
const DEFAULT_QUERY_PREFIX: &str = "remote";
const DEFAULT_MAX_QUERY_CHARS: usize = 2048;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a required credential is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub summarizer_api_key: String,
    pub summarizer_url: String,
    pub summarizer_model: String,
    pub search_api_key: String,
    pub search_url: String,
    pub search_auth_scheme: SearchAuthScheme,
    /// `None` means the synopsis is sent as-is.
    pub search_query_prefix: Option<String>,
    pub search_max_query_chars: usize,
    pub search_location: Option<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let search_auth_scheme = optional_env("SEARCH_AUTH_SCHEME")
            .map(|raw| raw.parse::<SearchAuthScheme>())
            .transpose()?
            .unwrap_or_default();

        let search_max_query_chars = parse_env("SEARCH_MAX_QUERY_CHARS", DEFAULT_MAX_QUERY_CHARS)?;
        if search_max_query_chars == 0 {
            bail!("SEARCH_MAX_QUERY_CHARS must be greater than zero");
        }

        // An explicitly empty prefix disables prefixing altogether.
        let search_query_prefix = match std::env::var("SEARCH_QUERY_PREFIX") {
            Ok(value) => Some(value.trim().to_string()).filter(|p| !p.is_empty()),
            Err(_) => Some(DEFAULT_QUERY_PREFIX.to_string()),
        };

        Ok(Config {
            summarizer_api_key: require_env("SUMMARIZER_API_KEY")?,
            summarizer_url: optional_env("SUMMARIZER_URL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_URL.to_string()),
            summarizer_model: optional_env("SUMMARIZER_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_MODEL.to_string()),
            search_api_key: require_env("SEARCH_API_KEY")?,
            search_url: optional_env("SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            search_auth_scheme,
            search_query_prefix,
            search_max_query_chars,
            search_location: optional_env("SEARCH_LOCATION"),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Returns the variable when it is set to a non-blank value.
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
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global; each test uses its own keys.

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: usize = parse_env("JOBFINDER_TEST_UNSET_NUMBER", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("JOBFINDER_TEST_BAD_NUMBER", "lots");
        let result: Result<u16> = parse_env("JOBFINDER_TEST_BAD_NUMBER", 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("JOBFINDER_TEST_BLANK", "   ");
        assert!(optional_env("JOBFINDER_TEST_BLANK").is_none());
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("JOBFINDER_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("JOBFINDER_TEST_MISSING_KEY"));
    }
}
