use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_SUGGESTION_COUNT: usize = 3;
pub const DEFAULT_CHUNK_SIZE: usize = 1500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Settings for the Gemini client.
///
/// A missing API key is accepted here and only reported when the model is
/// first called.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoutConfig {
    pub gemini: GeminiConfig,
    pub suggestion_count: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ScoutConfig {
    /// Reads the process environment once. Call after `.env` has been loaded.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            gemini: GeminiConfig {
                api_key: env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini.model),
                base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini.base_url),
            },
            suggestion_count: env_parse("JOURNAL_SUGGESTION_COUNT", defaults.suggestion_count)?,
            chunk_size: env_parse("CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: env_parse("CHUNK_OVERLAP", defaults.chunk_overlap)?,
        })
    }
}

/// Parses `name` from the environment, falling back to `default` when unset.
pub fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ScoutConfig::default();
        assert_eq!(config.chunk_size, 1500);
        assert_eq!(config.chunk_overlap, 100);
        assert_eq!(config.suggestion_count, 3);
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn env_parse_uses_default_when_unset() {
        let value: usize = env_parse("JOURNAL_SCOUT_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn env_parse_rejects_garbage() {
        env::set_var("JOURNAL_SCOUT_TEST_BAD_NUMBER", "fifteen hundred");
        let err = env_parse::<usize>("JOURNAL_SCOUT_TEST_BAD_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("JOURNAL_SCOUT_TEST_BAD_NUMBER"));
        env::remove_var("JOURNAL_SCOUT_TEST_BAD_NUMBER");
    }
}
