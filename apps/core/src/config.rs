//! Analyzer configuration.
//!
//! Values come from the environment (optionally seeded from a `.env` file)
//! and may be overridden from the command line before validation.

use crate::error::AppError;
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::Validate;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "DIGNITY_MODEL";
pub const ENV_API_BASE: &str = "DIGNITY_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "DIGNITY_TIMEOUT_SECS";
pub const ENV_TEMPERATURE: &str = "DIGNITY_TEMPERATURE";

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Settings for the classification client.
#[derive(Clone, Validate)]
pub struct AnalyzerConfig {
    /// Provider credential, sent as a request header.
    #[validate(length(min = 1))]
    pub api_key: String,
    /// Gemini model identifier (e.g. `gemini-2.0-flash`).
    #[validate(length(min = 1))]
    pub model: String,
    /// Scheme and host of the API, without the version path.
    #[validate(url)]
    pub api_base: String,
    /// Upper bound on a single request, in seconds.
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
    /// Sampling temperature. Value between 0.0 and 2.0.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// The key must never end up in logs.
impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl AnalyzerConfig {
    /// Reads the configuration from environment variables.
    ///
    /// Missing optional variables fall back to defaults. A missing API key is
    /// not an error here; `validate` reports it.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Ok(key) = env::var(ENV_API_KEY) {
            config.api_key = key.trim().to_string();
        }
        if let Ok(model) = env::var(ENV_MODEL) {
            config.model = model;
        }
        if let Ok(base) = env::var(ENV_API_BASE) {
            config.api_base = base;
        }
        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.parse().map_err(|e| {
                AppError::Config(format!("{} must be a whole number of seconds: {}", ENV_TIMEOUT_SECS, e))
            })?;
        }
        if let Ok(raw) = env::var(ENV_TEMPERATURE) {
            config.temperature = raw.parse().map_err(|e| {
                AppError::Config(format!("{} must be a number: {}", ENV_TEMPERATURE, e))
            })?;
        }

        Ok(config)
    }

    /// Applies command-line overrides on top of the current values.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(base) = overrides.api_base {
            self.api_base = base;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    /// Validates every field, naming the API key variable when it is absent.
    pub fn validated(self) -> Result<Self, AppError> {
        if self.api_key.is_empty() {
            return Err(AppError::Config(format!(
                "{} is not set. Export it or add it to a .env file.",
                ENV_API_KEY
            )));
        }
        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> Result<Url, AppError> {
        let base = self.api_base.trim_end_matches('/');
        let url = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            base, self.model
        ))?;
        Ok(url)
    }
}
