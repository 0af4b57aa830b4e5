use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Gemini REST base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model addressed by the proxy when `GEMINI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-1.0-pro";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// `None` keeps the server up; the proxy route then answers 500.
    pub api_key: Option<Secret<String>>,
    pub api_base_url: String,
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ProxyConfig {
    /// Read configuration once at startup.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let gemini = GeminiSettings::from_lookup(|key| env::var(key).ok());

        if gemini.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set - proxy requests will be rejected");
        }

        Ok(Self { common, gemini })
    }
}

impl GeminiSettings {
    /// Build settings from a variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_blank("GEMINI_API_KEY").map(Secret::new),
            api_base_url: non_blank("GEMINI_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            model: non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
