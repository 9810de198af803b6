//! Configuration module for the risk API client
//!
//! Uses constants from utils/constants.rs, overridable through env vars.

use std::time::Duration;
use tracing::{info, warn};

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_API_BASE_URL, ENDPOINT_CREATOR_TOKENS, ENDPOINT_TWITTER_MODIFICATIONS,
    ENDPOINT_TWITTER_TOKENS, ENV_API_BASE_URL, ENV_API_STRICT, ENV_API_TIMEOUT_SECS,
};

/// The three fixed risk API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TwitterTokens,
    TwitterModifications,
    CreatorTokens,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::TwitterTokens => ENDPOINT_TWITTER_TOKENS,
            Endpoint::TwitterModifications => ENDPOINT_TWITTER_MODIFICATIONS,
            Endpoint::CreatorTokens => ENDPOINT_CREATOR_TOKENS,
        }
    }

    /// Short description for logs
    pub fn description(&self) -> &'static str {
        match self {
            Endpoint::TwitterTokens => "twitter token history",
            Endpoint::TwitterModifications => "twitter modification history",
            Endpoint::CreatorTokens => "creator token history",
        }
    }
}

/// Configuration for the risk API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, endpoint paths are appended verbatim
    pub base_url: String,
    /// Per-request timeout, none by default
    pub request_timeout: Option<Duration>,
    /// Turn non-fatal failures into `{data: []}` instead of errors
    pub degrade_failures: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            degrade_failures: true,
        }
    }
}

impl ApiConfig {
    /// Config pointing at another base URL (local mocks, staging)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read overrides from the environment
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_BASE_URL) {
            if !url.trim().is_empty() {
                info!("🔧 {} override: {}", ENV_API_BASE_URL, url);
                config.base_url = url;
            }
        }

        if let Ok(secs) = std::env::var(ENV_API_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                AppError::invalid_config(format!("{} must be a number of seconds", ENV_API_TIMEOUT_SECS))
            })?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Ok(strict) = std::env::var(ENV_API_STRICT) {
            match strict.trim() {
                "1" | "true" => config.degrade_failures = false,
                "0" | "false" | "" => {}
                other => warn!("⚠️ Ignoring {}={}", ENV_API_STRICT, other),
            }
        }

        Ok(config)
    }

    /// Full URL of an endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}
