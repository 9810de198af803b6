//! PumpTools Risk API Client
//!
//! Thin typed wrapper over the three extension endpoints:
//! - `/get_x_tokens_history`     tokens launched by a Twitter account
//! - `/get_x_modification_logs`  suspicious Twitter profile edits
//! - `/get_creator_info`         tokens launched by the contract creator
//!   (server returns the 10 most recent entries)
//!
//! Every call is an authenticated POST: bearer token header plus `user_id`
//! (the stored wallet address) in the JSON body.
//!
//! Status mapping:
//! - 401/403 → `API_NEED_VIP`, fatal, always returned to the caller
//! - anything else that fails → `{data: []}` unless strict mode is on

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::models::config::{ApiConfig, Endpoint};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::RemoteResponse;
use crate::providers::credentials::{CredentialStore, EnvCredentials};
use crate::utils::constants::{TWITTER_PROFILE_PREFIX, USER_AGENT};

/// Source of remote risk data for the three checks
#[async_trait]
pub trait RiskSource: Send + Sync {
    async fn fetch_twitter_tokens(&self, twitter: &str) -> AppResult<RemoteResponse>;

    async fn fetch_twitter_modifications(&self, twitter: &str) -> AppResult<RemoteResponse>;

    async fn fetch_creator_tokens(&self, chain: &str, address: &str) -> AppResult<RemoteResponse>;
}

/// Bare handles become full profile URLs, the handle is used verbatim
pub fn normalize_twitter_url(twitter: &str) -> String {
    let twitter = twitter.trim();
    if twitter.starts_with("http") {
        twitter.to_string()
    } else {
        format!("{}{}", TWITTER_PROFILE_PREFIX, twitter)
    }
}

/// HTTP client for the risk API
pub struct RiskApiClient<C = EnvCredentials> {
    client: reqwest::Client,
    config: ApiConfig,
    credentials: C,
}

impl RiskApiClient<EnvCredentials> {
    /// Client configured from env vars, credentials from env vars
    pub fn from_env() -> AppResult<Self> {
        Self::new(ApiConfig::from_env()?, EnvCredentials)
    }
}

impl<C: CredentialStore> RiskApiClient<C> {
    pub fn new(config: ApiConfig, credentials: C) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::invalid_config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// POST `payload` to `endpoint`, applying the degrade policy
    pub async fn request(&self, endpoint: Endpoint, payload: Map<String, Value>) -> AppResult<RemoteResponse> {
        match self.send(endpoint, payload).await {
            Ok(response) => Ok(response),
            Err(e) if e.is_fatal() => {
                warn!("🔒 {} blocked: {}", endpoint.description(), e);
                Err(e)
            }
            Err(e) if self.config.degrade_failures => {
                warn!("⚠️ {} failed, using empty result: {}", endpoint.description(), e);
                Ok(RemoteResponse::empty())
            }
            Err(e) => {
                warn!("⚠️ {} failed: {}", endpoint.description(), e);
                Err(e)
            }
        }
    }

    async fn send(&self, endpoint: Endpoint, mut payload: Map<String, Value>) -> AppResult<RemoteResponse> {
        let url = self.config.endpoint_url(endpoint);
        let credentials = self.credentials.load().await?;
        if !credentials.is_complete() {
            debug!("Credentials incomplete, sending request anyway");
        }

        payload.insert("user_id".to_string(), Value::from(credentials.wallet_address));

        let body = Value::Object(payload);
        info!("📡 Risk API: {} → {}", endpoint.description(), url);
        debug!("   payload: {}", body);

        let response = self
            .client
            .post(&url)
            .bearer_auth(credentials.token.unwrap_or_default())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::need_vip(status.as_u16()));
        }
        if !status.is_success() {
            return Err(AppError::api_status(status.as_u16()));
        }

        let raw = response.bytes().await?;
        let parsed: RemoteResponse = serde_json::from_slice(&raw)
            .map_err(|e| AppError::invalid_body(format!("{} body: {}", endpoint.description(), e)))?;

        info!("📊 Risk API: {} returned {} rows", endpoint.description(), parsed.data.len());
        Ok(parsed)
    }
}

#[async_trait]
impl<C: CredentialStore> RiskSource for RiskApiClient<C> {
    async fn fetch_twitter_tokens(&self, twitter: &str) -> AppResult<RemoteResponse> {
        let payload = json!({ "twitter_url": normalize_twitter_url(twitter) });
        self.request(Endpoint::TwitterTokens, into_map(payload)).await
    }

    async fn fetch_twitter_modifications(&self, twitter: &str) -> AppResult<RemoteResponse> {
        let payload = json!({ "twitter_url": normalize_twitter_url(twitter) });
        self.request(Endpoint::TwitterModifications, into_map(payload)).await
    }

    async fn fetch_creator_tokens(&self, chain: &str, address: &str) -> AppResult<RemoteResponse> {
        let payload = json!({ "chain": chain, "token_address": address });
        self.request(Endpoint::CreatorTokens, into_map(payload)).await
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
