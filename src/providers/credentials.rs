//! Session credential sources
//!
//! The risk API wants the connected wallet address (`user_id`) and the bearer
//! token issued at wallet login. Where those live is up to the host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::errors::AppResult;
use crate::utils::constants::{ENV_API_TOKEN, ENV_WALLET_ADDRESS};

/// Stored login state, either member may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub wallet_address: Option<String>,
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(wallet_address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            wallet_address: Some(wallet_address.into()),
            token: Some(token.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.wallet_address.as_deref().is_some_and(|w| !w.is_empty())
            && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Reads credentials on every request
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> AppResult<Credentials>;
}

/// Fixed credentials
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Credentials);

#[async_trait]
impl CredentialStore for StaticCredentials {
    async fn load(&self) -> AppResult<Credentials> {
        Ok(self.0.clone())
    }
}

/// Credentials from `PUMP_WALLET_ADDRESS` / `PUMP_API_TOKEN`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

#[async_trait]
impl CredentialStore for EnvCredentials {
    async fn load(&self) -> AppResult<Credentials> {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Ok(Credentials {
            wallet_address: read(ENV_WALLET_ADDRESS),
            token: read(ENV_API_TOKEN),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credentials() {
        let store = StaticCredentials(Credentials::new("So1anaWa11et", "jwt-token"));
        let creds = store.load().await.unwrap();
        assert!(creds.is_complete());
        assert_eq!(creds.wallet_address.as_deref(), Some("So1anaWa11et"));
    }

    #[test]
    fn test_incomplete_credentials() {
        assert!(!Credentials::default().is_complete());
        let creds = Credentials {
            wallet_address: Some("w".into()),
            token: Some(String::new()),
        };
        assert!(!creds.is_complete());
    }
}
