use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use serde_json::Value;

use crate::config::Config;

/// Narrow seam over the external secret store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Returns the raw payload stored under `name`, expected to be JSON.
    async fn fetch_secret(&self, name: &str) -> Result<String>;
}

/// Live [`SecretStore`] backed by AWS Secrets Manager.
pub struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerStore {
    /// Builds a client from the default AWS configuration chain.
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_secretsmanager::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn fetch_secret(&self, name: &str) -> Result<String> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| anyhow!("secret store request for [{name}] failed: {e}"))?;

        output
            .secret_string()
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("secret [{name}] has no string payload"))
    }
}

/// Resolves a named secret to the single field of its JSON payload that
/// holds the value callers care about.
///
/// Retrieval and payload problems degrade to `None` rather than propagating;
/// callers must treat `None` as "unavailable". Nothing is cached.
pub struct SecretResolver {
    store: Arc<dyn SecretStore>,
    payload_field: String,
}

impl SecretResolver {
    pub fn new(store: Arc<dyn SecretStore>, config: &Config) -> Self {
        Self {
            store,
            payload_field: config.api_key_secret_field.clone(),
        }
    }

    pub async fn resolve(&self, name: &str) -> Option<String> {
        let payload = match self.store.fetch_secret(name).await {
            Ok(payload) => payload,
            Err(error) => {
                tracing::error!(secret = name, %error, "failed to retrieve secret from the secret store");
                return None;
            }
        };

        let parsed: Value = match serde_json::from_str(&payload) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::error!(secret = name, %error, "secret payload is not valid JSON");
                return None;
            }
        };

        match parsed.get(self.payload_field.as_str()).and_then(Value::as_str) {
            Some(value) if !value.is_empty() => Some(value.to_owned()),
            _ => {
                tracing::error!(
                    secret = name,
                    field = %self.payload_field,
                    "secret payload does not contain the configured field"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(store: MockSecretStore) -> SecretResolver {
        let config = Config::new("calendar-api-key", "api_key");
        SecretResolver::new(Arc::new(store), &config)
    }

    #[tokio::test]
    async fn resolve_extracts_configured_field() {
        let mut store = MockSecretStore::new();
        store
            .expect_fetch_secret()
            .returning(|_| Ok(r#"{"api_key":"abc123","other":"x"}"#.to_string()));

        let value = resolver(store).resolve("calendar-api-key").await;
        assert_eq!(value.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn resolve_returns_none_when_store_fails() {
        let mut store = MockSecretStore::new();
        store
            .expect_fetch_secret()
            .returning(|_| Err(anyhow!("access denied")));

        assert!(resolver(store).resolve("calendar-api-key").await.is_none());
    }

    #[tokio::test]
    async fn resolve_returns_none_for_malformed_payload() {
        let mut store = MockSecretStore::new();
        store
            .expect_fetch_secret()
            .returning(|_| Ok("not json".to_string()));

        assert!(resolver(store).resolve("calendar-api-key").await.is_none());
    }

    #[tokio::test]
    async fn resolve_returns_none_when_field_is_missing() {
        let mut store = MockSecretStore::new();
        store
            .expect_fetch_secret()
            .returning(|_| Ok(r#"{"wrong_field":"abc123"}"#.to_string()));

        assert!(resolver(store).resolve("calendar-api-key").await.is_none());
    }

    #[tokio::test]
    async fn resolve_returns_none_for_empty_value() {
        let mut store = MockSecretStore::new();
        store
            .expect_fetch_secret()
            .returning(|_| Ok(r#"{"api_key":""}"#.to_string()));

        assert!(resolver(store).resolve("calendar-api-key").await.is_none());
    }

    #[tokio::test]
    async fn resolve_passes_secret_name_through() {
        let mut store = MockSecretStore::new();
        store
            .expect_fetch_secret()
            .withf(|name| name == "calendar-api-key")
            .returning(|_| Ok(r#"{"api_key":"abc123"}"#.to_string()));

        assert!(resolver(store).resolve("calendar-api-key").await.is_some());
    }
}
