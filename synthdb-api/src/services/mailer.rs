//! API key mail dispatch
//!
//! Delegates delivery to an external transactional mail endpoint over HTTP.
//! Dispatch is fire-and-forget: the key-issuance response does not wait for
//! (or depend on) delivery, but failures are logged with the recipient so
//! they are visible in operation.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use synthdb_common::{Error, Result};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);
const MAIL_SUBJECT: &str = "Your synthdb API key";

/// Payload for the external mail endpoint
#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    to: &'a str,
    from: &'a str,
    subject: &'a str,
    text: String,
}

/// Client for the external transactional mail sender
pub struct Mailer {
    client: reqwest::Client,
    /// None disables dispatch entirely (logged per call)
    endpoint: Option<String>,
    from: String,
}

impl Mailer {
    pub fn new(endpoint: Option<String>, from: String) -> Self {
        if endpoint.is_none() {
            tracing::warn!("No mail endpoint configured; API key mails will not be sent");
        }

        Self {
            client: reqwest::Client::new(),
            endpoint,
            from,
        }
    }

    /// Send the key to the recipient, surfacing any failure
    pub async fn send_api_key(&self, email: &str, key: &str) -> Result<()> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::Mail("no mail endpoint configured".to_string()))?;

        let request = MailRequest {
            to: email,
            from: &self.from,
            subject: MAIL_SUBJECT,
            text: format!("Your API key: {}", key),
        };

        let response = self
            .client
            .post(endpoint)
            .timeout(SEND_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Mail(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Mail(format!(
                "mail endpoint returned {}",
                response.status()
            )));
        }

        tracing::info!(recipient = email, "API key mail dispatched");
        Ok(())
    }

    /// Fire-and-forget dispatch on a spawned task
    ///
    /// Failures are logged at WARN, never surfaced to the caller: the key
    /// row already exists, so the issuance response stays a 201.
    pub fn dispatch_api_key(self: &Arc<Self>, email: String, key: String) {
        let mailer = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = mailer.send_api_key(&email, &key).await {
                tracing::warn!(recipient = %email, "API key mail dispatch failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_without_endpoint_fails() {
        let mailer = Mailer::new(None, "catalog@synthdb.local".to_string());

        let err = mailer
            .send_api_key("user@example.com", "key-1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Mail(_)));
    }

    #[tokio::test]
    async fn test_dispatch_without_endpoint_does_not_panic() {
        let mailer = Arc::new(Mailer::new(None, "catalog@synthdb.local".to_string()));

        // Dispatch swallows the failure; nothing to assert beyond not panicking
        mailer.dispatch_api_key("user@example.com".to_string(), "key-1".to_string());
        tokio::task::yield_now().await;
    }
}
