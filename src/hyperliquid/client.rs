//! # hyperliquid::client
//!
//! [`InfoClient`]: a thin wrapper around one pooled `reqwest::Client` that
//! POSTs [`InfoRequest`] bodies to the exchange's `/info` endpoint.
//!
//! Non-2xx statuses surface as [`UpstreamError::Status`] so the route layer
//! can pass the same status code back to the browser.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::UpstreamError;
use crate::hyperliquid::types::{
    AllMids, ClearinghouseState, HlpDetails, InfoRequest, Meta, VaultDetails,
};

#[derive(Debug, Clone)]
pub struct InfoClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

/// Status + body of a call whose outcome should be reported, not judged
/// (used by the HLP diagnostic endpoint).
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: StatusCode,
    pub body: Value,
}

impl InfoClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `request` and decode the JSON body into `T`.
    pub async fn query<T: DeserializeOwned>(&self, request: &InfoRequest) -> Result<T, UpstreamError> {
        debug!(kind = request.kind(), url = %self.url, "→ info request");

        let resp = self
            .http
            .post(&self.url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(kind = request.kind(), %status, "info API returned non-success status");
            return Err(UpstreamError::Status(status));
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// POST `request` and hand back whatever came back, whatever the status.
    pub async fn query_raw(&self, request: &InfoRequest) -> Result<RawReply, UpstreamError> {
        let resp = self
            .http
            .post(&self.url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(RawReply { status, body })
    }

    // ── Typed shortcuts ───────────────────────────────────────────────────────

    pub async fn clearinghouse_state(&self, user: &str) -> Result<ClearinghouseState, UpstreamError> {
        self.query(&InfoRequest::ClearinghouseState { user: user.to_string() }).await
    }

    pub async fn hlp_details(&self, user: &str) -> Result<HlpDetails, UpstreamError> {
        self.query(&InfoRequest::HlpDetails { user: user.to_string() }).await
    }

    pub async fn vault_details(&self, vault: &str) -> Result<VaultDetails, UpstreamError> {
        self.query(&InfoRequest::VaultDetails { vault_address: vault.to_string() }).await
    }

    pub async fn all_mids(&self) -> Result<AllMids, UpstreamError> {
        self.query(&InfoRequest::AllMids).await
    }

    pub async fn meta(&self) -> Result<Meta, UpstreamError> {
        self.query(&InfoRequest::Meta).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> InfoClient {
        InfoClient::new(
            reqwest::Client::new(),
            format!("{}/info", server.uri()),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_clearinghouse_state_posts_type_discriminator() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/info"))
            .and(body_json(json!({ "type": "clearinghouseState", "user": "0xabc" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "marginSummary": { "accountValue": "1000.0" },
                "withdrawable": "250.5",
                "assetPositions": []
            })))
            .mount(&server)
            .await;

        let state = client_for(&server).clearinghouse_state("0xabc").await.unwrap();
        assert_eq!(state.margin_summary.unwrap().account_value, 1000.0);
        assert_eq!(state.withdrawable, 250.5);
    }

    #[tokio::test]
    async fn test_non_success_status_is_preserved() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = client_for(&server).all_mids().await.unwrap_err();
        match err {
            UpstreamError::Status(status) => assert_eq!(status.as_u16(), 429),
            other => panic!("Expected UpstreamError::Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).meta().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[tokio::test]
    async fn test_query_raw_keeps_error_bodies() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("Failed to deserialize"))
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .query_raw(&InfoRequest::HlpDetails { user: "0x1".into() })
            .await
            .unwrap();
        assert_eq!(reply.status.as_u16(), 422);
        assert_eq!(reply.body, json!("Failed to deserialize"));
    }
}
