//! # engine::fanout
//!
//! Fetches vault state, choosing the upstream query per address, and fans
//! out across many vaults concurrently.
//!
//! A failing vault never aborts a batch: its entry comes back with no
//! positions and the failure recorded in `error`.

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::engine::normalize::{summarize_clearinghouse, summarize_hlp};
use crate::error::UpstreamError;
use crate::hyperliquid::types::AllMids;
use crate::hyperliquid::InfoClient;
use crate::models::{agent, VaultPositions, VaultSummary};

/// Fetch one vault and normalize it.
///
/// HLP addresses try `hlpDetails` first; if that call fails or carries no
/// `openPositions`, the plain `clearinghouseState` query is used instead.
pub async fn fetch_vault_summary(
    client: &InfoClient,
    vault: &str,
    is_hlp: bool,
    mids: Option<&AllMids>,
) -> Result<VaultSummary, UpstreamError> {
    if is_hlp {
        match client.hlp_details(vault).await {
            Ok(details) if details.open_positions.is_some() => {
                debug!(vault, "Using hlpDetails aggregate");
                return Ok(summarize_hlp(vault, &details, mids));
            }
            Ok(_) => {
                debug!(vault, "hlpDetails has no openPositions — falling back to clearinghouseState");
            }
            Err(e) => {
                warn!(vault, error = %e, "hlpDetails failed — falling back to clearinghouseState");
            }
        }
    }

    let state = client.clearinghouse_state(vault).await?;
    Ok(summarize_clearinghouse(vault, &state, mids))
}

/// Fetch every vault in `vaults` concurrently.  Output order matches input
/// order.  `allMids` is fetched once up front; without it the batch still
/// proceeds on the derived mark prices.
pub async fn fetch_many(
    client: &InfoClient,
    vaults: &[String],
    is_hlp: impl Fn(&str) -> bool,
) -> Vec<VaultPositions> {
    let mids = match client.all_mids().await {
        Ok(m) => Some(m),
        Err(e) => {
            warn!(error = %e, "allMids unavailable — using derived mark prices");
            None
        }
    };

    let tasks = vaults.iter().map(|vault| {
        let vault = vault.as_str();
        let hlp = is_hlp(vault);
        let mids = mids.as_ref();
        async move {
            let result = fetch_vault_summary(client, vault, hlp, mids).await;
            into_vault_positions(vault, result)
        }
    });

    let results = join_all(tasks).await;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    info!(vaults = results.len(), failed, "Multi-vault fetch complete");

    results
}

fn into_vault_positions(vault: &str, result: Result<VaultSummary, UpstreamError>) -> VaultPositions {
    let agent = agent::by_vault(vault);
    let agent_id = agent.map(|a| a.id.to_string());
    let name = agent.map(|a| a.name.to_string());

    match result {
        Ok(summary) => VaultPositions {
            vault_address: vault.to_string(),
            agent_id,
            name,
            equity: summary.equity,
            total_pnl: summary.total_pnl,
            positions: summary.positions,
            error: None,
        },
        Err(e) => {
            warn!(vault, error = %e, "Vault fetch failed — returning empty positions");
            VaultPositions {
                vault_address: vault.to_string(),
                agent_id,
                name,
                equity: 0.0,
                total_pnl: 0.0,
                positions: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> InfoClient {
        InfoClient::new(reqwest::Client::new(), server.uri(), Duration::from_secs(2))
    }

    fn state_with_btc(account_value: &str) -> serde_json::Value {
        json!({
            "marginSummary": { "accountValue": account_value },
            "withdrawable": "0",
            "assetPositions": [
                { "position": { "coin": "BTC", "szi": "0.1", "entryPx": "60000", "unrealizedPnl": "100" } }
            ]
        })
    }

    #[tokio::test]
    async fn test_one_failing_vault_does_not_abort_batch() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "allMids" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "BTC": "61000" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "clearinghouseState", "user": "0xgood" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(state_with_btc("5000")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "clearinghouseState", "user": "0xbad" })))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let vaults = vec!["0xbad".to_string(), "0xgood".to_string()];
        let out = fetch_many(&client_for(&server), &vaults, |_| false).await;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].vault_address, "0xbad");
        assert!(out[0].positions.is_empty());
        assert_eq!(out[0].error.as_deref(), Some("Hyperliquid API error: 500"));

        assert_eq!(out[1].vault_address, "0xgood");
        assert_eq!(out[1].equity, 5000.0);
        assert_eq!(out[1].positions.len(), 1);
        assert_eq!(out[1].positions[0].mark_price, 61000.0);
        assert!(out[1].error.is_none());
    }

    #[tokio::test]
    async fn test_batch_survives_missing_mids() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "allMids" })))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "clearinghouseState" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(state_with_btc("1000")))
            .mount(&server)
            .await;

        let vaults = vec!["0xa".to_string()];
        let out = fetch_many(&client_for(&server), &vaults, |_| false).await;

        // 60000 + 100 / 0.1
        assert_eq!(out[0].positions[0].mark_price, 61000.0);
        assert!(out[0].error.is_none());
    }

    #[tokio::test]
    async fn test_hlp_falls_back_to_clearinghouse() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "hlpDetails" })))
            .respond_with(ResponseTemplate::new(422).set_body_string("Failed to deserialize"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "clearinghouseState" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(state_with_btc("777")))
            .expect(1)
            .mount(&server)
            .await;

        let summary = fetch_vault_summary(&client_for(&server), "0xhlp", true, None)
            .await
            .unwrap();
        assert_eq!(summary.source, crate::models::SummarySource::Clearinghouse);
        assert_eq!(summary.equity, 777.0);
    }

    #[tokio::test]
    async fn test_hlp_aggregate_is_used_when_present() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "hlpDetails" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accountValue": "1000000",
                "openPositions": [ { "coin": "ETH", "szi": "-10", "entryPx": "3000", "markPx": "2950", "unrealizedPnl": "500" } ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "type": "clearinghouseState" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(state_with_btc("1")))
            .expect(0)
            .mount(&server)
            .await;

        let summary = fetch_vault_summary(&client_for(&server), "0xhlp", true, None)
            .await
            .unwrap();
        assert_eq!(summary.source, crate::models::SummarySource::Hlp);
        assert_eq!(summary.positions[0].mark_price, 2950.0);
        assert_eq!(summary.total_pnl, 500.0);
    }
}
