//! # routes::vault
//!
//! `GET /api/hyperliquid?vault=<addr>`: one vault's equity, PnL and
//! normalized positions, and the `/health` probe.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    engine::fanout::fetch_vault_summary,
    error::AppError,
    routes::require_vault,
    state::SharedState,
};

#[derive(Debug, Deserialize)]
pub struct VaultQuery {
    pub vault: Option<String>,
}

pub async fn get_vault_summary(
    State(state): State<SharedState>,
    query: Result<Query<VaultQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let vault = require_vault(query.vault.as_deref())?;
    let is_hlp = state.config.is_hlp(&vault);

    // Mids only improve mark prices; their failure is not the caller's problem.
    let mids = match state.info.all_mids().await {
        Ok(m) => Some(m),
        Err(e) => {
            warn!(error = %e, "allMids unavailable — using derived mark prices");
            None
        }
    };

    let summary = fetch_vault_summary(&state.info, &vault, is_hlp, mids.as_ref()).await?;

    info!(
        vault     = %vault,
        source    = ?summary.source,
        equity    = summary.equity,
        positions = summary.positions.len(),
        "Vault summary served"
    );

    Ok(Json(summary))
}

pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "ok":       true,
        "upstream": state.info.url(),
    }))
}
