//! # routes::depositors
//!
//! `GET /api/depositors?vault=<addr>`: the vault's followers with equity,
//! all-time PnL and ROI, largest stake first.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::{
    error::AppError,
    hyperliquid::types::VaultDetails,
    models::{agent, Depositor, DepositorTable},
    routes::{require_vault, vault::VaultQuery},
    state::SharedState,
};

pub async fn get_depositors(
    State(state): State<SharedState>,
    query: Result<Query<VaultQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let vault = require_vault(query.vault.as_deref())?;
    let details = state.info.vault_details(&vault).await?;

    debug!(vault = %vault, followers = details.followers.len(), "vaultDetails fetched");

    Ok(Json(depositor_table(&vault, &details)))
}

pub(crate) fn depositor_table(vault: &str, details: &VaultDetails) -> DepositorTable {
    let mut depositors: Vec<Depositor> = details.followers.iter().map(Depositor::from).collect();
    depositors.sort_by(|a, b| b.equity.total_cmp(&a.equity));

    let vault_name = if details.name.is_empty() {
        agent::by_vault(vault).map(|a| a.name.to_string()).unwrap_or_default()
    } else {
        details.name.clone()
    };

    DepositorTable {
        vault_address: vault.to_string(),
        vault_name,
        leader: details.leader.clone(),
        apr: details.apr,
        depositors,
    }
}
