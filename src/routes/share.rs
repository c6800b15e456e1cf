//! # routes::share
//!
//! `GET /api/share-card?vault=&user=&hidePnl=&hideEquity=`: content of the
//! shareable PnL image for one depositor.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    engine::share_card::{build_share_card, ShareParams},
    error::AppError,
    models::{agent, Depositor},
    routes::require_vault,
    state::SharedState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareQuery {
    pub vault: Option<String>,
    pub user: Option<String>,
    #[serde(default)]
    pub hide_pnl: bool,
    #[serde(default)]
    pub hide_equity: bool,
}

pub async fn get_share_card(
    State(state): State<SharedState>,
    query: Result<Query<ShareQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let vault = require_vault(query.vault.as_deref())?;
    let user = query
        .user
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing user".into()))?;

    let details = state.info.vault_details(&vault).await?;

    let depositor = details
        .followers
        .iter()
        .find(|f| f.user.eq_ignore_ascii_case(user))
        .map(Depositor::from)
        .ok_or_else(|| AppError::NotFound(format!("{user} is not a depositor of {vault}")))?;

    let vault_name = agent::by_vault(&vault)
        .map(|a| a.name.to_string())
        .unwrap_or_else(|| details.name.clone());

    let share = &state.config.share;
    let card = build_share_card(
        &ShareParams {
            brand:         &share.brand,
            app_name:      &share.app_name,
            tagline:       &share.tagline,
            vault_name:    &vault_name,
            vault_address: &vault,
            user:          &depositor.user,
            equity:        depositor.equity,
            pnl:           depositor.all_time_pnl,
            roi_pct:       depositor.roi_pct,
            hide_pnl:      query.hide_pnl,
            hide_equity:   query.hide_equity,
        },
        Utc::now(),
    );

    info!(vault = %vault, user = %depositor.user, "Share card built");

    Ok(Json(json!({ "ok": true, "card": card })))
}
