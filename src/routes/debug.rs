//! # routes::debug
//!
//! Diagnostics and passthroughs:
//!
//! * `GET /api/debug-hlp?vault=` issues both `hlpDetails` and
//!   `clearinghouseState` for one address and reports what each returned,
//!   without interpreting failures.
//! * `GET /api/meta` relays the perpetual universe.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    config::DEFAULT_HLP_VAULT,
    error::AppError,
    hyperliquid::{client::RawReply, types::InfoRequest},
    routes::{require_vault, vault::VaultQuery},
    state::SharedState,
};

pub async fn debug_hlp(
    State(state): State<SharedState>,
    query: Result<Query<VaultQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let default_vault = state
        .config
        .hlp_vaults
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_HLP_VAULT);
    let vault = require_vault(Some(query.vault.as_deref().unwrap_or(default_vault)))?;

    info!(vault = %vault, "Debugging HLP vs clearinghouse response shapes");

    let hlp_req = InfoRequest::HlpDetails { user: vault.clone() };
    let regular_req = InfoRequest::ClearinghouseState { user: vault.clone() };
    let (hlp, regular) = tokio::join!(
        state.info.query_raw(&hlp_req),
        state.info.query_raw(&regular_req),
    );

    Ok(Json(json!({
        "vaultAddress":       vault,
        "hlpDetails":         describe(hlp?, "openPositions"),
        "clearinghouseState": describe(regular?, "assetPositions"),
    })))
}

fn describe(reply: RawReply, list_field: &str) -> Value {
    let list = reply.body.get(list_field).and_then(Value::as_array);
    let has_list = list.is_some();
    let count = list.map(Vec::len).unwrap_or(0);

    let (has_key, count_key) = match list_field {
        "openPositions" => ("hasOpenPositions", "openPositionsCount"),
        _ => ("hasAssetPositions", "assetPositionsCount"),
    };

    let mut out = json!({
        "status": reply.status.as_u16(),
        "ok":     reply.status.is_success(),
        "data":   reply.body,
    });
    out[has_key] = json!(has_list);
    out[count_key] = json!(count);
    out
}

pub async fn get_meta(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let meta = state.info.meta().await?;
    Ok(Json(json!({ "ok": true, "universe": meta.universe })))
}
