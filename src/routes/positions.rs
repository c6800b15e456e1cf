//! # routes::positions
//!
//! `GET /api/positions?vaults=a,b,...`: positions for many vaults in one
//! call.  Without `vaults`, every live registry agent is fetched.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::parse_address_list,
    engine::fanout::fetch_many,
    error::AppError,
    models::agent,
    routes::is_address,
    state::SharedState,
};

#[derive(Debug, Deserialize)]
pub struct PositionsQuery {
    pub vaults: Option<String>,
}

pub async fn get_positions(
    State(state): State<SharedState>,
    query: Result<Query<PositionsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let vaults = match query.vaults.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_address_list(raw),
        _ => agent::live_vaults(),
    };

    if let Some(bad) = vaults.iter().find(|v| !is_address(v)) {
        return Err(AppError::BadRequest(format!("Invalid vault address: {bad}")));
    }

    let config = state.config.clone();
    let results = fetch_many(&state.info, &vaults, |v| config.is_hlp(v)).await;

    Ok(Json(json!({
        "ok":        true,
        "fetchedAt": Utc::now(),
        "vaults":    results,
    })))
}
