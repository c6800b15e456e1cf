//! # routes::registry
//!
//! The static agent registry, so the dashboard never hard-codes addresses.

use axum::{extract::Path, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    error::AppError,
    models::{agent, VAULT_AGENTS},
};

/// GET /api/vaults
pub async fn list_vaults() -> impl IntoResponse {
    Json(json!({ "ok": true, "vaults": VAULT_AGENTS }))
}

/// GET /api/vaults/:id
pub async fn get_vault(Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let vault = agent::by_id(&id)
        .ok_or_else(|| AppError::NotFound(format!("No vault agent with id '{id}'")))?;
    Ok(Json(json!({ "ok": true, "vault": vault })))
}
