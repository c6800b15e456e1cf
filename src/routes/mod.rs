//! # routes
//!
//! Axum handlers for the dashboard API.
//!
//! | Method | Path               | Description                                  |
//! |--------|--------------------|----------------------------------------------|
//! | GET    | `/api/hyperliquid` | `?vault=` single-vault summary               |
//! | GET    | `/api/positions`   | `?vaults=a,b` multi-vault positions          |
//! | GET    | `/api/vaults`      | agent registry                               |
//! | GET    | `/api/vaults/:id`  | one agent                                    |
//! | GET    | `/api/depositors`  | `?vault=` followers with equity / PnL / ROI  |
//! | GET    | `/api/share-card`  | `?vault=&user=` share image content          |
//! | GET    | `/api/meta`        | perpetual universe                           |
//! | GET    | `/api/debug-hlp`   | `?vault=` raw hlpDetails vs clearinghouse    |
//! | GET    | `/health`          | liveness                                     |

pub mod debug;
pub mod depositors;
pub mod positions;
pub mod registry;
pub mod share;
pub mod vault;

use crate::error::AppError;

/// `0x` + 40 hex digits.
pub fn is_address(s: &str) -> bool {
    s.len() == 42
        && s.starts_with("0x")
        && s[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Pull a required vault address out of an optional query parameter.
pub(crate) fn require_vault(raw: Option<&str>) -> Result<String, AppError> {
    let vault = raw.map(str::trim).unwrap_or_default();
    if vault.is_empty() {
        return Err(AppError::BadRequest("Missing vault address".into()));
    }
    if !is_address(vault) {
        return Err(AppError::BadRequest(format!("Invalid vault address: {vault}")));
    }
    Ok(vault.to_ascii_lowercase())
}

// ─── Router tests ─────────────────────────────────────────────────────────────
