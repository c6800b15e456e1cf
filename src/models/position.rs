//! # models::position
//!
//! The unified position/equity model every endpoint returns, whatever
//! upstream shape it was built from.

use serde::Serialize;

use crate::hyperliquid::types::MarginSummary;

// ─── Side ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
    Flat,
}

impl Side {
    /// Derived from the sign of the signed size.
    pub fn from_size(size: f64) -> Self {
        if size > 0.0 {
            Side::Long
        } else if size < 0.0 {
            Side::Short
        } else {
            Side::Flat
        }
    }
}

// ─── MarkSource ───────────────────────────────────────────────────────────────

/// Where [`Position::mark_price`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkSource {
    /// Upstream sent a mark price with the position.
    Upstream,
    /// `allMids` for the coin.
    Mid,
    /// `positionValue / |size|`.
    PositionValue,
    /// `entryPrice + unrealizedPnl / size`.
    PnlImplied,
    /// Nothing better was available.
    Entry,
}

// ─── Position ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub coin: String,
    /// Signed size: positive = long.
    pub size: f64,
    pub side: Side,
    pub entry_price: f64,
    pub mark_price: f64,
    pub mark_source: MarkSource,
    pub leverage: f64,
    pub unrealized_pnl: f64,
    pub margin_used: f64,
    pub position_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidation_price: Option<f64>,
}

// ─── VaultSummary ─────────────────────────────────────────────────────────────

/// Which upstream query produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    Clearinghouse,
    Hlp,
}

/// Body of `GET /api/hyperliquid`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSummary {
    pub vault_address: String,
    pub equity: f64,
    pub account_value: f64,
    pub withdrawable: f64,
    pub total_pnl: f64,
    pub positions: Vec<Position>,
    pub margin_summary: MarginSummary,
    pub source: SummarySource,
}

// ─── VaultPositions ───────────────────────────────────────────────────────────

/// One entry of `GET /api/positions`.  A vault whose fetch failed still
/// appears, with no positions and the failure in `error`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultPositions {
    pub vault_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub equity: f64,
    pub total_pnl: f64,
    pub positions: Vec<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_follows_size_sign() {
        assert_eq!(Side::from_size(0.25), Side::Long);
        assert_eq!(Side::from_size(-3.0), Side::Short);
        assert_eq!(Side::from_size(0.0), Side::Flat);
    }

    #[test]
    fn position_serialises_camel_case() {
        let pos = Position {
            coin: "BTC".into(),
            size: -0.5,
            side: Side::Short,
            entry_price: 60000.0,
            mark_price: 59000.0,
            mark_source: MarkSource::PnlImplied,
            leverage: 10.0,
            unrealized_pnl: 500.0,
            margin_used: 2950.0,
            position_value: 29500.0,
            liquidation_price: None,
        };
        let v = serde_json::to_value(&pos).unwrap();
        assert_eq!(v["side"], "short");
        assert_eq!(v["markSource"], "pnlImplied");
        assert_eq!(v["unrealizedPnl"], 500.0);
        assert!(v.get("liquidationPrice").is_none());
    }
}
