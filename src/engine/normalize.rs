//! # engine::normalize
//!
//! Reconciles the two upstream position shapes into [`Position`]:
//!
//! * `clearinghouseState` → `assetPositions[].position`
//! * `hlpDetails`         → `openPositions[]`
//!
//! ## Mark price resolution
//!
//! First usable (> 0) value wins:
//!
//! 1. `markPx` sent with the position
//! 2. `allMids[coin]`
//! 3. `|positionValue| / |size|`
//! 4. `entryPrice + unrealizedPnl / size`
//! 5. `entryPrice`

use crate::hyperliquid::types::{AllMids, ClearinghouseState, HlpDetails, MarginSummary};
use crate::models::{MarkSource, Position, Side, SummarySource, VaultSummary};

// ─── Mark price ───────────────────────────────────────────────────────────────

/// Inputs for [`resolve_mark`], borrowed from whichever shape is being mapped.
#[derive(Debug, Clone, Copy)]
pub struct MarkInputs<'a> {
    pub coin: &'a str,
    pub size: f64,
    pub entry_price: f64,
    pub unrealized_pnl: f64,
    pub position_value: f64,
    pub explicit_mark: Option<f64>,
}

pub fn resolve_mark(inputs: &MarkInputs<'_>, mids: Option<&AllMids>) -> (f64, MarkSource) {
    if let Some(px) = inputs.explicit_mark.filter(|px| *px > 0.0) {
        return (px, MarkSource::Upstream);
    }

    if let Some(px) = mids.and_then(|m| m.get(inputs.coin)) {
        return (px, MarkSource::Mid);
    }

    if inputs.size != 0.0 && inputs.position_value != 0.0 {
        let px = inputs.position_value.abs() / inputs.size.abs();
        if px > 0.0 {
            return (px, MarkSource::PositionValue);
        }
    }

    if inputs.size != 0.0 {
        let px = inputs.entry_price + inputs.unrealized_pnl / inputs.size;
        if px > 0.0 {
            return (px, MarkSource::PnlImplied);
        }
    }

    (inputs.entry_price, MarkSource::Entry)
}

// ─── Position mapping ─────────────────────────────────────────────────────────

/// Map `assetPositions` of a clearinghouse state.  Zero-size entries are
/// dropped.
pub fn normalize_clearinghouse(state: &ClearinghouseState, mids: Option<&AllMids>) -> Vec<Position> {
    state
        .asset_positions
        .iter()
        .map(|ap| &ap.position)
        .filter(|p| p.szi != 0.0)
        .map(|p| {
            let (mark_price, mark_source) = resolve_mark(
                &MarkInputs {
                    coin: &p.coin,
                    size: p.szi,
                    entry_price: p.entry_px,
                    unrealized_pnl: p.unrealized_pnl,
                    position_value: p.position_value,
                    explicit_mark: None,
                },
                mids,
            );

            Position {
                coin: p.coin.clone(),
                size: p.szi,
                side: Side::from_size(p.szi),
                entry_price: p.entry_px,
                mark_price,
                mark_source,
                leverage: p.leverage.value(),
                unrealized_pnl: p.unrealized_pnl,
                margin_used: p.margin_used,
                position_value: p.position_value,
                liquidation_price: p.liquidation_px.filter(|px| *px > 0.0),
            }
        })
        .collect()
}

/// Map `openPositions` of an HLP aggregate.  Zero-size entries are dropped.
pub fn normalize_hlp(details: &HlpDetails, mids: Option<&AllMids>) -> Vec<Position> {
    details
        .open_positions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|p| p.szi != 0.0)
        .map(|p| {
            let (mark_price, mark_source) = resolve_mark(
                &MarkInputs {
                    coin: &p.coin,
                    size: p.szi,
                    entry_price: p.entry_px,
                    unrealized_pnl: p.unrealized_pnl,
                    position_value: p.position_value,
                    explicit_mark: p.mark_px,
                },
                mids,
            );

            // HLP rows often omit positionValue; derive it from the mark.
            let position_value = if p.position_value != 0.0 {
                p.position_value
            } else {
                p.szi.abs() * mark_price
            };

            Position {
                coin: p.coin.clone(),
                size: p.szi,
                side: Side::from_size(p.szi),
                entry_price: p.entry_px,
                mark_price,
                mark_source,
                leverage: p.leverage.value(),
                unrealized_pnl: p.unrealized_pnl,
                margin_used: p.margin_used,
                position_value,
                liquidation_price: None,
            }
        })
        .collect()
}

pub fn total_unrealized_pnl(positions: &[Position]) -> f64 {
    positions.iter().map(|p| p.unrealized_pnl).sum()
}

// ─── Summaries ────────────────────────────────────────────────────────────────

pub fn summarize_clearinghouse(
    vault_address: &str,
    state: &ClearinghouseState,
    mids: Option<&AllMids>,
) -> VaultSummary {
    let positions = normalize_clearinghouse(state, mids);
    let margin_summary = state.margin_summary.clone().unwrap_or_default();
    let account_value = margin_summary.account_value;

    VaultSummary {
        vault_address: vault_address.to_string(),
        equity: account_value,
        account_value,
        withdrawable: state.withdrawable,
        total_pnl: total_unrealized_pnl(&positions),
        positions,
        margin_summary,
        source: SummarySource::Clearinghouse,
    }
}

/// The aggregate carries no margin summary; one is synthesised from the
/// positions so both shapes serialise identically.
pub fn summarize_hlp(vault_address: &str, details: &HlpDetails, mids: Option<&AllMids>) -> VaultSummary {
    let positions = normalize_hlp(details, mids);
    let total_ntl_pos: f64 = positions.iter().map(|p| p.position_value.abs()).sum();
    let total_margin_used: f64 = positions.iter().map(|p| p.margin_used).sum();
    let account_value = details.account_value.unwrap_or(0.0);

    VaultSummary {
        vault_address: vault_address.to_string(),
        equity: account_value,
        account_value,
        withdrawable: details.withdrawable,
        total_pnl: total_unrealized_pnl(&positions),
        positions,
        margin_summary: MarginSummary {
            account_value,
            total_ntl_pos,
            total_raw_usd: 0.0,
            total_margin_used,
        },
        source: SummarySource::Hlp,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clearinghouse_fixture() -> ClearinghouseState {
        serde_json::from_value(json!({
            "marginSummary": {
                "accountValue": "10250.75",
                "totalNtlPos": "33000.0",
                "totalRawUsd": "-22749.25",
                "totalMarginUsed": "3300.0"
            },
            "withdrawable": "6950.75",
            "assetPositions": [
                {
                    "type": "oneWay",
                    "position": {
                        "coin": "BTC",
                        "szi": "0.5",
                        "entryPx": "60000.0",
                        "positionValue": "31000.0",
                        "unrealizedPnl": "1000.0",
                        "marginUsed": "3100.0",
                        "liquidationPx": "42000.5",
                        "leverage": { "type": "cross", "value": 10 }
                    }
                },
                {
                    "type": "oneWay",
                    "position": {
                        "coin": "ETH",
                        "szi": "-2.0",
                        "entryPx": "3100.0",
                        "unrealizedPnl": "200.0",
                        "marginUsed": "200.0",
                        "liquidationPx": null,
                        "leverage": { "type": "isolated", "value": 15 }
                    }
                },
                {
                    "type": "oneWay",
                    "position": { "coin": "SOL", "szi": "0.0", "entryPx": "150.0" }
                }
            ]
        }))
        .unwrap()
    }

    fn inputs(size: f64, entry: f64, upnl: f64, value: f64) -> MarkInputs<'static> {
        MarkInputs {
            coin: "BTC",
            size,
            entry_price: entry,
            unrealized_pnl: upnl,
            position_value: value,
            explicit_mark: None,
        }
    }

    #[test]
    fn test_mark_prefers_explicit_then_mid() {
        let mids = AllMids([("BTC".to_string(), 61000.0)].into_iter().collect());
        let mut i = inputs(0.5, 60000.0, 1000.0, 31000.0);

        i.explicit_mark = Some(62000.0);
        assert_eq!(resolve_mark(&i, Some(&mids)), (62000.0, MarkSource::Upstream));

        i.explicit_mark = Some(0.0);
        assert_eq!(resolve_mark(&i, Some(&mids)), (61000.0, MarkSource::Mid));
    }

    #[test]
    fn test_mark_falls_back_to_position_value() {
        let i = inputs(-0.5, 60000.0, 1000.0, 29500.0);
        assert_eq!(resolve_mark(&i, None), (59000.0, MarkSource::PositionValue));
    }

    #[test]
    fn test_mark_falls_back_to_pnl_implied() {
        // short 2 @ 3100 with +200 upnl → mark 3000
        let i = inputs(-2.0, 3100.0, 200.0, 0.0);
        assert_eq!(resolve_mark(&i, None), (3000.0, MarkSource::PnlImplied));
    }

    #[test]
    fn test_mark_falls_back_to_entry() {
        let i = inputs(0.0, 150.0, 0.0, 0.0);
        assert_eq!(resolve_mark(&i, None), (150.0, MarkSource::Entry));
    }

    #[test]
    fn test_clearinghouse_positions() {
        let positions = normalize_clearinghouse(&clearinghouse_fixture(), None);
        assert_eq!(positions.len(), 2, "zero-size SOL row is dropped");

        let btc = &positions[0];
        assert_eq!(btc.side, Side::Long);
        assert_eq!(btc.leverage, 10.0);
        assert_eq!(btc.mark_price, 62000.0);
        assert_eq!(btc.mark_source, MarkSource::PositionValue);
        assert_eq!(btc.liquidation_price, Some(42000.5));

        let eth = &positions[1];
        assert_eq!(eth.side, Side::Short);
        assert_eq!(eth.leverage, 15.0);
        assert_eq!(eth.mark_price, 3000.0);
        assert_eq!(eth.mark_source, MarkSource::PnlImplied);
        assert_eq!(eth.liquidation_price, None);
    }

    #[test]
    fn test_clearinghouse_summary() {
        let summary = summarize_clearinghouse("0xvault", &clearinghouse_fixture(), None);
        assert_eq!(summary.equity, 10250.75);
        assert_eq!(summary.account_value, summary.equity);
        assert_eq!(summary.withdrawable, 6950.75);
        assert_eq!(summary.total_pnl, 1200.0);
        assert_eq!(summary.source, SummarySource::Clearinghouse);
    }

    #[test]
    fn test_empty_clearinghouse_defaults_to_zero() {
        let summary = summarize_clearinghouse("0xvault", &ClearinghouseState::default(), None);
        assert_eq!(summary.equity, 0.0);
        assert_eq!(summary.total_pnl, 0.0);
        assert!(summary.positions.is_empty());
        assert_eq!(summary.margin_summary, MarginSummary::default());
    }

    #[test]
    fn test_hlp_summary() {
        let details: HlpDetails = serde_json::from_value(json!({
            "accountValue": "250000000.0",
            "openPositions": [
                { "coin": "BTC", "szi": "-12.5", "entryPx": "64000", "markPx": "63000",
                  "unrealizedPnl": "12500", "marginUsed": "80000", "leverage": 10 },
                { "coin": "DOGE", "szi": 100000, "entryPx": "0.15", "unrealizedPnl": "-1000",
                  "marginUsed": "1500", "leverage": "5" }
            ]
        }))
        .unwrap();
        let mids = AllMids([("DOGE".to_string(), 0.14)].into_iter().collect());

        let summary = summarize_hlp("0xhlp", &details, Some(&mids));
        assert_eq!(summary.source, SummarySource::Hlp);
        assert_eq!(summary.equity, 250_000_000.0);
        assert_eq!(summary.total_pnl, 11500.0);

        let btc = &summary.positions[0];
        assert_eq!(btc.side, Side::Short);
        assert_eq!(btc.mark_source, MarkSource::Upstream);
        assert_eq!(btc.position_value, 12.5 * 63000.0);

        let doge = &summary.positions[1];
        assert_eq!(doge.mark_source, MarkSource::Mid);
        assert_eq!(doge.leverage, 5.0);
        assert_eq!(summary.margin_summary.total_margin_used, 81500.0);
    }
}
