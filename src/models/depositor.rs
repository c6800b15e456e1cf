//! # models::depositor
//!
//! A vault follower as rendered in the depositors table.

use serde::Serialize;

use crate::engine::share_card::roi_pct;
use crate::hyperliquid::types::Follower;

/// Upstream labels the leader's own stake with this literal instead of an
/// address.
pub const LEADER_LABEL: &str = "Leader";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Depositor {
    pub user: String,
    pub equity: f64,
    pub pnl: f64,
    pub all_time_pnl: f64,
    pub roi_pct: f64,
    pub days_following: u32,
    pub is_leader: bool,
}

impl From<&Follower> for Depositor {
    fn from(f: &Follower) -> Self {
        Self {
            user: f.user.clone(),
            equity: f.vault_equity,
            pnl: f.pnl,
            all_time_pnl: f.all_time_pnl,
            roi_pct: roi_pct(f.vault_equity, f.all_time_pnl),
            days_following: f.days_following,
            is_leader: f.user == LEADER_LABEL,
        }
    }
}

/// Body of `GET /api/depositors`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositorTable {
    pub vault_address: String,
    pub vault_name: String,
    /// Leader account address as reported upstream; empty when absent.
    pub leader: String,
    pub apr: f64,
    pub depositors: Vec<Depositor>,
}
