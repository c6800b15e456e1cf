//! # hyperliquid::types
//!
//! Raw response shapes of the Hyperliquid `/info` endpoint.
//!
//! The exchange encodes almost every numeric field as a decimal **string**
//! (`"12.5"`), occasionally as a bare JSON number, and omits fields freely.
//! Every numeric field here goes through [`lenient_f64`] (or its integer
//! siblings), so a missing, null or unparsable value reads as zero.  Strings,
//! flags and lists treat `null` like an absent field.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ─── Request ──────────────────────────────────────────────────────────────────

/// Body of a `POST /info` call.  The `type` discriminator selects the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InfoRequest {
    /// Per-account margin + positions.
    ClearinghouseState { user: String },
    /// HLP vault aggregate (positions summed across the HLP sub-accounts).
    HlpDetails { user: String },
    /// Perpetual universe metadata.
    Meta,
    /// Mid price per coin.
    AllMids,
    /// Vault description, leader and followers.
    #[serde(rename_all = "camelCase")]
    VaultDetails { vault_address: String },
}

impl InfoRequest {
    /// The wire discriminator, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            InfoRequest::ClearinghouseState { .. } => "clearinghouseState",
            InfoRequest::HlpDetails { .. } => "hlpDetails",
            InfoRequest::Meta => "meta",
            InfoRequest::AllMids => "allMids",
            InfoRequest::VaultDetails { .. } => "vaultDetails",
        }
    }
}

// ─── Lenient numerics ─────────────────────────────────────────────────────────

/// Accepts `"1.5"`, `1.5`, `null` or garbage; anything unusable becomes `0.0`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_to_f64).unwrap_or(0.0))
}

/// Same as [`lenient_f64`] but keeps "absent" distinguishable from zero.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Null => None,
        other => Some(value_to_f64(&other)),
    }))
}

/// Whole-number variant of [`lenient_f64`]; negatives and overflow read as 0.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .map(value_to_f64)
        .filter(|v| (0.0..=u32::MAX as f64).contains(v))
        .map(|v| v as u32)
        .unwrap_or(0))
}

/// Millisecond timestamps: `null`, garbage or a missing field become `None`.
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

/// `null` reads as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn value_to_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

// ─── Margin summary ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub account_value: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_ntl_pos: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_raw_usd: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_margin_used: f64,
}

// ─── Leverage ─────────────────────────────────────────────────────────────────

/// Clearinghouse sends `{ "type": "cross", "value": 10 }`; the HLP aggregate
/// sends a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Leverage {
    Typed {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: f64,
    },
    Bare(#[serde(deserialize_with = "lenient_f64")] f64),
}

impl Leverage {
    pub fn value(&self) -> f64 {
        match self {
            Leverage::Typed { value, .. } => *value,
            Leverage::Bare(v) => *v,
        }
    }
}

impl Default for Leverage {
    fn default() -> Self {
        Leverage::Bare(0.0)
    }
}

// ─── Clearinghouse state ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub coin: String,
    /// Signed size: positive = long, negative = short.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub szi: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub entry_px: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub position_value: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unrealized_pnl: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub return_on_equity: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub liquidation_px: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub margin_used: f64,
    #[serde(default)]
    pub leverage: Leverage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPosition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: PositionData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    #[serde(default)]
    pub margin_summary: Option<MarginSummary>,
    #[serde(default)]
    pub cross_margin_summary: Option<MarginSummary>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub withdrawable: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub asset_positions: Vec<AssetPosition>,
}

// ─── HLP aggregate ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HlpPosition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub coin: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub szi: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub entry_px: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub mark_px: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub position_value: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unrealized_pnl: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub margin_used: f64,
    #[serde(default)]
    pub leverage: Leverage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HlpDetails {
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub account_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub withdrawable: f64,
    /// `None` when the field is missing entirely (the address is not HLP).
    #[serde(default)]
    pub open_positions: Option<Vec<HlpPosition>>,
}

// ─── Meta / mids ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseAsset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub sz_decimals: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub max_leverage: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub only_isolated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub universe: Vec<UniverseAsset>,
}

/// Coin → mid price.  Entries that fail to parse are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllMids(pub HashMap<String, f64>);

impl AllMids {
    pub fn get(&self, coin: &str) -> Option<f64> {
        self.0.get(coin).copied().filter(|px| *px > 0.0)
    }
}

impl<'de> Deserialize<'de> for AllMids {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Value>::deserialize(deserializer)?;
        Ok(AllMids(
            raw.into_iter()
                .map(|(coin, v)| (coin, value_to_f64(&v)))
                .filter(|(_, px)| *px > 0.0)
                .collect(),
        ))
    }
}

// ─── Vault details ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follower {
    /// Follower address, or the literal `"Leader"` for the vault leader.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vault_equity: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pnl: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub all_time_pnl: f64,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub days_following: u32,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub vault_entry_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub lockup_until: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub leader: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub apr: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: Vec<Follower>,
}
