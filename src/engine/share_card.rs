//! # engine::share_card
//!
//! Builds the content of the "share your performance" image.  The browser
//! only paints it; every label, value, colour tone and the tweet text are
//! decided here.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::models::depositor::LEADER_LABEL;

const TWEET_INTENT_URL: &str = "https://x.com/compose/tweet";

/// Characters `encodeURIComponent` leaves alone; spaces become `%20`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ─── Formatting ───────────────────────────────────────────────────────────────

/// `0x1234...def` style.  `"Leader"`, empty and already-short strings pass
/// through unchanged.
pub fn short_address(address: &str) -> String {
    if address.is_empty() || address == LEADER_LABEL || address.chars().count() <= 9 {
        return address.to_string();
    }
    let head: String = address.chars().take(6).collect();
    let tail: String = {
        let chars: Vec<char> = address.chars().collect();
        chars[chars.len() - 3..].iter().collect()
    };
    format!("{head}...{tail}")
}

/// `$1234.56`, `+$12.35k`, `-$1.20M`, `$3.00B`.
pub fn format_money(n: f64, include_sign: bool) -> String {
    let sign = if !include_sign {
        ""
    } else if n < 0.0 {
        "-"
    } else if n > 0.0 {
        "+"
    } else {
        ""
    };
    let v = n.abs();
    let (num, suffix) = if v >= 1_000_000_000.0 {
        (v / 1_000_000_000.0, "B")
    } else if v >= 1_000_000.0 {
        (v / 1_000_000.0, "M")
    } else if v >= 10_000.0 {
        (v / 1_000.0, "k")
    } else {
        (v, "")
    };
    format!("{sign}${num:.2}{suffix}")
}

/// `+12.34%` / `-5.00%`.
pub fn format_pct(pct: f64) -> String {
    let sign = if pct >= 0.0 { "+" } else { "" };
    format!("{sign}{pct:.2}%")
}

/// Return on the depositor's cost basis (`equity - pnl`); zero when the
/// basis is not positive.
pub fn roi_pct(equity: f64, pnl: f64) -> f64 {
    let basis = equity - pnl;
    if basis <= 0.0 {
        return 0.0;
    }
    pnl / basis * 100.0
}

// ─── Card model ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    fn of(display: &str) -> Self {
        if display.starts_with('+') {
            Tone::Positive
        } else if display.starts_with('-') {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCard {
    pub title: String,
    pub tagline: String,
    pub vault_label: String,
    pub depositor_label: String,
    pub metrics: Vec<Metric>,
    pub generated_at: DateTime<Utc>,
    pub tweet_text: String,
    pub tweet_url: String,
    pub file_name: String,
}

/// Everything the card needs, already resolved from upstream.
#[derive(Debug, Clone)]
pub struct ShareParams<'a> {
    pub brand: &'a str,
    pub app_name: &'a str,
    pub tagline: &'a str,
    /// Registry / upstream vault name; empty falls back to the short address.
    pub vault_name: &'a str,
    pub vault_address: &'a str,
    pub user: &'a str,
    pub equity: f64,
    pub pnl: f64,
    pub roi_pct: f64,
    pub hide_pnl: bool,
    pub hide_equity: bool,
}

pub fn build_share_card(params: &ShareParams<'_>, now: DateTime<Utc>) -> ShareCard {
    let vault_label = if params.vault_name.is_empty() {
        short_address(params.vault_address)
    } else {
        params.vault_name.to_string()
    };

    let mut metrics = Vec::with_capacity(3);
    if !params.hide_equity {
        let value = format_money(params.equity, false);
        metrics.push(Metric { label: "Equity", tone: Tone::of(&value), value });
    }
    let roi = format_pct(params.roi_pct);
    metrics.push(Metric { label: "ROI", tone: Tone::of(&roi), value: roi.clone() });
    let pnl = if params.hide_pnl {
        "Hidden".to_string()
    } else {
        format_money(params.pnl, true)
    };
    metrics.push(Metric { label: "PnL", tone: Tone::of(&pnl), value: pnl });

    let tweet_vault = if params.vault_name.is_empty() {
        "this vault"
    } else {
        params.vault_name
    };
    let tweet_text = format!(
        "I just hit {roi} ROI by copytrading {tweet_vault} on {}",
        params.brand
    );
    let tweet_url = format!(
        "{TWEET_INTENT_URL}?text={}",
        utf8_percent_encode(&tweet_text, URI_COMPONENT)
    );

    ShareCard {
        title: params.app_name.to_uppercase(),
        tagline: params.tagline.to_string(),
        vault_label,
        depositor_label: short_address(params.user),
        metrics,
        generated_at: now,
        tweet_text,
        tweet_url,
        file_name: format!("pnl_{}.png", params.user),
    }
}
