//! # config — Config from Environment Variables
//!
//! | Variable          | Default                                        |
//! |-------------------|------------------------------------------------|
//! | `BIND_ADDR`       | `0.0.0.0:3000`                                 |
//! | `HL_INFO_URL`     | `https://api.hyperliquid.xyz/info`             |
//! | `HL_TIMEOUT_SECS` | `10`                                           |
//! | `HLP_VAULTS`      | `0xdfc24b077bc1425ad1dea75bcb6f8158e10df303`   |
//! | `SHARE_BRAND`     | `SigmaArena`                                   |
//! | `SHARE_APP_NAME`  | `cryptosky.org`                                |
//! | `SHARE_TAGLINE`   | `Track and deposit at cryptosky.org`           |

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_INFO_URL: &str = "https://api.hyperliquid.xyz/info";
pub const DEFAULT_HLP_VAULT: &str = "0xdfc24b077bc1425ad1dea75bcb6f8158e10df303";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Full URL of the exchange `/info` endpoint.
    pub info_url: String,
    /// Per-request upstream timeout.
    pub upstream_timeout: Duration,
    /// Vault addresses answered through `hlpDetails`, lower-cased.
    pub hlp_vaults: Vec<String>,
    pub share: ShareConfig,
}

/// Branding stamped onto share cards.
#[derive(Debug, Clone)]
pub struct ShareConfig {
    pub brand: String,
    pub app_name: String,
    pub tagline: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env_or("BIND_ADDR", "0.0.0.0:3000")
            .parse()
            .context("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3000")?;

        let timeout_secs: u64 = env_or("HL_TIMEOUT_SECS", "10")
            .parse()
            .context("HL_TIMEOUT_SECS must be a number")?;

        Ok(Self {
            bind_addr,
            info_url:         env_or("HL_INFO_URL", DEFAULT_INFO_URL),
            upstream_timeout: Duration::from_secs(timeout_secs),
            hlp_vaults:       parse_address_list(&env_or("HLP_VAULTS", DEFAULT_HLP_VAULT)),
            share: ShareConfig {
                brand:    env_or("SHARE_BRAND", "SigmaArena"),
                app_name: env_or("SHARE_APP_NAME", "cryptosky.org"),
                tagline:  env_or("SHARE_TAGLINE", "Track and deposit at cryptosky.org"),
            },
        })
    }

    pub fn is_hlp(&self, vault: &str) -> bool {
        self.hlp_vaults.iter().any(|v| v.eq_ignore_ascii_case(vault))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr:        SocketAddr::from(([0, 0, 0, 0], 3000)),
            info_url:         DEFAULT_INFO_URL.to_string(),
            upstream_timeout: Duration::from_secs(10),
            hlp_vaults:       vec![DEFAULT_HLP_VAULT.to_string()],
            share: ShareConfig {
                brand:    "SigmaArena".to_string(),
                app_name: "cryptosky.org".to_string(),
                tagline:  "Track and deposit at cryptosky.org".to_string(),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Comma separated, whitespace tolerant, empties dropped, lower-cased.
pub fn parse_address_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}
