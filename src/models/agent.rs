//! # models::agent
//!
//! The static registry of AI-agent vaults shown on the dashboard.
//! Each agent mirrors a leader account's trades into a Hyperliquid vault.

use serde::Serialize;

/// Copy-trading parameters applied by the mirroring bot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSnapshot {
    pub copy_ratio: f64,
    pub max_leverage: u32,
    pub max_notional_usd: u64,
    pub slippage_bps: u32,
    pub refresh_account_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultAgent {
    pub id: &'static str,
    pub name: &'static str,
    pub model: &'static str,
    pub model_id: &'static str,
    pub vault_address: &'static str,
    pub leader_address: &'static str,
    pub logs_url: &'static str,
    pub dashboard_url: &'static str,
    /// Not live yet; listed as "Coming Soon" and skipped by the default
    /// positions fan-out.
    pub coming_soon: bool,
    /// Trades the opposite side of the leader.
    pub inverse: bool,
    pub risk_snapshot: RiskSnapshot,
}

const STANDARD_RISK: RiskSnapshot = RiskSnapshot {
    copy_ratio: 1.0,
    max_leverage: 10,
    max_notional_usd: 1_000_000,
    slippage_bps: 25,
    refresh_account_interval_ms: 60_000,
};

const INVERSE_RISK: RiskSnapshot = RiskSnapshot {
    max_leverage: 5,
    ..STANDARD_RISK
};

pub static VAULT_AGENTS: &[VaultAgent] = &[
    VaultAgent {
        id: "deepseek-chat-v3.1",
        name: "DeepSeek V3.1",
        model: "DeepSeek V3.1",
        model_id: "deepseek-chat-v3.1",
        vault_address: "0x07fd993f0fa3a185f7207adccd29f7a87404689d",
        leader_address: "0x2b804617c6f63c040377e95bb276811747006f4b",
        logs_url: "https://userapi-compute.eigencloud.xyz/logs/0x4418BA3C4a1E52BBd8f1133fA136CCED3807c6f9",
        dashboard_url: "https://nof1.ai/models/deepseek-chat-v3.1",
        coming_soon: false,
        inverse: false,
        risk_snapshot: STANDARD_RISK,
    },
    VaultAgent {
        id: "qwen3-max",
        name: "Qwen3 Max",
        model: "Qwen3 Max",
        model_id: "qwen3-max",
        vault_address: "0xd6e56265890b76413d1d527eb9b75e334c0c5b42",
        leader_address: "0x2b804617c6f63c040377e95bb276811747006f4b",
        logs_url: "https://userapi-compute.eigencloud.xyz/logs/0xfFE88cADD07B343C79d8e617853A1e140c695860",
        dashboard_url: "https://nof1.ai/models/qwen3-max",
        coming_soon: false,
        inverse: false,
        risk_snapshot: STANDARD_RISK,
    },
    VaultAgent {
        id: "grok-4",
        name: "Grok 4",
        model: "Grok 4",
        model_id: "grok-4",
        vault_address: "0xdfc24b077bc1425ad1dea75bcb6f8158e10df303",
        leader_address: "0x677d831aef5328190852e24f13c46cac05f984e7",
        logs_url: "https://userapi-compute.eigencloud.xyz/logs/0x9abb8630488a02Ec3410C26785f661fa49218140",
        dashboard_url: "https://nof1.ai/models/grok-4",
        coming_soon: false,
        inverse: false,
        risk_snapshot: STANDARD_RISK,
    },
    VaultAgent {
        id: "inverse-gpt-5",
        name: "Inverse GPT-5",
        model: "Inverse GPT-5",
        model_id: "gpt-5",
        vault_address: "0xba75577c834ed2abacc71ff9d0c18f30e9c34517",
        leader_address: "0x67293d914eafb26878534571add81f6bd2d9fe06",
        logs_url: "https://userapi-compute.eigencloud.xyz/logs/0x0feaA0eb6004972CFAA5Ce99cBa705D283525f95",
        dashboard_url: "https://nof1.ai/models/gpt-5",
        coming_soon: false,
        inverse: true,
        risk_snapshot: INVERSE_RISK,
    },
    VaultAgent {
        id: "inverse-gemini",
        name: "Inverse Gemini",
        model: "Inverse Gemini 2.5 Pro",
        model_id: "inverse-gemini",
        vault_address: "0x4f1a910a1f4396043fced901b5f97e47544bb6c1",
        leader_address: "0x1b7a7d099a670256207a30dd0ae13d35f278010f",
        logs_url: "https://userapi-compute.eigencloud.xyz/logs/0xfeC9Ac284FC46e5e67E69430889B7AAF5BF47C7e",
        dashboard_url: "https://nof1.ai/models/gemini-2.5-pro",
        coming_soon: false,
        inverse: true,
        risk_snapshot: INVERSE_RISK,
    },
];

/// Look an agent up by vault address (case-insensitive).
pub fn by_vault(address: &str) -> Option<&'static VaultAgent> {
    VAULT_AGENTS
        .iter()
        .find(|a| a.vault_address.eq_ignore_ascii_case(address))
}

pub fn by_id(id: &str) -> Option<&'static VaultAgent> {
    VAULT_AGENTS.iter().find(|a| a.id == id)
}

/// Vault addresses of every live agent, in registry order.
pub fn live_vaults() -> Vec<String> {
    VAULT_AGENTS
        .iter()
        .filter(|a| !a.coming_soon)
        .map(|a| a.vault_address.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_vault_ignores_case() {
        let agent = by_vault("0xDFC24B077BC1425AD1DEA75BCB6F8158E10DF303").unwrap();
        assert_eq!(agent.id, "grok-4");
    }

    #[test]
    fn inverse_agents_have_lower_leverage_cap() {
        for agent in VAULT_AGENTS.iter().filter(|a| a.inverse) {
            assert_eq!(agent.risk_snapshot.max_leverage, 5);
        }
        assert_eq!(by_id("qwen3-max").unwrap().risk_snapshot.max_leverage, 10);
    }

    #[test]
    fn vault_addresses_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for agent in VAULT_AGENTS {
            assert!(seen.insert(agent.vault_address.to_ascii_lowercase()));
        }
        assert_eq!(live_vaults().len(), VAULT_AGENTS.len());
    }
}
