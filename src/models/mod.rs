//! Domain models shared across the vaultwatch service.

pub mod agent;
pub mod depositor;
pub mod position;

pub use agent::VAULT_AGENTS;
pub use depositor::{Depositor, DepositorTable};
pub use position::{MarkSource, Position, Side, SummarySource, VaultPositions, VaultSummary};
