#![deny(missing_docs)]
//! Runs the bank and voting modules as one application: genesis, serialized transaction
//! application with revert-on-error, and read-only queries over a consistent snapshot.

mod batch;
mod runtime;
mod stf_blueprint;

pub use batch::{Batch, Transaction};
pub use runtime::{GenesisConfig, Runtime, RuntimeCall};
use serde::{Deserialize, Serialize};
use sov_modules_api::Event;
pub use stf_blueprint::AppRunner;

/// The outcome of a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxEffect {
    /// The transaction's writes were committed.
    Successful,
    /// Every write of the transaction was discarded. Carries the error message.
    Reverted(String),
}

/// Reasons a transaction is refused before it reaches a module.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    /// Module accounts are controlled by their module only.
    #[error("Module account {0} cannot send transactions")]
    ModuleSender(String),
}

/// What a transaction left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Hex encoded hash of the borsh encoded transaction.
    pub tx_hash: String,
    /// Whether the transaction was applied.
    pub effect: TxEffect,
    /// Events emitted by a successful transaction. Reverted transactions emit none.
    pub events: Vec<Event>,
}

impl TxReceipt {
    /// Returns `true` if the transaction was applied.
    pub fn is_successful(&self) -> bool {
        self.effect == TxEffect::Successful
    }
}
