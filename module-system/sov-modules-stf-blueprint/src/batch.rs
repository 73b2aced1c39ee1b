use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::Digest;
use sov_modules_api::{Context, Spec};

use crate::RuntimeCall;

/// A call together with the account issuing it. The sender is trusted as authenticated.
#[derive(Debug, PartialEq, Clone, BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transaction<C: Context> {
    /// The account the call is executed as.
    pub sender: C::Address,
    /// The module call.
    pub call: RuntimeCall<C>,
}

impl<C: Context> Transaction<C> {
    /// Creates a transaction.
    pub fn new(sender: C::Address, call: RuntimeCall<C>) -> Self {
        Self { sender, call }
    }

    /// Hash of the borsh encoding of the transaction.
    pub fn hash(&self) -> [u8; 32] {
        let data = self
            .try_to_vec()
            .expect("Serializing into memory cannot fail");
        <C as Spec>::Hasher::digest(&data).into()
    }
}

/// Transactions applied in order. Reads from a JSON array of transactions.
#[derive(Debug, PartialEq, Clone, BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Batch<C: Context> {
    /// The transactions of the batch.
    pub txs: Vec<Transaction<C>>,
}

impl<C: Context> From<Vec<Transaction<C>>> for Batch<C> {
    fn from(txs: Vec<Transaction<C>>) -> Self {
        Self { txs }
    }
}
