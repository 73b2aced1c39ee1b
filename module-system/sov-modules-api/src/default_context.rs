use serde::{Deserialize, Serialize};
use sov_state::InMemoryStorage;

use crate::{Address, Context, Spec};

/// The context used by native execution: SHA-256 addresses over an in-memory store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultContext {
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = InMemoryStorage;
    type Hasher = sha2::Sha256;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}
