//! The interface every module of the Sovereign SDK module system is written against.

mod bech32;
pub mod default_context;
mod error;
mod prefix;
mod response;
pub mod utils;

use core::fmt::{self, Debug, Display};
use core::hash::Hash;
use core::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
pub use error::Error;
pub use prefix::Prefix;
pub use response::CallResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
pub use sov_state::{Event, StateMap, StateValue, Storage, WorkingSet};

pub use crate::bech32::{AddressBech32, Bech32ParseError};

/// A 32 byte account identifier, displayed and serialized as a bech32m string with the `sov`
/// prefix.
#[derive(
    PartialEq,
    Clone,
    Copy,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    BorshDeserialize,
    BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "AddressBech32", into = "AddressBech32")]
pub struct Address {
    addr: [u8; 32],
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.addr
    }
}

impl AddressTrait for Address {}

impl<'a> TryFrom<&'a [u8]> for Address {
    type Error = anyhow::Error;

    fn try_from(addr: &'a [u8]) -> Result<Self, Self::Error> {
        if addr.len() != 32 {
            anyhow::bail!("Address must be 32 bytes long");
        }
        let mut addr_bytes = [0u8; 32];
        addr_bytes.copy_from_slice(addr);
        Ok(Self { addr: addr_bytes })
    }
}

impl From<[u8; 32]> for Address {
    fn from(addr: [u8; 32]) -> Self {
        Self { addr }
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address_bech32 = AddressBech32::from_str(s)?;
        Ok(Self::from(address_bech32.to_byte_array()))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AddressBech32::from(self))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", AddressBech32::from(self))
    }
}

impl From<AddressBech32> for Address {
    fn from(addr: AddressBech32) -> Self {
        Self {
            addr: addr.to_byte_array(),
        }
    }
}

/// The bounds every address type of the module system satisfies.
pub trait AddressTrait:
    PartialEq
    + Eq
    + Clone
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + AsRef<[u8]>
    + From<[u8; 32]>
    + FromStr<Err = anyhow::Error>
    + Serialize
    + DeserializeOwned
    + BorshSerialize
    + BorshDeserialize
    + 'static
{
}

/// The primitives an application is built from: the address format, the storage backend and
/// the hasher used to derive module addresses.
pub trait Spec {
    /// The Address type used by accounts and modules.
    type Address: AddressTrait;

    /// State storage backing every module.
    type Storage: Storage + Send + Sync;

    /// The hasher used to derive module and test addresses.
    type Hasher: sha2::Digest<OutputSize = sha2::digest::typenum::U32>;
}

/// A context contains information which is passed to modules during
/// transaction execution. Currently, context includes the sender of the transaction,
/// already authenticated by whoever built the context.
pub trait Context: Spec + Clone + Debug + PartialEq {
    /// Sender of the transaction.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

/// The entry points of a module.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis runs once, when the application is deployed, and sets the initial state of the module.
    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error>;

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}

/// Every module has to implement this trait.
pub trait ModuleInfo: Default {
    /// Execution context.
    type Context: Context;

    /// Returns address of the module.
    fn address(&self) -> &<Self::Context as Spec>::Address;

    /// Returns the prefix of the module.
    fn prefix(&self) -> Prefix;
}
