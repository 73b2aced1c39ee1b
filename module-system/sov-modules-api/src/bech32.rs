use core::fmt;
use core::str::FromStr;

use bech32::{Error, FromBase32, ToBase32};

use crate::Address;

pub fn vec_to_bech32m(vec: &[u8], hrp: &str) -> Result<String, Error> {
    let data = vec.to_base32();
    let bech32_addr = bech32::encode(hrp, data, bech32::Variant::Bech32m)?;
    Ok(bech32_addr)
}

pub fn bech32m_to_decoded_vec(bech32_addr: &str) -> Result<(String, Vec<u8>), Error> {
    let (hrp, data, _) = bech32::decode(bech32_addr)?;
    let vec = Vec::<u8>::from_base32(&data)?;
    Ok((hrp, vec))
}

const HRP: &str = "sov";

/// The human readable form of an [`Address`]. Always holds a valid 32 byte payload.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Debug,
    PartialEq,
    Clone,
    Eq,
)]
#[serde(try_from = "String", into = "String")]
pub struct AddressBech32 {
    value: String,
}

impl fmt::Display for AddressBech32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<AddressBech32> for String {
    fn from(addr: AddressBech32) -> Self {
        addr.value
    }
}

impl AddressBech32 {
    pub(crate) fn to_byte_array(&self) -> [u8; 32] {
        let mut addr_bytes = [0u8; 32];
        // The payload length is checked when the value is constructed.
        if let Ok((_, data)) = bech32m_to_decoded_vec(&self.value) {
            addr_bytes.copy_from_slice(&data);
        }
        addr_bytes
    }
}

impl TryFrom<&[u8]> for AddressBech32 {
    type Error = bech32::Error;

    fn try_from(addr: &[u8]) -> Result<Self, bech32::Error> {
        if addr.len() != 32 {
            return Err(bech32::Error::InvalidLength);
        }
        let string = vec_to_bech32m(addr, HRP)?;
        Ok(AddressBech32 { value: string })
    }
}

impl From<&Address> for AddressBech32 {
    fn from(addr: &Address) -> Self {
        // Encoding 32 bytes with a static, valid HRP cannot fail.
        let value = vec_to_bech32m(addr.as_ref(), HRP).unwrap_or_default();
        AddressBech32 { value }
    }
}

impl From<Address> for AddressBech32 {
    fn from(addr: Address) -> Self {
        AddressBech32::from(&addr)
    }
}

/// Errors raised while parsing an address string.
#[derive(Debug, thiserror::Error)]
pub enum Bech32ParseError {
    /// The string is not valid bech32.
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    /// The human readable part is not `sov`.
    #[error("Wrong HRP: {0}")]
    WrongHPR(String),
    /// The payload is not 32 bytes long.
    #[error("Address must be 32 bytes long, got {0}")]
    WrongLength(usize),
}

impl TryFrom<String> for AddressBech32 {
    type Error = Bech32ParseError;

    fn try_from(addr: String) -> Result<Self, Bech32ParseError> {
        AddressBech32::from_str(&addr)
    }
}

impl FromStr for AddressBech32 {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Bech32ParseError> {
        let (hrp, data) = bech32m_to_decoded_vec(s)?;

        if HRP != hrp {
            return Err(Bech32ParseError::WrongHPR(hrp));
        }

        if data.len() != 32 {
            return Err(Bech32ParseError::WrongLength(data.len()));
        }

        Ok(AddressBech32 {
            value: s.to_string(),
        })
    }
}
