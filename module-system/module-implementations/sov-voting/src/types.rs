use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A registered option voters can choose.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Candidate<C: sov_modules_api::Context> {
    pub id: u64,
    pub name: String,
    /// Receives the pooled contributions if this candidate wins.
    pub payout_address: C::Address,
    pub vote_count: u64,
}

impl<C: sov_modules_api::Context> Candidate<C> {
    pub fn new(id: u64, name: String, payout_address: C::Address) -> Self {
        Self {
            id,
            name,
            payout_address,
            vote_count: 0,
        }
    }
}

#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Voter {
    Voted { candidate_id: u64 },
}
