//! Read-only views of the election. None of them write to the working set.
use serde::{Deserialize, Serialize};
use sov_bank::Amount;
use sov_modules_api::WorkingSet;

use super::call::VotingError;
use super::types::Candidate;
use super::Voting;

/// A full snapshot of the election state.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ElectionSummary<C: sov_modules_api::Context> {
    pub owner: Option<C::Address>,
    pub is_closed: bool,
    pub candidates: Vec<Candidate<C>>,
    pub number_of_votes: u64,
    pub balance: Amount,
    pub winning_candidate_id: Option<u64>,
}

impl<C: sov_modules_api::Context> Voting<C> {
    pub fn get_candidate(
        &self,
        candidate_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Candidate<C>, VotingError> {
        self.candidates
            .get(&candidate_id, working_set)
            .ok_or(VotingError::UnknownCandidate(candidate_id))
    }

    /// Coins currently held by the election.
    pub fn get_contract_balance(&self, working_set: &mut WorkingSet<C::Storage>) -> Amount {
        self.balance.get(working_set).unwrap_or_default()
    }

    pub fn owner(&self, working_set: &mut WorkingSet<C::Storage>) -> Option<C::Address> {
        self.owner.get(working_set)
    }

    /// `None` until the election is closed.
    pub fn winning_candidate_id(&self, working_set: &mut WorkingSet<C::Storage>) -> Option<u64> {
        self.winning_candidate_id.get(working_set)
    }

    pub fn is_closed(&self, working_set: &mut WorkingSet<C::Storage>) -> bool {
        self.is_closed.get(working_set).unwrap_or_default()
    }

    pub fn number_of_votes(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.number_of_votes.get(working_set).unwrap_or_default()
    }

    pub fn has_voted(&self, voter: &C::Address, working_set: &mut WorkingSet<C::Storage>) -> bool {
        self.voters.contains(voter, working_set)
    }

    /// Every candidate, in id order.
    pub fn candidates(&self, working_set: &mut WorkingSet<C::Storage>) -> Vec<Candidate<C>> {
        let candidates_count = self.candidates_count.get(working_set).unwrap_or_default();
        (1..=candidates_count)
            .filter_map(|id| self.candidates.get(&id, working_set))
            .collect()
    }

    pub fn election_summary(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> ElectionSummary<C> {
        ElectionSummary {
            owner: self.owner(working_set),
            is_closed: self.is_closed(working_set),
            candidates: self.candidates(working_set),
            number_of_votes: self.number_of_votes(working_set),
            balance: self.get_contract_balance(working_set),
            winning_candidate_id: self.winning_candidate_id(working_set),
        }
    }
}
