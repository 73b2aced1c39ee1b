use sov_bank::{Amount, BankError};
use sov_modules_api::WorkingSet;
use sov_state::StateValueError;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::types::{Candidate, Voter};
use super::Voting;

/// Call actions supported by the module.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Clone,
)]
#[serde(rename_all = "snake_case")]
pub enum CallMessage<C: sov_modules_api::Context> {
    /// Registers a candidate. Owner only.
    AddCandidate {
        name: String,
        payout_address: C::Address,
    },
    /// Casts the sender's single vote, moving `contribution` coins from the sender to the election.
    Vote {
        candidate_id: u64,
        #[serde(default)]
        contribution: Amount,
    },
    /// Closes the election and pays the pooled contributions to the winner. Owner only.
    CloseVoting,
}

/// Reasons an election operation is rejected. A rejected operation leaves the state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VotingError {
    #[error("Only the owner can trigger this action.")]
    Unauthorized,

    #[error("Voting is closed.")]
    ElectionClosed,

    #[error("Voting is already closed.")]
    ElectionAlreadyClosed,

    #[error("You have already voted.")]
    AlreadyVoted,

    #[error("Candidate {0} doesn't exist")]
    UnknownCandidate(u64),

    #[error("Candidate name must not be empty")]
    EmptyName,

    #[error("No candidates are registered")]
    NoCandidates,

    #[error("The election account cannot vote or receive the payout")]
    ElectionAccount,

    #[error("Contribution could not be collected")]
    ContributionFailed(#[source] BankError),

    #[error("Payout to the winner failed")]
    PayoutFailed(#[source] BankError),

    #[error("{0} overflow")]
    Overflow(&'static str),

    #[error("Election state is missing: {0}")]
    MissingState(String),
}

impl From<StateValueError> for VotingError {
    fn from(err: StateValueError) -> Self {
        VotingError::MissingState(err.to_string())
    }
}

impl<C: sov_modules_api::Context> Voting<C> {
    /// Registers a new candidate and returns its id. Must be called by the owner.
    pub fn add_candidate(
        &self,
        name: String,
        payout_address: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<u64, VotingError> {
        self.exit_if_not_owner(context, working_set)?;
        self.exit_if_closed(working_set)?;

        if name.is_empty() {
            return Err(VotingError::EmptyName);
        }

        if payout_address == self.address {
            return Err(VotingError::ElectionAccount);
        }

        let id = self
            .candidates_count
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(VotingError::Overflow("Candidate id"))?;

        let candidate = Candidate::<C>::new(id, name, payout_address);
        self.candidates.set(&id, &candidate, working_set);
        self.candidates_count.set(&id, working_set);

        working_set.add_event(
            "Voting: add_candidate",
            &format!("Candidate {} was added: {}", id, candidate.name),
        );
        info!(id, name = %candidate.name, payout_address = %candidate.payout_address, "Candidate added");

        Ok(id)
    }

    /// Votes for a candidate. Every sender votes once.
    ///
    /// A non-zero `contribution` is moved from the sender to the module's account before any
    /// election state is written.
    pub fn vote(
        &self,
        candidate_id: u64,
        contribution: Amount,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), VotingError> {
        self.exit_if_closed(working_set)?;

        let voter = context.sender();
        if voter == &self.address {
            return Err(VotingError::ElectionAccount);
        }

        if self.voters.contains(voter, working_set) {
            return Err(VotingError::AlreadyVoted);
        }

        let mut candidate = self
            .candidates
            .get(&candidate_id, working_set)
            .ok_or(VotingError::UnknownCandidate(candidate_id))?;

        candidate.vote_count = candidate
            .vote_count
            .checked_add(1)
            .ok_or(VotingError::Overflow("Vote count"))?;

        let number_of_votes = self
            .number_of_votes
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(VotingError::Overflow("Number of votes"))?;

        let balance = self
            .balance
            .get(working_set)
            .unwrap_or_default()
            .checked_add(contribution)
            .ok_or(VotingError::Overflow("Balance"))?;

        if contribution > 0 {
            self.bank
                .transfer_from(voter, &self.address, contribution, working_set)
                .map_err(VotingError::ContributionFailed)?;
        }

        self.voters
            .set(voter, &Voter::Voted { candidate_id }, working_set);
        self.candidates.set(&candidate_id, &candidate, working_set);
        self.number_of_votes.set(&number_of_votes, working_set);
        self.balance.set(&balance, working_set);

        working_set.add_event(
            "Voting: vote",
            &format!("Vote from: {} accepted for candidate {}", voter, candidate_id),
        );
        debug!(%voter, candidate_id, contribution, "Vote accepted");

        Ok(())
    }

    /// Closes the election, fixes the winner and pays out the pooled contributions.
    /// Must be called by the owner. Returns the id of the winner.
    ///
    /// The winner is the candidate with the most votes, the lowest id among equals. The payout is
    /// everything the election account holds.
    pub fn close_voting(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<u64, VotingError> {
        self.exit_if_not_owner(context, working_set)?;

        if self.is_closed.get_or_err(working_set)? {
            return Err(VotingError::ElectionAlreadyClosed);
        }

        let winner = self.leading_candidate(working_set)?;
        // Coins sent straight to the election account are paid out with the contributions.
        let balance = self
            .bank
            .get_balance_of(&self.address, working_set)
            .unwrap_or_default()
            .max(self.balance.get(working_set).unwrap_or_default());

        // The outcome is committed before any coins move.
        self.winning_candidate_id.set(&winner.id, working_set);
        self.is_closed.set(&true, working_set);

        if balance > 0 {
            if let Err(err) =
                self.bank
                    .transfer_from(&self.address, &winner.payout_address, balance, working_set)
            {
                self.winning_candidate_id.delete(working_set);
                self.is_closed.set(&false, working_set);
                warn!(winner = winner.id, balance, %err, "Payout failed, election stays open");
                return Err(VotingError::PayoutFailed(err));
            }
        }

        self.balance.set(&0, working_set);

        working_set.add_event(
            "Voting: close_voting",
            &format!(
                "Candidate {} won with {} votes, paid {}",
                winner.id, winner.vote_count, balance
            ),
        );
        info!(
            winner = winner.id,
            votes = winner.vote_count,
            payout = balance,
            "Election closed"
        );

        Ok(winner.id)
    }

    /// Scans the candidates in id order, keeping the first one with the highest count.
    pub(crate) fn leading_candidate(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Candidate<C>, VotingError> {
        let candidates_count = self.candidates_count.get(working_set).unwrap_or_default();

        let mut leader: Option<Candidate<C>> = None;
        for id in 1..=candidates_count {
            let candidate = self
                .candidates
                .get(&id, working_set)
                .ok_or_else(|| VotingError::MissingState(format!("candidate {id}")))?;

            let leads = leader
                .as_ref()
                .map_or(true, |current| candidate.vote_count > current.vote_count);
            if leads {
                leader = Some(candidate);
            }
        }

        leader.ok_or(VotingError::NoCandidates)
    }

    fn exit_if_not_owner(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), VotingError> {
        let owner = self.owner.get_or_err(working_set)?;

        if &owner != context.sender() {
            return Err(VotingError::Unauthorized);
        }
        Ok(())
    }

    fn exit_if_closed(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<(), VotingError> {
        if self.is_closed.get_or_err(working_set)? {
            return Err(VotingError::ElectionClosed);
        }
        Ok(())
    }
}
