pub mod call;
pub mod genesis;
pub mod query;

#[cfg(test)]
mod tests;

mod types;

pub use call::{CallMessage, VotingError};
pub use genesis::VotingConfig;
pub use query::ElectionSummary;
use sov_bank::Amount;
use sov_modules_api::{CallResponse, Error, ModuleInfo, Prefix, StateMap, StateValue, WorkingSet};
pub use types::{Candidate, Voter};

/// The voting module runs one election:
/// - The owner, fixed at genesis, registers candidates while the election is open.
/// - Every other account votes once, optionally moving a contribution into the module's account.
/// - The owner closes the election. The candidate with the most votes receives every contribution.
#[derive(Clone)]
pub struct Voting<C: sov_modules_api::Context> {
    /// The address of the voting module. Contributions are held here until the election closes.
    pub address: C::Address,

    pub(crate) owner: StateValue<C::Address>,

    pub(crate) is_closed: StateValue<bool>,

    /// Candidates are keyed by a dense id starting at 1, `candidates_count` holds the last id.
    pub(crate) candidates: StateMap<u64, Candidate<C>>,

    pub(crate) candidates_count: StateValue<u64>,

    pub(crate) voters: StateMap<C::Address, Voter>,

    pub(crate) number_of_votes: StateValue<u64>,

    /// Mirrors the bank balance of `address`.
    pub(crate) balance: StateValue<Amount>,

    pub(crate) winning_candidate_id: StateValue<u64>,

    pub(crate) bank: sov_bank::Bank<C>,
}

impl<C: sov_modules_api::Context> Default for Voting<C> {
    fn default() -> Self {
        let module_path = module_path!();
        let storage = |name: &'static str| -> sov_state::Prefix {
            Prefix::new_storage(module_path, "Voting", name).into()
        };

        Self {
            address: Prefix::new_module(module_path, "Voting").address::<C>(),
            owner: StateValue::new(storage("owner")),
            is_closed: StateValue::new(storage("is_closed")),
            candidates: StateMap::new(storage("candidates")),
            candidates_count: StateValue::new(storage("candidates_count")),
            voters: StateMap::new(storage("voters")),
            number_of_votes: StateValue::new(storage("number_of_votes")),
            balance: StateValue::new(storage("balance")),
            winning_candidate_id: StateValue::new(storage("winning_candidate_id")),
            bank: sov_bank::Bank::default(),
        }
    }
}

impl<C: sov_modules_api::Context> ModuleInfo for Voting<C> {
    type Context = C;

    fn address(&self) -> &C::Address {
        &self.address
    }

    fn prefix(&self) -> Prefix {
        Prefix::new_module(module_path!(), "Voting")
    }
}

impl<C: sov_modules_api::Context> sov_modules_api::Module for Voting<C> {
    type Context = C;

    type Config = VotingConfig<C>;

    type CallMessage = call::CallMessage<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        match msg {
            CallMessage::AddCandidate {
                name,
                payout_address,
            } => {
                self.add_candidate(name, payout_address, context, working_set)
                    .map_err(anyhow::Error::from)?;
            }

            CallMessage::Vote {
                candidate_id,
                contribution,
            } => {
                self.vote(candidate_id, contribution, context, working_set)
                    .map_err(anyhow::Error::from)?;
            }

            CallMessage::CloseVoting => {
                self.close_voting(context, working_set)
                    .map_err(anyhow::Error::from)?;
            }
        }

        Ok(CallResponse::default())
    }
}
