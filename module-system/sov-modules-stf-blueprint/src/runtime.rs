use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sov_bank::{Bank, BankConfig};
use sov_modules_api::{CallResponse, Context, Error, Module, ModuleInfo, WorkingSet};
use sov_voting::{Voting, VotingConfig};

/// Every module of the application.
#[derive(Clone)]
pub struct Runtime<C: Context> {
    /// Holds balances, moves contributions and payouts.
    pub bank: Bank<C>,
    /// The election.
    pub voting: Voting<C>,
}

impl<C: Context> Default for Runtime<C> {
    fn default() -> Self {
        Self {
            bank: Bank::default(),
            voting: Voting::default(),
        }
    }
}

/// A call to one of the modules of the [`Runtime`].
#[derive(Debug, PartialEq, Clone, BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", bound = "")]
pub enum RuntimeCall<C: Context> {
    /// A bank call.
    Bank(sov_bank::CallMessage<C>),
    /// A voting call.
    Voting(sov_voting::CallMessage<C>),
}

/// Genesis configuration of every module.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GenesisConfig<C: Context> {
    /// Initial balances.
    pub bank: BankConfig<C>,
    /// The election owner.
    pub voting: VotingConfig<C>,
}

impl<C: Context> Runtime<C> {
    /// Runs the genesis of every module, bank first.
    pub fn genesis(
        &self,
        config: &GenesisConfig<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        self.bank.genesis(&config.bank, working_set)?;
        self.voting.genesis(&config.voting, working_set)?;
        Ok(())
    }

    /// Returns `true` if `address` is the account of one of the modules.
    pub fn is_module_account(&self, address: &C::Address) -> bool {
        address == self.bank.address() || address == self.voting.address()
    }

    /// Routes a call to its module.
    pub fn dispatch_call(
        &self,
        call: RuntimeCall<C>,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        match call {
            RuntimeCall::Bank(msg) => self.bank.call(msg, context, working_set),
            RuntimeCall::Voting(msg) => self.voting.call(msg, context, working_set),
        }
    }
}
