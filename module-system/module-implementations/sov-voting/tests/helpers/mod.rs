use sov_bank::{Amount, Bank, BankConfig};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::{Address, Context, Module, WorkingSet};
use sov_state::InMemoryStorage;
use sov_voting::{Voting, VotingConfig};

pub type C = DefaultContext;

pub struct Election {
    pub voting: Voting<C>,
    pub bank: Bank<C>,
    pub owner: C,
    pub working_set: WorkingSet<InMemoryStorage>,
}

pub fn address(name: &str) -> Address {
    generate_address::<C>(name)
}

/// Deploys the bank with the given balances and an election owned by `owner`.
pub fn deploy(funded: &[(&str, Amount)]) -> Election {
    let mut working_set = WorkingSet::new(InMemoryStorage::new());

    let bank = Bank::<C>::default();
    let bank_config = BankConfig {
        address_and_balances: funded
            .iter()
            .map(|(name, amount)| (address(name), *amount))
            .collect(),
    };
    bank.genesis(&bank_config, &mut working_set).unwrap();

    let owner = address("owner");
    let voting = Voting::<C>::default();
    voting
        .genesis(&VotingConfig { owner }, &mut working_set)
        .unwrap();

    Election {
        voting,
        bank,
        owner: C::new(owner),
        working_set,
    }
}

#[allow(dead_code)]
pub fn context(name: &str) -> C {
    C::new(address(name))
}
