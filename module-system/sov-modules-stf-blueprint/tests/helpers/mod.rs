use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::Address;
use sov_modules_stf_blueprint::{AppRunner, GenesisConfig, RuntimeCall};
use sov_state::InMemoryStorage;

pub type C = DefaultContext;

pub fn address(name: &str) -> Address {
    generate_address::<C>(name)
}

/// A runner whose election is owned by `owner` and whose accounts hold the given balances.
pub fn init_runner(funded: &[(&str, u64)]) -> AppRunner<C> {
    let genesis: GenesisConfig<C> = serde_json::from_value(serde_json::json!({
        "bank": {
            "address_and_balances": funded
                .iter()
                .map(|(name, amount)| (address(name).to_string(), *amount))
                .collect::<Vec<_>>(),
        },
        "voting": { "owner": address("owner").to_string() },
    }))
    .unwrap();

    let runner = AppRunner::<C>::new(InMemoryStorage::new());
    runner.init_chain(&genesis).unwrap();
    runner
}

pub fn add_candidate(name: &str, payout: &str) -> RuntimeCall<C> {
    RuntimeCall::Voting(sov_voting::CallMessage::AddCandidate {
        name: name.to_owned(),
        payout_address: address(payout),
    })
}

pub fn vote(candidate_id: u64, contribution: u64) -> RuntimeCall<C> {
    RuntimeCall::Voting(sov_voting::CallMessage::Vote {
        candidate_id,
        contribution,
    })
}

#[allow(dead_code)]
pub fn close_voting() -> RuntimeCall<C> {
    RuntimeCall::Voting(sov_voting::CallMessage::CloseVoting)
}
