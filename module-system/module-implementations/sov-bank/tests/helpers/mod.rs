use sov_bank::{Amount, BankConfig};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::{Address, WorkingSet};
use sov_state::InMemoryStorage;

pub type C = DefaultContext;

pub fn new_working_set() -> WorkingSet<InMemoryStorage> {
    WorkingSet::new(InMemoryStorage::new())
}

#[allow(dead_code)]
pub fn create_bank_config(addresses_count: usize, initial_balance: Amount) -> BankConfig<C> {
    let address_and_balances = (0..addresses_count)
        .map(|i| {
            let key = format!("key_{}", i);
            let addr: Address = generate_address::<C>(&key);
            (addr, initial_balance)
        })
        .collect();

    BankConfig {
        address_and_balances,
    }
}
