use std::collections::HashSet;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sov_modules_api::WorkingSet;

use crate::{Amount, Bank};

/// Initial configuration for sov-bank module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig<C: sov_modules_api::Context> {
    /// Accounts funded at genesis. Each address may appear once.
    pub address_and_balances: Vec<(C::Address, Amount)>,
}

impl<C: sov_modules_api::Context> Bank<C> {
    pub(crate) fn init_module(
        &self,
        config: &<Self as sov_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for (address, balance) in config.address_and_balances.iter() {
            if !seen.insert(address) {
                bail!("Address {} is funded more than once at genesis", address);
            }
            self.balances.set(address, balance, working_set);
        }
        Ok(())
    }
}
