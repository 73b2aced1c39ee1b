use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sov_modules_api::WorkingSet;

use super::Voting;

/// Binds the election to its owner, the deployer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingConfig<C: sov_modules_api::Context> {
    pub owner: C::Address,
}

impl<C: sov_modules_api::Context> Voting<C> {
    pub(crate) fn init_module(
        &self,
        config: &<Self as sov_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        if self.owner.get(working_set).is_some() {
            bail!("Election is already initialized");
        }

        self.owner.set(&config.owner, working_set);
        self.is_closed.set(&false, working_set);
        self.candidates_count.set(&0, working_set);
        self.number_of_votes.set(&0, working_set);
        self.balance.set(&0, working_set);

        Ok(())
    }
}
