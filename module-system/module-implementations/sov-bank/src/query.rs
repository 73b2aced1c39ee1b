//! Read-only views of the bank state.
use sov_modules_api::WorkingSet;

use crate::{Amount, Bank};

impl<C: sov_modules_api::Context> Bank<C> {
    /// Returns the balance of the account at `user_address`, `None` if it was never credited.
    pub fn get_balance_of(
        &self,
        user_address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Amount> {
        self.balances.get(user_address, working_set)
    }

    pub fn is_frozen(
        &self,
        user_address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> bool {
        self.frozen_accounts
            .get(user_address, working_set)
            .unwrap_or_default()
    }
}
