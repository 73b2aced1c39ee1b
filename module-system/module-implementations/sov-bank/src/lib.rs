pub mod call;
pub mod genesis;
pub mod query;

pub use call::{BankError, CallMessage};
pub use genesis::BankConfig;
use sov_modules_api::{Error, ModuleInfo, Prefix, StateMap, WorkingSet};

/// Type alias to store an amount of the native coin.
pub type Amount = u64;

/// The sov-bank module manages native coin balances. It provides functionality for:
/// - Transfers between accounts, including module-owned accounts.
/// - Freezing an account, after which it can neither send nor receive coins.
#[derive(Clone)]
pub struct Bank<C: sov_modules_api::Context> {
    /// The address of the sov-bank module.
    pub(crate) address: C::Address,

    /// A mapping of addresses to their balance.
    pub(crate) balances: StateMap<C::Address, Amount>,

    /// Accounts that refuse every transfer, incoming or outgoing.
    pub(crate) frozen_accounts: StateMap<C::Address, bool>,
}

impl<C: sov_modules_api::Context> Default for Bank<C> {
    fn default() -> Self {
        let module_path = module_path!();
        Self {
            address: Prefix::new_module(module_path, "Bank").address::<C>(),
            balances: StateMap::new(
                Prefix::new_storage(module_path, "Bank", "balances").into(),
            ),
            frozen_accounts: StateMap::new(
                Prefix::new_storage(module_path, "Bank", "frozen_accounts").into(),
            ),
        }
    }
}

impl<C: sov_modules_api::Context> ModuleInfo for Bank<C> {
    type Context = C;

    fn address(&self) -> &C::Address {
        &self.address
    }

    fn prefix(&self) -> Prefix {
        Prefix::new_module(module_path!(), "Bank")
    }
}

impl<C: sov_modules_api::Context> sov_modules_api::Module for Bank<C> {
    type Context = C;

    type Config = BankConfig<C>;

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
    ) -> Result<sov_modules_api::CallResponse, Error> {
        match msg {
            call::CallMessage::Transfer { to, amount } => {
                Ok(self.transfer(to, amount, context, working_set)?)
            }

            call::CallMessage::Freeze => Ok(self.freeze(context, working_set)?),

            call::CallMessage::Unfreeze => Ok(self.unfreeze(context, working_set)?),
        }
    }
}
