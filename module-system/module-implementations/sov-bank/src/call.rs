use anyhow::Result;
use sov_modules_api::{CallResponse, WorkingSet};
use thiserror::Error;
use tracing::debug;

use crate::{Amount, Bank};

/// This enumeration represents the available call messages for interacting with the sov-bank module.
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
    /// Transfers a specified amount of coins to the specified address.
    Transfer {
        /// The address to which the coins will be transferred.
        to: C::Address,
        /// The amount of coins to transfer.
        amount: Amount,
    },

    /// Freezes the sender's account.
    Freeze,

    /// Lifts a freeze placed by the sender on their own account.
    Unfreeze,
}

/// Reasons a bank operation is rejected. A rejected operation writes nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("Insufficient funds for {address}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        address: String,
        balance: Amount,
        requested: Amount,
    },

    #[error("Account {0} is frozen")]
    AccountFrozen(String),

    #[error("Account balance overflow for {0}")]
    BalanceOverflow(String),

    #[error("Account {0} is already frozen")]
    AlreadyFrozen(String),

    #[error("Account {0} is not frozen")]
    NotFrozen(String),
}

impl<C: sov_modules_api::Context> Bank<C> {
    pub fn transfer(
        &self,
        to: C::Address,
        amount: Amount,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.transfer_from(context.sender(), &to, amount, working_set)?;
        Ok(CallResponse::default())
    }

    pub(crate) fn freeze(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let account = context.sender();
        if self.is_frozen(account, working_set) {
            Err(BankError::AlreadyFrozen(account.to_string()))?;
        }

        self.frozen_accounts.set(account, &true, working_set);
        debug!(%account, "Account frozen");
        Ok(CallResponse::default())
    }

    pub(crate) fn unfreeze(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let account = context.sender();
        if !self.is_frozen(account, working_set) {
            Err(BankError::NotFrozen(account.to_string()))?;
        }

        self.frozen_accounts.delete(account, working_set);
        debug!(%account, "Account unfrozen");
        Ok(CallResponse::default())
    }
}

impl<C: sov_modules_api::Context> Bank<C> {
    /// Moves `amount` coins from `from` to `to`.
    ///
    /// Every check runs before the first write, so an error leaves both balances untouched.
    /// Moving coins from an account to itself changes nothing, but still requires the funds.
    pub fn transfer_from(
        &self,
        from: &C::Address,
        to: &C::Address,
        amount: Amount,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), BankError> {
        for account in [from, to] {
            if self.is_frozen(account, working_set) {
                return Err(BankError::AccountFrozen(account.to_string()));
            }
        }

        let from_balance = self.balances.get(from, working_set).unwrap_or_default();
        let new_from_balance =
            from_balance
                .checked_sub(amount)
                .ok_or_else(|| BankError::InsufficientFunds {
                    address: from.to_string(),
                    balance: from_balance,
                    requested: amount,
                })?;

        if from == to {
            return Ok(());
        }

        let new_to_balance = self
            .balances
            .get(to, working_set)
            .unwrap_or_default()
            .checked_add(amount)
            .ok_or_else(|| BankError::BalanceOverflow(to.to_string()))?;

        self.balances.set(from, &new_from_balance, working_set);
        self.balances.set(to, &new_to_balance, working_set);

        debug!(%from, %to, amount, "Coins transferred");
        Ok(())
    }
}
