use std::sync::{PoisonError, RwLock};

use sov_modules_api::{Context, Error, Event, Storage, WorkingSet};
use tracing::{debug, error, info};

use crate::{
    Batch, GenesisConfig, Runtime, RuntimeCall, RunnerError, Transaction, TxEffect, TxReceipt,
};

/// Applies transactions to the storage one at a time.
///
/// A transaction holds the write lock from dispatch until its writes are committed, so
/// transactions never interleave. Queries hold the read lock and never observe a transaction
/// halfway through.
pub struct AppRunner<C: Context> {
    runtime: Runtime<C>,
    storage: RwLock<C::Storage>,
}

impl<C: Context> AppRunner<C> {
    /// Creates a runner on top of `storage`.
    pub fn new(storage: C::Storage) -> Self {
        Self {
            runtime: Runtime::default(),
            storage: RwLock::new(storage),
        }
    }

    /// The modules driven by this runner.
    pub fn runtime(&self) -> &Runtime<C> {
        &self.runtime
    }

    /// Runs the genesis of every module and commits the result. Nothing is written if any module
    /// rejects its configuration.
    pub fn init_chain(&self, genesis: &GenesisConfig<C>) -> Result<(), Error> {
        let storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        let mut working_set = WorkingSet::new(storage.clone());

        if let Err(e) = self.runtime.genesis(genesis, &mut working_set) {
            error!("Genesis failed: {}", e);
            working_set.revert();
            return Err(e);
        }

        let mut checkpoint = working_set.checkpoint();
        storage.commit(&checkpoint.freeze())?;
        info!("Genesis committed");
        Ok(())
    }

    /// Applies a single call as `sender`.
    ///
    /// On error every write of the call is discarded and the module error is returned. Calls sent
    /// as a module account are refused with [`RunnerError::ModuleSender`].
    pub fn apply_tx(&self, sender: C::Address, call: RuntimeCall<C>) -> Result<TxReceipt, Error> {
        let tx = Transaction::<C>::new(sender, call);
        let tx_hash = hex::encode(tx.hash());
        let events = self.execute(tx, &tx_hash)?;

        Ok(TxReceipt {
            tx_hash,
            effect: TxEffect::Successful,
            events,
        })
    }

    /// Applies the transactions in order. A failing transaction is reverted and does not stop
    /// the batch.
    pub fn apply_batch(&self, batch: Batch<C>) -> Vec<TxReceipt> {
        info!("Applying batch of {} transaction(s)", batch.txs.len());

        let mut tx_receipts = Vec::with_capacity(batch.txs.len());
        for (i, tx) in batch.txs.into_iter().enumerate() {
            let tx_hash = hex::encode(tx.hash());
            let receipt = match self.execute(tx, &tx_hash) {
                Ok(events) => TxReceipt {
                    tx_hash,
                    effect: TxEffect::Successful,
                    events,
                },
                Err(e) => TxReceipt {
                    tx_hash,
                    effect: TxEffect::Reverted(e.to_string()),
                    events: Vec::new(),
                },
            };
            info!("tx #{} hash: 0x{} result {:?}", i, receipt.tx_hash, receipt.effect);
            tx_receipts.push(receipt);
        }

        tx_receipts
    }

    /// Evaluates `f` against the committed state. Writes made by `f` are discarded.
    pub fn query<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Runtime<C>, &mut WorkingSet<C::Storage>) -> T,
    {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        let mut working_set = WorkingSet::new(storage.clone());
        f(&self.runtime, &mut working_set)
    }

    fn execute(&self, tx: Transaction<C>, tx_hash: &str) -> Result<Vec<Event>, Error> {
        if self.runtime.is_module_account(&tx.sender) {
            error!("Tx 0x{} was rejected: sent as module account {}", tx_hash, tx.sender);
            let err = RunnerError::ModuleSender(tx.sender.to_string());
            return Err(anyhow::Error::from(err).into());
        }

        let storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);

        let context = C::new(tx.sender);
        let mut working_set = WorkingSet::new(storage.clone());

        match self
            .runtime
            .dispatch_call(tx.call, &context, &mut working_set)
        {
            Ok(_) => {
                let events = working_set.take_events();
                let mut checkpoint = working_set.checkpoint();
                storage.commit(&checkpoint.freeze())?;
                debug!("Tx 0x{} committed with {} event(s)", tx_hash, events.len());
                Ok(events)
            }
            Err(e) => {
                // The transaction causing invalid state transition is reverted.
                error!("Tx 0x{} was reverted error: {}", tx_hash, e);
                working_set.revert();
                Err(e)
            }
        }
    }
}
