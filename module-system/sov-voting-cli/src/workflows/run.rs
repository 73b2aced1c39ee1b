use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use sov_modules_stf_blueprint::{AppRunner, Batch, GenesisConfig};
use sov_state::InMemoryStorage;
use tracing::info;

use crate::{Ctx, Report};

#[derive(clap::Args, Debug)]
/// Apply a batch of transactions on top of a fresh genesis state
pub struct RunWorkflow {
    /// JSON genesis configuration: `{ "bank": {..}, "voting": { "owner": .. } }`
    #[clap(short, long)]
    pub genesis: PathBuf,
    /// JSON array of transactions: `[{ "sender": "sov1..", "call": {..} }]`
    #[clap(short, long)]
    pub txs: PathBuf,
}

impl RunWorkflow {
    /// Fails only if an input cannot be read or genesis is rejected. Failing transactions are
    /// reported as reverted receipts.
    pub fn run(&self) -> anyhow::Result<Report<Ctx>> {
        info!("Reading genesis configuration from {:?}", self.genesis);
        let genesis: GenesisConfig<Ctx> =
            read_json(&self.genesis).context("Failed to read genesis configuration")?;

        info!("Reading transactions from {:?}", self.txs);
        let batch: Batch<Ctx> = read_json(&self.txs).context("Failed to read transactions")?;

        let runner = AppRunner::<Ctx>::new(InMemoryStorage::new());
        runner
            .init_chain(&genesis)
            .context("Genesis was rejected")?;

        let receipts = runner.apply_batch(batch);
        let summary =
            runner.query(|runtime, working_set| runtime.voting.election_summary(working_set));

        Ok(Report { receipts, summary })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&contents)?)
}
