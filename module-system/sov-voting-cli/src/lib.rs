pub mod workflows;

use anyhow::Context;
pub use clap;
use serde::{Deserialize, Serialize};
use sov_modules_stf_blueprint::TxReceipt;
use sov_voting::ElectionSummary;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// The context every workflow runs with.
pub type Ctx = sov_modules_api::default_context::DefaultContext;

/// Printed by the `run` workflow.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Report<C: sov_modules_api::Context> {
    pub receipts: Vec<TxReceipt>,
    pub summary: ElectionSummary<C>,
}

/// Installs the global subscriber. Logs go to stderr so stdout stays machine readable.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(default_level: LevelFilter) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global default subscriber")
}
