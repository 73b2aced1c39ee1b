use sov_voting_cli::clap::{self, Parser};
use sov_voting_cli::init_logging;
use sov_voting_cli::workflows::{AddressWorkflow, RunWorkflow};
use tracing_subscriber::filter::LevelFilter;

#[derive(clap::Subcommand)]
pub enum Workflows {
    Run(RunWorkflow),
    Address(AddressWorkflow),
}

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
/// Run a single election from JSON files
pub struct App {
    /// Log level used when RUST_LOG is not set
    #[clap(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
    #[clap(subcommand)]
    workflow: Workflows,
}

fn main() -> Result<(), anyhow::Error> {
    let invocation = App::parse();
    init_logging(invocation.log_level)?;

    match invocation.workflow {
        Workflows::Run(workflow) => {
            let report = workflow.run()?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Workflows::Address(workflow) => println!("{}", workflow.run()),
    }

    Ok(())
}
