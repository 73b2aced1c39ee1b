//! The subcommands of the voting CLI.
pub mod address;
pub mod run;

pub use address::AddressWorkflow;
pub use run::RunWorkflow;
