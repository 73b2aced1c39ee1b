use sov_modules_api::utils::generate_address;
use sov_modules_api::Spec;

use crate::Ctx;

#[derive(clap::Args, Debug)]
/// Print the deterministic address derived from a seed
pub struct AddressWorkflow {
    /// Any string. The same seed always yields the same address.
    pub seed: String,
}

impl AddressWorkflow {
    pub fn run(&self) -> <Ctx as Spec>::Address {
        generate_address::<Ctx>(&self.seed)
    }
}
