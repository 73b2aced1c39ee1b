/// Response type for the `Module::call` method.
///
/// Events are recorded on the working set; the response itself carries no data.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CallResponse {}
