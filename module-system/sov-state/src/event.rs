use serde::{Deserialize, Serialize};

/// A key-value pair emitted by a module while executing a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    key: String,
    value: String,
}

impl Event {
    /// Creates an event.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    /// The event key, conventionally `"<Module>: <method>"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human readable payload.
    pub fn value(&self) -> &str {
        &self.value
    }
}
