use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::scratchpad::OrderedWrites;
use crate::storage::{Storage, StorageKey, StorageValue};

/// A [`Storage`] that keeps the whole state in an ordered in-memory map.
///
/// Clones share the same map. A batch passed to [`Storage::commit`] is applied while holding
/// the write lock, so readers see either none or all of it.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    db: Arc<RwLock<BTreeMap<StorageKey, StorageValue>>>,
}

impl InMemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.db.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl std::fmt::Debug for InMemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStorage")
            .field("keys", &self.len())
            .finish()
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn commit(&self, writes: &OrderedWrites) -> anyhow::Result<()> {
        let mut db = self.db.write().unwrap_or_else(PoisonError::into_inner);

        for (key, value) in writes.ordered_writes.iter() {
            match value {
                Some(value) => {
                    db.insert(key.clone(), value.clone());
                }
                None => {
                    db.remove(key);
                }
            }
        }

        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
