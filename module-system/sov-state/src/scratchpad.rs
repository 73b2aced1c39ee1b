use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

use crate::codec::{StateKeyCodec, StateValueCodec};
use crate::storage::{StorageKey, StorageValue};
use crate::{Event, Prefix, Storage};

/// Accumulates committed writes on top of the underlying storage.
struct Delta<S: Storage> {
    inner: S,
    writes: BTreeMap<StorageKey, Option<StorageValue>>,
}

/// A wrapper that adds additional writes on top of an underlying Delta.
/// These are handy for implementing operations that might revert on top of an existing
/// working set, without running the risk that the whole working set will be discarded if some particular
/// operation reverts.
struct RevertableDelta<S: Storage> {
    /// The inner (non-revertable) delta
    inner: Delta<S>,
    /// A cache containing the most recent values written. Reads are first checked
    /// against this map, and if the key is not present, the underlying Delta is checked.
    writes: HashMap<StorageKey, Option<StorageValue>>,
}

impl<S: Storage> Debug for RevertableDelta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevertableDelta")
            .field("pending_writes", &self.writes.len())
            .field("committed_writes", &self.inner.writes.len())
            .finish()
    }
}

/// The writes of a [`StateCheckpoint`] in key order, ready to be handed to [`Storage::commit`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderedWrites {
    /// Each key with its new value, or `None` if the key was deleted.
    pub ordered_writes: Vec<(StorageKey, Option<StorageValue>)>,
}

impl OrderedWrites {
    /// Returns `true` if there is nothing to commit.
    pub fn is_empty(&self) -> bool {
        self.ordered_writes.is_empty()
    }
}

/// This structure is responsible for storing the `write` set
/// and is obtained from the `WorkingSet` by using either the `checkpoint` or `revert` method.
pub struct StateCheckpoint<S: Storage> {
    delta: Delta<S>,
}

impl<S: Storage> StateCheckpoint<S> {
    /// Creates a checkpoint with no writes on top of `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            delta: Delta::new(inner),
        }
    }

    /// Opens a new revertable layer on top of this checkpoint.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            delta: self.delta.get_revertable_wrapper(),
            events: Default::default(),
        }
    }

    /// Takes every write accumulated so far, leaving the checkpoint empty.
    pub fn freeze(&mut self) -> OrderedWrites {
        OrderedWrites {
            ordered_writes: std::mem::take(&mut self.delta.writes).into_iter().collect(),
        }
    }

    /// The storage this checkpoint reads from.
    pub fn backing(&self) -> &S {
        &self.delta.inner
    }
}

/// This structure contains the write set and the events collected during the execution of a transaction.
/// There are two ways to convert it into a StateCheckpoint:
/// 1. By using the checkpoint() method, where all the changes are added to the underlying StateCheckpoint.
/// 2. By using the revert method, where the most recent changes are reverted and the previous `StateCheckpoint` is returned.
pub struct WorkingSet<S: Storage> {
    delta: RevertableDelta<S>,
    events: Vec<Event>,
}

impl<S: Storage> Debug for WorkingSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingSet")
            .field("delta", &self.delta)
            .field("events", &self.events)
            .finish()
    }
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a working set with no writes on top of `inner`.
    pub fn new(inner: S) -> Self {
        StateCheckpoint::new(inner).to_revertable()
    }

    /// Keeps the pending writes. Events are dropped, take them first.
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.commit(),
        }
    }

    /// Discards the pending writes.
    pub fn revert(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.revert(),
        }
    }

    pub(crate) fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        self.delta.get(key)
    }

    pub(crate) fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.delta.set(key, value)
    }

    pub(crate) fn delete(&mut self, key: StorageKey) {
        self.delta.delete(key)
    }

    /// Records an event.
    pub fn add_event(&mut self, key: &str, value: &str) {
        self.events.push(Event::new(key, value));
    }

    /// Takes every event recorded so far.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The storage this working set reads from.
    pub fn backing(&self) -> &S {
        &self.delta.inner.inner
    }
}

impl<S: Storage> WorkingSet<S> {
    pub(crate) fn set_value<K, V, C>(&mut self, prefix: &Prefix, codec: &C, key: &K, value: &V)
    where
        C: StateKeyCodec<K> + StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        let storage_value = StorageValue::new(value, codec);
        self.set(storage_key, storage_value);
    }

    pub(crate) fn get_value<K, V, C>(&mut self, prefix: &Prefix, codec: &C, key: &K) -> Option<V>
    where
        C: StateKeyCodec<K> + StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        self.get_decoded(&storage_key, codec)
    }

    pub(crate) fn remove_value<K, V, C>(
        &mut self,
        prefix: &Prefix,
        codec: &C,
        key: &K,
    ) -> Option<V>
    where
        C: StateKeyCodec<K> + StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        let value = self.get_decoded(&storage_key, codec)?;
        self.delete(storage_key);
        Some(value)
    }

    pub(crate) fn delete_value<K, C>(&mut self, prefix: &Prefix, codec: &C, key: &K)
    where
        C: StateKeyCodec<K>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        self.delete(storage_key);
    }

    pub(crate) fn set_singleton<V, C>(&mut self, prefix: &Prefix, codec: &C, value: &V)
    where
        C: StateValueCodec<V>,
    {
        let storage_value = StorageValue::new(value, codec);
        self.set(StorageKey::singleton(prefix), storage_value);
    }

    pub(crate) fn get_singleton<V, C>(&mut self, prefix: &Prefix, codec: &C) -> Option<V>
    where
        C: StateValueCodec<V>,
    {
        self.get_decoded(&StorageKey::singleton(prefix), codec)
    }

    pub(crate) fn delete_singleton(&mut self, prefix: &Prefix) {
        self.delete(StorageKey::singleton(prefix));
    }

    fn get_decoded<V, C>(&mut self, storage_key: &StorageKey, codec: &C) -> Option<V>
    where
        C: StateValueCodec<V>,
    {
        let storage_value = self.get(storage_key)?;
        // It is ok to panic here. Deserialization problem means that something is terribly wrong.
        Some(codec.decode_value(storage_value.value()))
    }
}

impl<S: Storage> RevertableDelta<S> {
    fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        if let Some(value) = self.writes.get(key) {
            return value.clone();
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: StorageKey) {
        self.writes.insert(key, None);
    }

    fn commit(self) -> Delta<S> {
        let mut inner = self.inner;
        inner.writes.extend(self.writes);
        inner
    }

    fn revert(self) -> Delta<S> {
        self.inner
    }
}

impl<S: Storage> Delta<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            writes: Default::default(),
        }
    }

    fn get_revertable_wrapper(self) -> RevertableDelta<S> {
        RevertableDelta {
            inner: self,
            writes: Default::default(),
        }
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match self.writes.get(key) {
            Some(value) => value.clone(),
            None => self.inner.get(key),
        }
    }
}
