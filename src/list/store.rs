use super::{ListEntry, ListError};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// What happens to a key once its list has been drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyListPolicy {
    /// Keep the key; it reports a length of zero and pops fail with `Empty`.
    #[default]
    Retain,
    /// Drop the key as soon as an operation leaves its list empty.
    Reclaim,
}

/// Caller-owned mapping from key to list.
///
/// Not internally synchronized: mutating calls take `&mut self`. See
/// [`SharedListStore`](super::SharedListStore) for a version that can be
/// shared between tasks.
#[derive(Debug, Default)]
pub struct ListStore {
    lists: HashMap<String, ListEntry>,
    policy: EmptyListPolicy,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: EmptyListPolicy) -> Self {
        Self {
            lists: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> EmptyListPolicy {
        self.policy
    }

    /// Append items to the tail of `key`, creating the list if needed.
    /// Returns the new length.
    pub fn rpush<I, V>(&mut self, key: &str, items: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Bytes>,
    {
        self.entry_or_create(key).push_back(items)
    }

    /// Insert items at the head of `key` one by one, creating the list if
    /// needed. Returns the new length.
    pub fn lpush<I, V>(&mut self, key: &str, items: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Bytes>,
    {
        self.entry_or_create(key).push_front(items)
    }

    pub fn lpop(&mut self, key: &str) -> Result<Bytes, ListError> {
        self.modify(key, |entry| {
            entry.pop_front().ok_or_else(|| ListError::Empty(key.to_string()))
        })
    }

    pub fn rpop(&mut self, key: &str) -> Result<Bytes, ListError> {
        self.modify(key, |entry| {
            entry.pop_back().ok_or_else(|| ListError::Empty(key.to_string()))
        })
    }

    /// Return the head of `key` without removing it.
    pub fn lpeek(&self, key: &str) -> Result<Bytes, ListError> {
        let entry = self.lookup(key)?;
        entry
            .front()
            .cloned()
            .ok_or_else(|| ListError::Empty(key.to_string()))
    }

    /// Return the tail of `key` without removing it.
    pub fn rpeek(&self, key: &str) -> Result<Bytes, ListError> {
        let entry = self.lookup(key)?;
        entry
            .back()
            .cloned()
            .ok_or_else(|| ListError::Empty(key.to_string()))
    }

    pub fn size(&self, key: &str) -> Result<usize, ListError> {
        Ok(self.lookup(key)?.len())
    }

    pub fn is_empty(&self, key: &str) -> Result<bool, ListError> {
        Ok(self.lookup(key)?.is_empty())
    }

    /// Copy of the inclusive range `[start, end]`; negative indices count
    /// from the tail and an `end` past the tail is clamped.
    pub fn lrange(&self, key: &str, start: i64, end: i64) -> Result<Vec<Bytes>, ListError> {
        self.lookup(key)?.range(start, end)
    }

    /// Element at `index`; negative indices count from the tail.
    pub fn lindex(&self, key: &str, index: i64) -> Result<Bytes, ListError> {
        self.lookup(key)?.get(index).cloned()
    }

    /// Remove up to `|count|` items equal to `value`, scanning from the head
    /// when `count > 0`, from the tail when `count < 0`, and removing all
    /// matches when `count == 0`. Returns the number removed.
    pub fn lrem(&mut self, key: &str, count: i64, value: &[u8]) -> Result<usize, ListError> {
        self.modify(key, |entry| Ok(entry.remove(count, value)))
    }

    /// Overwrite the item at a non-negative `index`.
    pub fn lset(&mut self, key: &str, index: i64, value: impl Into<Bytes>) -> Result<(), ListError> {
        let value = value.into();
        self.modify(key, |entry| entry.set(index, value))
    }

    /// Keep only the range LRANGE would return for the same bounds.
    /// Returns how many items were dropped.
    pub fn ltrim(&mut self, key: &str, start: i64, end: i64) -> Result<usize, ListError> {
        self.modify(key, |entry| entry.trim(start, end))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.lists.contains_key(key)
    }

    /// Remove `key` entirely. Returns true if it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.lists.remove(key).is_some()
    }

    pub fn keys_count(&self) -> usize {
        self.lists.len()
    }

    pub fn flush(&mut self) {
        self.lists.clear();
    }

    fn lookup(&self, key: &str) -> Result<&ListEntry, ListError> {
        self.lists
            .get(key)
            .ok_or_else(|| ListError::NotFound(key.to_string()))
    }

    fn entry_or_create(&mut self, key: &str) -> &mut ListEntry {
        if !self.lists.contains_key(key) {
            debug!(key, "creating list");
        }
        self.lists.entry(key.to_string()).or_default()
    }

    fn modify<T>(
        &mut self,
        key: &str,
        f: impl FnOnce(&mut ListEntry) -> Result<T, ListError>,
    ) -> Result<T, ListError> {
        let entry = self
            .lists
            .get_mut(key)
            .ok_or_else(|| ListError::NotFound(key.to_string()))?;
        let result = f(&mut *entry);

        if result.is_ok() && self.policy == EmptyListPolicy::Reclaim && entry.is_empty() {
            debug!(key, "reclaiming empty list");
            self.lists.remove(key);
        }

        result
    }
}
