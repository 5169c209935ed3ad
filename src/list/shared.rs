use super::{EmptyListPolicy, ListEntry, ListError};
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

/// A list store that can be shared between tasks behind an `Arc`.
///
/// Built on a sharded concurrent map. Each call holds the lock of the
/// shard owning its key for the whole operation, so calls on the same key
/// are serialized and every call is atomic with respect to that key.
#[derive(Debug, Default)]
pub struct SharedListStore {
    lists: DashMap<String, ListEntry>,
    policy: EmptyListPolicy,
}

impl SharedListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: EmptyListPolicy) -> Self {
        Self {
            lists: DashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> EmptyListPolicy {
        self.policy
    }

    pub fn rpush<I, V>(&self, key: &str, items: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Bytes>,
    {
        self.entry_or_create(key).push_back(items)
    }

    pub fn lpush<I, V>(&self, key: &str, items: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Bytes>,
    {
        self.entry_or_create(key).push_front(items)
    }

    pub fn lpop(&self, key: &str) -> Result<Bytes, ListError> {
        self.modify(key, |entry| {
            entry.pop_front().ok_or_else(|| ListError::Empty(key.to_string()))
        })
    }

    pub fn rpop(&self, key: &str) -> Result<Bytes, ListError> {
        self.modify(key, |entry| {
            entry.pop_back().ok_or_else(|| ListError::Empty(key.to_string()))
        })
    }

    pub fn lpeek(&self, key: &str) -> Result<Bytes, ListError> {
        self.read(key, |entry| {
            entry
                .front()
                .cloned()
                .ok_or_else(|| ListError::Empty(key.to_string()))
        })
    }

    pub fn rpeek(&self, key: &str) -> Result<Bytes, ListError> {
        self.read(key, |entry| {
            entry
                .back()
                .cloned()
                .ok_or_else(|| ListError::Empty(key.to_string()))
        })
    }

    pub fn size(&self, key: &str) -> Result<usize, ListError> {
        self.read(key, |entry| Ok(entry.len()))
    }

    pub fn is_empty(&self, key: &str) -> Result<bool, ListError> {
        self.read(key, |entry| Ok(entry.is_empty()))
    }

    pub fn lrange(&self, key: &str, start: i64, end: i64) -> Result<Vec<Bytes>, ListError> {
        self.read(key, |entry| entry.range(start, end))
    }

    pub fn lindex(&self, key: &str, index: i64) -> Result<Bytes, ListError> {
        self.read(key, |entry| entry.get(index).cloned())
    }

    pub fn lrem(&self, key: &str, count: i64, value: &[u8]) -> Result<usize, ListError> {
        self.modify(key, |entry| Ok(entry.remove(count, value)))
    }

    pub fn lset(&self, key: &str, index: i64, value: impl Into<Bytes>) -> Result<(), ListError> {
        let value = value.into();
        self.modify(key, |entry| entry.set(index, value))
    }

    /// Keep only the range LRANGE would return for the same bounds.
    /// Returns how many items were dropped.
    pub fn ltrim(&self, key: &str, start: i64, end: i64) -> Result<usize, ListError> {
        self.modify(key, |entry| entry.trim(start, end))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.lists.contains_key(key)
    }

    pub fn delete(&self, key: &str) -> bool {
        self.lists.remove(key).is_some()
    }

    pub fn keys_count(&self) -> usize {
        self.lists.len()
    }

    pub fn flush(&self) {
        self.lists.clear();
    }

    fn entry_or_create(&self, key: &str) -> dashmap::mapref::one::RefMut<'_, String, ListEntry> {
        self.lists.entry(key.to_string()).or_insert_with(|| {
            debug!(key, "creating list");
            ListEntry::new()
        })
    }

    fn read<T>(
        &self,
        key: &str,
        f: impl FnOnce(&ListEntry) -> Result<T, ListError>,
    ) -> Result<T, ListError> {
        let entry = self
            .lists
            .get(key)
            .ok_or_else(|| ListError::NotFound(key.to_string()))?;
        f(entry.value())
    }

    fn modify<T>(
        &self,
        key: &str,
        f: impl FnOnce(&mut ListEntry) -> Result<T, ListError>,
    ) -> Result<T, ListError> {
        let mut entry = self
            .lists
            .get_mut(key)
            .ok_or_else(|| ListError::NotFound(key.to_string()))?;
        let result = f(entry.value_mut());
        let drained = result.is_ok() && entry.is_empty();
        drop(entry);

        if self.policy == EmptyListPolicy::Reclaim && drained {
            // Another caller may have pushed since the guard was released.
            if self.lists.remove_if(key, |_, list| list.is_empty()).is_some() {
                debug!(key, "reclaiming empty list");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_basic_operations() {
        let store = SharedListStore::new();
        store.rpush("k", ["a", "b", "c", "d"]);

        assert_eq!(store.lpop("k").unwrap(), "a");
        assert_eq!(store.rpop("k").unwrap(), "d");
        assert_eq!(store.lrange("k", 0, -1).unwrap(), vec!["b", "c"]);
        assert_eq!(store.size("k"), Ok(2));
        assert!(matches!(store.size("missing"), Err(ListError::NotFound(_))));
    }

    #[test]
    fn test_lrem_and_ltrim() {
        let store = SharedListStore::new();
        store.rpush("k", ["a", "b", "c", "d", "b"]);

        assert_eq!(store.lrem("k", -2, b"b"), Ok(2));
        assert_eq!(store.lrange("k", 0, -1).unwrap(), vec!["a", "c", "d"]);

        assert_eq!(store.ltrim("k", 1, 10), Ok(1));
        assert_eq!(store.lrange("k", 0, -1).unwrap(), vec!["c", "d"]);
        assert!(store.ltrim("k", -1, -2).is_err());
    }

    #[test]
    fn test_lset_and_lindex() {
        let store = SharedListStore::new();
        store.rpush("k", ["a", "b"]);

        store.lset("k", 1, "b1").unwrap();
        assert_eq!(store.lindex("k", -1).unwrap(), "b1");
        assert!(store.lset("k", -1, "x").is_err());
    }

    #[test]
    fn test_reclaim_policy() {
        let store = SharedListStore::with_policy(EmptyListPolicy::Reclaim);
        store.lpush("k", ["a"]);

        store.lpop("k").unwrap();
        assert!(!store.exists("k"));
        assert_eq!(store.keys_count(), 0);
    }

    #[test]
    fn test_reclaim_keeps_key_when_call_fails() {
        let store = SharedListStore::with_policy(EmptyListPolicy::Reclaim);
        store.rpush("k", Vec::<Bytes>::new());

        assert!(matches!(store.lpop("k"), Err(ListError::Empty(_))));
        assert!(store.exists("k"));
        assert!(matches!(store.rpop("k"), Err(ListError::Empty(_))));
        assert!(store.exists("k"));
        assert!(matches!(
            store.ltrim("k", 0, -1),
            Err(ListError::InvalidRange { .. })
        ));
        assert!(store.exists("k"));
        assert_eq!(store.keys_count(), 1);
    }

    #[test]
    fn test_concurrent_pushes() {
        let store = Arc::new(SharedListStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100 {
                        store.rpush("shared", [format!("{t}-{i}")]);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.size("shared"), Ok(800));
    }

    #[test]
    fn test_concurrent_pops_return_each_item_once() {
        let store = Arc::new(SharedListStore::new());
        store.rpush("q", (0..400).map(|i| i.to_string()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let mut popped = Vec::new();
                    while let Ok(item) = store.lpop("q") {
                        popped.push(item);
                    }
                    popped
                })
            })
            .collect();

        let mut total = 0;
        for handle in handles {
            total += handle.join().unwrap().len();
        }

        assert_eq!(total, 400);
        assert_eq!(store.size("q"), Ok(0));
    }
}
