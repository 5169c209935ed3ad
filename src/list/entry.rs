use super::{range, ListError};
use bytes::Bytes;
use std::collections::VecDeque;

/// Ordered sequence of items stored under one key.
///
/// Index 0 is the head and `len() - 1` the tail. Items are opaque byte
/// strings and are compared byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEntry {
    items: VecDeque<Bytes>,
}

impl ListEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bytes> {
        self.items.iter()
    }

    /// Append items to the tail in argument order. Returns the new length.
    pub fn push_back<I, V>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Bytes>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self.items.len()
    }

    /// Insert items at the head one at a time, so the last argument ends up
    /// closest to the head. Returns the new length.
    pub fn push_front<I, V>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Bytes>,
    {
        for item in items {
            self.items.push_front(item.into());
        }
        self.items.len()
    }

    pub fn pop_front(&mut self) -> Option<Bytes> {
        self.items.pop_front()
    }

    pub fn pop_back(&mut self) -> Option<Bytes> {
        self.items.pop_back()
    }

    pub fn front(&self) -> Option<&Bytes> {
        self.items.front()
    }

    pub fn back(&self) -> Option<&Bytes> {
        self.items.back()
    }

    /// Element at `index`, where negative values count back from the tail.
    pub fn get(&self, index: i64) -> Result<&Bytes, ListError> {
        let len = self.items.len();
        let resolved = if index < 0 { len as i64 + index } else { index };
        if resolved < 0 {
            return Err(ListError::OutOfRange { index, len });
        }
        self.items
            .get(resolved as usize)
            .ok_or(ListError::OutOfRange { index, len })
    }

    /// Copy out the inclusive range `[start, end]` after normalization.
    pub fn range(&self, start: i64, end: i64) -> Result<Vec<Bytes>, ListError> {
        let selected = range::normalize(self.items.len(), start, end)?;
        Ok(self.items.range(selected).cloned().collect())
    }

    /// Remove items equal to `value`.
    ///
    /// A positive `count` removes up to `count` matches scanning from the
    /// head, a negative one up to `|count|` scanning from the tail, and zero
    /// removes every match. Returns how many items were removed.
    pub fn remove(&mut self, count: i64, value: &[u8]) -> usize {
        let budget = if count == 0 {
            usize::MAX
        } else {
            usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX)
        };
        let mut removed = 0;

        if count >= 0 {
            self.items.retain(|item| {
                if removed < budget && item.as_ref() == value {
                    removed += 1;
                    false
                } else {
                    true
                }
            });
        } else {
            let mut kept = VecDeque::with_capacity(self.items.len());
            while let Some(item) = self.items.pop_back() {
                if removed < budget && item.as_ref() == value {
                    removed += 1;
                } else {
                    kept.push_front(item);
                }
            }
            self.items = kept;
        }

        removed
    }

    /// Overwrite the element at a non-negative `index`.
    pub fn set(&mut self, index: i64, value: Bytes) -> Result<(), ListError> {
        let len = self.items.len();
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.items.get_mut(i))
            .ok_or(ListError::OutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Keep only the inclusive range `[start, end]`, using the same rules as
    /// [`ListEntry::range`]. Returns how many items were dropped.
    pub fn trim(&mut self, start: i64, end: i64) -> Result<usize, ListError> {
        let selected = range::normalize(self.items.len(), start, end)?;
        let before = self.items.len();
        self.items.truncate(*selected.end() + 1);
        self.items.drain(..*selected.start());
        Ok(before - self.items.len())
    }
}

impl<V: Into<Bytes>> FromIterator<V> for ListEntry {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}
