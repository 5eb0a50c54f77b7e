//! Chained hash table keyed by text.
//!
//! [`HashTable`] is the engine shared by [`ScalarMap`](crate::ScalarMap) and
//! [`VectorMap`](crate::VectorMap). It owns a power-of-two directory of
//! buckets; each bucket is a singly linked chain of boxed entries, newest
//! first.
//!
//! # Invariants
//!
//! - Every key appears at most once.
//! - `used` equals the number of non-empty chains.
//! - The directory never shrinks. When an insert pushes
//!   `entries / buckets` past the load factor, the directory doubles and
//!   every entry is relinked before the insert returns.
//!
//! A failed operation leaves the table untouched. In particular the
//! doubled directory is reserved before the new entry is linked, so a
//! failed resize never strands a half-inserted key.

use std::fmt;
use std::mem;

use floatkit_core::{Error, Rejected, Result, TableConfig};
use floatkit_numeric::FloatVec;
use tracing::debug;

use crate::hash::bucket_index;

/// Values a [`HashTable`] can deep-copy.
pub trait TableValue: Sized {
    /// An independent copy of `self`.
    fn duplicate(&self) -> Result<Self>;
}

impl TableValue for f64 {
    fn duplicate(&self) -> Result<Self> {
        Ok(*self)
    }
}

impl TableValue for FloatVec<'static> {
    fn duplicate(&self) -> Result<Self> {
        if !self.is_growable() {
            return Err(Error::PermissionDenied(
                "tables only hold growable vectors",
            ));
        }
        self.try_clone()
    }
}

type Link<V> = Option<Box<Entry<V>>>;

struct Entry<V> {
    key: Box<str>,
    value: V,
    next: Link<V>,
}

/// A text-keyed chained hash table.
pub struct HashTable<V> {
    buckets: Vec<Link<V>>,
    len: usize,
    used: usize,
    config: TableConfig,
}

fn alloc_buckets<V>(count: usize) -> Result<Vec<Link<V>>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(count)
        .map_err(|_| Error::OutOfMemory { requested: count })?;
    buckets.resize_with(count, || None);
    Ok(buckets)
}

impl<V> HashTable<V> {
    /// Create an empty table with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = TableConfig::default();
        let mut buckets = Vec::with_capacity(config.initial_buckets);
        buckets.resize_with(config.initial_buckets, || None);
        Self {
            buckets,
            len: 0,
            used: 0,
            config,
        }
    }

    /// Create an empty table with `config`.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buckets: alloc_buckets(config.initial_buckets)?,
            len: 0,
            used: 0,
            config,
        })
    }

    // --------------------------------------------------------
    // Metrics
    // --------------------------------------------------------

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty buckets.
    #[inline]
    pub fn buckets_used(&self) -> usize {
        self.used
    }

    /// Size of the bucket directory.
    #[inline]
    pub fn buckets_allocated(&self) -> usize {
        self.buckets.len()
    }

    /// The configuration this table was created with.
    #[inline]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    // --------------------------------------------------------
    // Lookup
    // --------------------------------------------------------

    #[inline]
    fn bucket_of(&self, key: &str) -> usize {
        bucket_index(key, self.config.seed, self.buckets.len())
    }

    /// Shared reference to the value under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut link = &self.buckets[self.bucket_of(key)];
        while let Some(entry) = link {
            if &*entry.key == key {
                return Some(&entry.value);
            }
            link = &entry.next;
        }
        None
    }

    /// Mutable reference to the value under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.bucket_of(key);
        let mut link = self.buckets[idx].as_deref_mut();
        while let Some(entry) = link {
            if &*entry.key == key {
                return Some(&mut entry.value);
            }
            link = entry.next.as_deref_mut();
        }
        None
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // --------------------------------------------------------
    // Mutation
    // --------------------------------------------------------

    /// Insert `value` under a new `key`.
    ///
    /// An existing key fails with `AlreadyExists`; a directory that cannot
    /// be doubled fails with `OutOfMemory`. Either way `value` comes back
    /// in the [`Rejected`].
    pub fn insert(&mut self, key: &str, value: V) -> std::result::Result<(), Rejected<V>> {
        if self.contains_key(key) {
            return Err(Rejected::new(Error::AlreadyExists(key.to_owned()), value));
        }

        let grown = if self.config.is_overloaded(self.len + 1, self.buckets.len()) {
            let doubled = self.buckets.len().checked_mul(2).ok_or(Error::OutOfMemory {
                requested: usize::MAX,
            });
            match doubled.and_then(alloc_buckets::<V>) {
                Ok(buckets) => Some(buckets),
                Err(err) => return Err(Rejected::new(err, value)),
            }
        } else {
            None
        };

        let idx = self.bucket_of(key);
        let entry = Box::new(Entry {
            key: key.into(),
            value,
            next: None,
        });
        self.link(idx, entry);
        self.len += 1;

        if let Some(buckets) = grown {
            self.rehash(buckets);
        }
        Ok(())
    }

    /// Prepend `entry` to chain `idx`.
    fn link(&mut self, idx: usize, mut entry: Box<Entry<V>>) {
        entry.next = self.buckets[idx].take();
        if entry.next.is_none() {
            self.used += 1;
        }
        self.buckets[idx] = Some(entry);
    }

    /// Move every entry into the fresh directory `buckets`.
    fn rehash(&mut self, buckets: Vec<Link<V>>) {
        let from = self.buckets.len();
        let old = mem::replace(&mut self.buckets, buckets);
        self.used = 0;

        for mut link in old {
            while let Some(mut entry) = link {
                link = entry.next.take();
                let idx = self.bucket_of(&entry.key);
                self.link(idx, entry);
            }
        }

        debug!(
            from,
            to = self.buckets.len(),
            entries = self.len,
            "resized hash table"
        );
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.bucket_of(key);
        let mut cursor = &mut self.buckets[idx];
        while cursor.as_ref().is_some_and(|entry| &*entry.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let mut removed = cursor.take()?;
        *cursor = removed.next.take();

        self.len -= 1;
        if self.buckets[idx].is_none() {
            self.used -= 1;
        }
        let Entry { value, .. } = *removed;
        Some(value)
    }

    /// Drop every entry, keeping the directory at its current size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            let mut link = bucket.take();
            // Unlink one node at a time so long chains don't recurse on drop.
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }
        self.len = 0;
        self.used = 0;
    }

    // --------------------------------------------------------
    // Iteration
    // --------------------------------------------------------

    /// Entries in table order: bucket by bucket, newest first within a
    /// chain. The order changes when the table resizes.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    /// Keys in table order.
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }
}

impl<V: TableValue> HashTable<V> {
    /// Deep copy with the same configuration and directory size.
    pub fn try_clone(&self) -> Result<Self> {
        let mut copy = Self {
            buckets: alloc_buckets(self.buckets.len())?,
            len: 0,
            used: 0,
            config: self.config,
        };
        for (key, value) in self {
            let idx = copy.bucket_of(key);
            let entry = Box::new(Entry {
                key: key.into(),
                value: value.duplicate()?,
                next: None,
            });
            copy.link(idx, entry);
            copy.len += 1;
        }
        Ok(copy)
    }

    /// Union of `a` and `b` as a new table. On a shared key the value
    /// from `b` wins when `overwrite` is set, otherwise `a` keeps its own.
    pub fn merge(a: &Self, b: &Self, overwrite: bool) -> Result<Self> {
        let mut merged = a.try_clone()?;
        for (key, value) in b {
            match merged.get_mut(key) {
                Some(slot) => {
                    if overwrite {
                        *slot = value.duplicate()?;
                    }
                }
                None => merged.insert(key, value.duplicate()?)?,
            }
        }
        Ok(merged)
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(key, value)` pairs of a [`HashTable`].
pub struct Iter<'a, V> {
    buckets: std::slice::Iter<'a, Link<V>>,
    chain: Option<&'a Entry<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                self.remaining -= 1;
                return Some((&*entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
