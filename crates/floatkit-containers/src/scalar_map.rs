//! Text-keyed dictionary of `f64` scalars.

use std::fmt;

use floatkit_core::{Error, Measure, Result, TableConfig};
use floatkit_numeric::FloatVec;

use crate::table::{HashTable, Iter};

/// A dictionary from text keys to `f64` values.
///
/// Keys are insert-once: [`insert`](Self::insert) refuses an existing key
/// and [`update`](Self::update) refuses a missing one.
///
/// ```
/// use floatkit_containers::ScalarMap;
///
/// let mut prices = ScalarMap::new();
/// prices.insert("apple", 1.25).unwrap();
/// prices.update("apple", 1.5).unwrap();
/// assert_eq!(prices.get("apple").unwrap(), 1.5);
/// assert!(prices.get("pear").is_err());
/// ```
#[derive(Default)]
pub struct ScalarMap {
    table: HashTable<f64>,
}

impl ScalarMap {
    /// Create an empty map with 16 buckets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    /// Create an empty map with `config`.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        Ok(Self {
            table: HashTable::with_config(config)?,
        })
    }

    /// Insert `value` under a new `key`.
    pub fn insert(&mut self, key: &str, value: f64) -> Result<()> {
        self.table.insert(key, value)?;
        Ok(())
    }

    /// Replace the value under an existing `key`.
    pub fn update(&mut self, key: &str, value: f64) -> Result<()> {
        let slot = self
            .table
            .get_mut(key)
            .ok_or_else(|| Error::NotFound(key.to_owned()))?;
        *slot = value;
        Ok(())
    }

    /// Value under `key`.
    pub fn get(&self, key: &str) -> Result<f64> {
        self.table
            .get(key)
            .copied()
            .ok_or_else(|| Error::NotFound(key.to_owned()))
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Result<f64> {
        self.table
            .remove(key)
            .ok_or_else(|| Error::NotFound(key.to_owned()))
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Remove every entry. The bucket directory keeps its size.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Independent copy of this map.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            table: self.table.try_clone()?,
        })
    }

    /// Union of `a` and `b`. Shared keys take `b`'s value when
    /// `overwrite` is set and keep `a`'s otherwise.
    pub fn merge(a: &Self, b: &Self, overwrite: bool) -> Result<Self> {
        Ok(Self {
            table: HashTable::merge(&a.table, &b.table, overwrite)?,
        })
    }

    /// Call `visit` once per entry, in table order.
    pub fn for_each(&self, mut visit: impl FnMut(&str, f64)) {
        for (key, &value) in &self.table {
            visit(key, value);
        }
    }

    /// Entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.table.iter().map(|(key, &value)| (key, value))
    }

    /// Keys in table order.
    pub fn keys(&self) -> Vec<String> {
        self.table.keys()
    }

    /// Values in table order, collected into a growable vector sized to
    /// the entry count.
    pub fn values(&self) -> Result<FloatVec<'static>> {
        let mut values = FloatVec::new(self.len().max(1))?;
        for (_, &value) in &self.table {
            values.push_back(value)?;
        }
        Ok(values)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of non-empty buckets.
    pub fn buckets_used(&self) -> usize {
        self.table.buckets_used()
    }

    /// Size of the bucket directory.
    pub fn buckets_allocated(&self) -> usize {
        self.table.buckets_allocated()
    }
}

impl Measure for ScalarMap {
    fn size(&self) -> usize {
        self.len()
    }

    fn alloc(&self) -> usize {
        self.buckets_allocated()
    }
}

impl fmt::Debug for ScalarMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScalarMap").field(&self.table).finish()
    }
}

impl<'a> IntoIterator for &'a ScalarMap {
    type Item = (&'a str, &'a f64);
    type IntoIter = Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}
