//! Text-keyed dictionary owning growable `f64` vectors.
//!
//! The map takes ownership of every vector it stores and frees it when the
//! entry is removed or the map is dropped. Only growable vectors can be
//! adopted; a fixed vector borrows caller storage the map could never
//! release, so [`VectorMap::insert`] hands it back unchanged.

use std::fmt;

use floatkit_core::{Error, Measure, Rejected, Result, TableConfig};
use floatkit_numeric::FloatVec;
use tracing::warn;

use crate::table::{HashTable, Iter};

/// A dictionary from text keys to owned [`FloatVec`]s.
///
/// ```
/// use floatkit_containers::VectorMap;
/// use floatkit_numeric::FloatVec;
///
/// let mut series = VectorMap::new();
/// series.insert("temps", FloatVec::from_slice(&[20.5, 21.0]).unwrap()).unwrap();
/// series.modify("temps", |v| v.push_back(22.5)).unwrap().unwrap();
/// assert_eq!(series.get("temps").unwrap().len(), 3);
///
/// let mut storage = [0.0; 4];
/// let fixed = FloatVec::fixed(&mut storage).unwrap();
/// let rejected = series.insert("fixed", fixed).unwrap_err();
/// let mut fixed = rejected.into_value();
/// fixed.push_back(1.0).unwrap();
/// ```
#[derive(Default)]
pub struct VectorMap {
    table: HashTable<FloatVec<'static>>,
}

impl VectorMap {
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

    /// Adopt `vector` under a new `key`.
    ///
    /// Fixed vectors fail with `PermissionDenied` and existing keys with
    /// `AlreadyExists`. On failure the vector is returned inside the
    /// [`Rejected`] and stays usable.
    pub fn insert<'b>(
        &mut self,
        key: &str,
        vector: FloatVec<'b>,
    ) -> std::result::Result<(), Rejected<FloatVec<'b>>> {
        let owned = match vector.into_growable() {
            Ok(owned) => owned,
            Err(fixed) => {
                warn!(key, "refused to adopt a fixed-capacity vector");
                return Err(Rejected::new(
                    Error::PermissionDenied("only growable vectors can be adopted"),
                    fixed,
                ));
            }
        };
        self.table.insert(key, owned)
    }

    /// Borrow the vector under `key`. The map keeps ownership.
    pub fn get(&self, key: &str) -> Result<&FloatVec<'static>> {
        self.table
            .get(key)
            .ok_or_else(|| Error::NotFound(key.to_owned()))
    }

    /// Run `f` on the vector under `key` and return its result.
    ///
    /// The map must keep owning what it stores. If `f` swaps in a fixed
    /// vector, the entry is replaced by a growable copy of it and the call
    /// fails with `PermissionDenied`.
    pub fn modify<R>(
        &mut self,
        key: &str,
        f: impl FnOnce(&mut FloatVec<'static>) -> R,
    ) -> Result<R> {
        let slot = self
            .table
            .get_mut(key)
            .ok_or_else(|| Error::NotFound(key.to_owned()))?;
        let out = f(slot);
        if slot.is_growable() {
            return Ok(out);
        }

        warn!(key, "replaced a fixed-capacity vector with an owned copy");
        match slot.try_clone() {
            Ok(copy) => *slot = copy,
            Err(err) => {
                self.table.remove(key);
                return Err(err);
            }
        }
        Err(Error::PermissionDenied("only growable vectors can be stored"))
    }

    /// Remove `key` and hand its vector back to the caller.
    ///
    /// Dropping the returned vector frees it.
    pub fn remove(&mut self, key: &str) -> Result<FloatVec<'static>> {
        self.table
            .remove(key)
            .ok_or_else(|| Error::NotFound(key.to_owned()))
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Free every vector and entry. The bucket directory keeps its size.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Deep copy: every vector is cloned into fresh storage.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            table: self.table.try_clone()?,
        })
    }

    /// Union of `a` and `b` with every vector deep-copied. Shared keys
    /// take `b`'s vector when `overwrite` is set and keep `a`'s otherwise.
    pub fn merge(a: &Self, b: &Self, overwrite: bool) -> Result<Self> {
        Ok(Self {
            table: HashTable::merge(&a.table, &b.table, overwrite)?,
        })
    }

    /// Call `visit` once per entry, in table order.
    pub fn for_each(&self, mut visit: impl FnMut(&str, &FloatVec<'static>)) {
        for (key, vector) in &self.table {
            visit(key, vector);
        }
    }

    /// Entries in table order.
    pub fn iter(&self) -> Iter<'_, FloatVec<'static>> {
        self.table.iter()
    }

    /// Keys in table order.
    pub fn keys(&self) -> Vec<String> {
        self.table.keys()
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

impl Measure for VectorMap {
    fn size(&self) -> usize {
        self.len()
    }

    fn alloc(&self) -> usize {
        self.buckets_allocated()
    }
}

impl fmt::Debug for VectorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VectorMap").field(&self.table).finish()
    }
}

impl<'a> IntoIterator for &'a VectorMap {
    type Item = (&'a str, &'a FloatVec<'static>);
    type IntoIter = Iter<'a, FloatVec<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}
