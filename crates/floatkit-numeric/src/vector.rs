//! Growable and fixed-capacity `f64` vectors
//!
//! # Overview
//!
//! [`FloatVec`] keeps a zero-filled buffer of `capacity` slots and a logical
//! length. Slots at or past the length are always zero: pops clear the slot
//! they vacate and growth zero-fills the new tail.
//!
//! The buffer is either owned by the vector ([`StorageKind::Growable`]) or
//! borrowed from the caller ([`StorageKind::Fixed`]). Fixed vectors never
//! reallocate; a push into a full fixed vector fails instead of growing.
//!
//! # Errors
//!
//! Every fallible operation returns [`floatkit_core::Error`] and leaves the
//! vector unchanged on failure.

use std::fmt;
use std::ops::Index;

use floatkit_core::{Error, GrowthPolicy, Measure, Result};
use tracing::{debug, trace, warn};

use crate::simd;
use crate::sort::{self, Direction};

// ============================================================
// Storage
// ============================================================

/// Who owns a vector's buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Heap buffer owned and resized by the vector.
    Growable,
    /// Caller-provided buffer of fixed size.
    Fixed,
}

enum Buffer<'buf> {
    Heap(Vec<f64>),
    Borrowed(&'buf mut [f64]),
}

impl Buffer<'_> {
    #[inline]
    fn slots(&self) -> &[f64] {
        match self {
            Buffer::Heap(data) => data,
            Buffer::Borrowed(data) => data,
        }
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [f64] {
        match self {
            Buffer::Heap(data) => data,
            Buffer::Borrowed(data) => data,
        }
    }

    #[inline]
    fn kind(&self) -> StorageKind {
        match self {
            Buffer::Heap(_) => StorageKind::Growable,
            Buffer::Borrowed(_) => StorageKind::Fixed,
        }
    }
}

/// Allocate `capacity` zeroed slots, reporting failure instead of aborting.
fn alloc_zeroed(capacity: usize) -> Result<Vec<f64>> {
    let mut data = Vec::new();
    data.try_reserve_exact(capacity)
        .map_err(|_| Error::OutOfMemory {
            requested: capacity,
        })?;
    data.resize(capacity, 0.0);
    Ok(data)
}

// ============================================================
// Core Vector Type
// ============================================================

/// A contiguous vector of `f64` with an explicit capacity.
///
/// `'buf` is the lifetime of caller-provided storage for fixed vectors.
/// Growable vectors own their buffer and are `FloatVec<'static>`.
pub struct FloatVec<'buf> {
    buffer: Buffer<'buf>,
    len: usize,
    policy: GrowthPolicy,
}

impl FloatVec<'static> {
    /// Create a growable vector with `capacity` zeroed slots and length 0.
    ///
    /// Fails with `InvalidArgument` when `capacity` is zero and with
    /// `OutOfMemory` when the buffer cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_policy(capacity, GrowthPolicy::default())
    }

    /// Create a growable vector that grows according to `policy`.
    pub fn with_policy(capacity: usize, policy: GrowthPolicy) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be non-zero"));
        }
        policy.validate()?;
        Ok(Self {
            buffer: Buffer::Heap(alloc_zeroed(capacity)?),
            len: 0,
            policy,
        })
    }

    /// Create a growable vector holding a copy of `values`.
    ///
    /// Capacity equals the number of values (at least one).
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let mut data = alloc_zeroed(values.len().max(1))?;
        data[..values.len()].copy_from_slice(values);
        Ok(Self {
            buffer: Buffer::Heap(data),
            len: values.len(),
            policy: GrowthPolicy::default(),
        })
    }
}

impl<'buf> FloatVec<'buf> {
    /// Create a fixed vector over caller-provided storage.
    ///
    /// The storage is zeroed and its length becomes the capacity. The vector
    /// never reallocates or frees it.
    pub fn fixed(storage: &'buf mut [f64]) -> Result<Self> {
        if storage.is_empty() {
            return Err(Error::InvalidArgument("capacity must be non-zero"));
        }
        storage.fill(0.0);
        Ok(Self {
            buffer: Buffer::Borrowed(storage),
            len: 0,
            policy: GrowthPolicy::default(),
        })
    }

    // --------------------------------------------------------
    // Queries
    // --------------------------------------------------------

    /// Number of stored elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no elements are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.slots().len()
    }

    /// Storage kind of this vector.
    #[inline]
    pub fn kind(&self) -> StorageKind {
        self.buffer.kind()
    }

    /// Whether the vector owns (and may grow and release) its buffer.
    #[inline]
    pub fn is_growable(&self) -> bool {
        self.kind() == StorageKind::Growable
    }

    /// Growth rule used when the buffer is full.
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// The stored elements.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.buffer.slots()[..self.len]
    }

    /// The stored elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        let len = self.len;
        &mut self.buffer.slots_mut()[..len]
    }

    /// Iterate over the stored elements.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.as_slice().iter()
    }

    /// Bounds-checked read.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(Error::Range {
                index,
                len: self.len,
            })
    }

    /// Bounds-checked overwrite of an existing element.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.len;
        let slot = self
            .as_mut_slice()
            .get_mut(index)
            .ok_or(Error::Range { index, len })?;
        *slot = value;
        Ok(())
    }

    // --------------------------------------------------------
    // Growth
    // --------------------------------------------------------

    /// Make room for one more element.
    fn reserve_one(&mut self) -> Result<()> {
        if self.len < self.capacity() {
            return Ok(());
        }
        match &mut self.buffer {
            Buffer::Borrowed(_) => Err(Error::InvalidArgument(
                "fixed-capacity vector is full",
            )),
            Buffer::Heap(data) => {
                let old = data.len();
                let new = self
                    .policy
                    .next_capacity(old)
                    .ok_or(Error::OutOfMemory {
                        requested: usize::MAX,
                    })?;
                data.try_reserve_exact(new - old)
                    .map_err(|_| Error::OutOfMemory { requested: new })?;
                data.resize(new, 0.0);
                trace!(old_capacity = old, new_capacity = new, "grew float vector");
                Ok(())
            }
        }
    }

    /// Shrink a growable buffer to the current length.
    ///
    /// No-op for fixed vectors and for vectors already at minimal capacity.
    /// Fails with `EmptyContainer` if a shrink is needed but the vector is
    /// empty.
    pub fn trim(&mut self) -> Result<()> {
        let len = self.len;
        match &mut self.buffer {
            Buffer::Borrowed(_) => Ok(()),
            Buffer::Heap(data) if data.len() == len => Ok(()),
            Buffer::Heap(_) if len == 0 => Err(Error::EmptyContainer),
            Buffer::Heap(data) => {
                let old = data.len();
                data.truncate(len);
                data.shrink_to_fit();
                trace!(old_capacity = old, new_capacity = len, "trimmed float vector");
                Ok(())
            }
        }
    }

    // --------------------------------------------------------
    // Insertion
    // --------------------------------------------------------

    /// Append `value`.
    pub fn push_back(&mut self, value: f64) -> Result<()> {
        self.reserve_one()?;
        let len = self.len;
        self.buffer.slots_mut()[len] = value;
        self.len += 1;
        Ok(())
    }

    /// Prepend `value`, shifting every element one slot right.
    pub fn push_front(&mut self, value: f64) -> Result<()> {
        self.insert(0, value)
    }

    /// Insert `value` at `index`, shifting `[index, len)` right.
    ///
    /// `index == len` appends. Fails with `Range` when `index > len`.
    pub fn insert(&mut self, index: usize, value: f64) -> Result<()> {
        if index > self.len {
            return Err(Error::Range {
                index,
                len: self.len,
            });
        }
        self.reserve_one()?;
        let len = self.len;
        let slots = self.buffer.slots_mut();
        slots.copy_within(index..len, index + 1);
        slots[index] = value;
        self.len += 1;
        Ok(())
    }

    // --------------------------------------------------------
    // Removal
    // --------------------------------------------------------

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Result<f64> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }
        let last = self.len - 1;
        let slots = self.buffer.slots_mut();
        let value = slots[last];
        slots[last] = 0.0;
        self.len = last;
        Ok(value)
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Result<f64> {
        self.pop_at(0)
    }

    /// Remove and return the element at `index`, closing the gap.
    pub fn pop_at(&mut self, index: usize) -> Result<f64> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }
        if index >= self.len {
            return Err(Error::Range {
                index,
                len: self.len,
            });
        }
        let len = self.len;
        let slots = self.buffer.slots_mut();
        let value = slots[index];
        slots.copy_within(index + 1..len, index);
        slots[len - 1] = 0.0;
        self.len -= 1;
        Ok(value)
    }

    // --------------------------------------------------------
    // Ordering
    // --------------------------------------------------------

    /// Reverse the elements in place.
    pub fn reverse(&mut self) -> Result<()> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }
        self.as_mut_slice().reverse();
        Ok(())
    }

    /// Sort in place. See [`crate::sort`] for the NaN ordering.
    pub fn sort(&mut self, direction: Direction) {
        if self.len < 2 {
            return;
        }
        sort::quicksort(self.as_mut_slice(), direction);
    }

    /// Tolerance-aware binary search over ascending data.
    ///
    /// Returns the first midpoint whose value lies within `tolerance` of
    /// `value`, which is not necessarily the lowest matching index. When
    /// `sort_first` is set the vector is sorted ascending before searching.
    ///
    /// Fails with `EmptyContainer` on an empty vector and `InvalidArgument`
    /// when `tolerance` is negative or either argument is NaN.
    pub fn binary_search(
        &mut self,
        value: f64,
        tolerance: f64,
        sort_first: bool,
    ) -> Result<Option<usize>> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }
        if tolerance < 0.0 {
            return Err(Error::InvalidArgument("tolerance must be non-negative"));
        }
        if value.is_nan() || tolerance.is_nan() {
            return Err(Error::InvalidArgument("search arguments must not be NaN"));
        }

        if sort_first && self.len > 1 {
            self.sort(Direction::Forward);
        }

        let data = self.as_slice();
        let mut left = 0;
        let mut right = data.len() - 1;
        while left <= right {
            let mid = left + (right - left) / 2;
            let diff = data[mid] - value;
            if diff.abs() <= tolerance {
                return Ok(Some(mid));
            }
            if diff < 0.0 {
                left = mid + 1;
            } else {
                if mid == 0 {
                    break;
                }
                right = mid - 1;
            }
        }
        Ok(None)
    }

    // --------------------------------------------------------
    // Statistics
    // --------------------------------------------------------

    fn require_elements(&self, at_least: usize) -> Result<&[f64]> {
        if self.len < at_least {
            return Err(Error::EmptyContainer);
        }
        Ok(self.as_slice())
    }

    /// Smallest element, skipping NaN. NaN if every element is NaN.
    pub fn min(&self) -> Result<f64> {
        Ok(simd::min(self.require_elements(1)?))
    }

    /// Largest element, skipping NaN. NaN if every element is NaN.
    pub fn max(&self) -> Result<f64> {
        Ok(simd::max(self.require_elements(1)?))
    }

    /// Sum of the elements.
    pub fn sum(&self) -> Result<f64> {
        Ok(simd::sum(self.require_elements(1)?))
    }

    /// Arithmetic mean.
    pub fn average(&self) -> Result<f64> {
        let data = self.require_elements(1)?;
        Ok(simd::sum(data) / data.len() as f64)
    }

    /// Population standard deviation (divides by `len`).
    ///
    /// Needs at least two elements. Any infinite element makes the result
    /// positive infinity.
    pub fn std_dev(&self) -> Result<f64> {
        let data = self.require_elements(2)?;
        let n = data.len() as f64;
        let mean = simd::sum(data) / n;
        let squares = simd::sum_squared_deviation(data, mean);
        if squares.is_infinite() {
            return Ok(f64::INFINITY);
        }
        Ok((squares / n).sqrt())
    }

    /// Running totals: element `i` of the result is the sum of `0..=i`.
    ///
    /// Once the running sum becomes infinite every later output repeats
    /// that infinity. A NaN input fails the whole operation with
    /// `InvalidArgument`; the partial result is dropped.
    pub fn cumulative_sum(&self) -> Result<FloatVec<'static>> {
        let data = self.require_elements(1)?;
        let mut out = FloatVec::with_policy(data.len(), self.policy)?;

        let mut running = 0.0;
        for (i, &x) in data.iter().enumerate() {
            if x.is_nan() {
                debug!(index = i, "NaN in cumulative sum input");
                return Err(Error::InvalidArgument("NaN encountered in cumulative sum"));
            }
            running += x;
            if running.is_infinite() {
                for _ in i..data.len() {
                    out.push_back(running)?;
                }
                break;
            }
            out.push_back(running)?;
        }
        Ok(out)
    }

    // --------------------------------------------------------
    // Copy and release
    // --------------------------------------------------------

    /// Deep copy with the same length and capacity.
    ///
    /// The copy is always growable, even when `self` is fixed.
    pub fn try_clone(&self) -> Result<FloatVec<'static>> {
        let mut data = alloc_zeroed(self.capacity())?;
        data[..self.len].copy_from_slice(self.as_slice());
        Ok(FloatVec {
            buffer: Buffer::Heap(data),
            len: self.len,
            policy: self.policy,
        })
    }

    /// Detach a growable vector from the `'buf` lifetime.
    ///
    /// Fixed vectors are handed back unchanged in `Err`.
    pub fn into_growable(self) -> std::result::Result<FloatVec<'static>, Self> {
        match self.buffer {
            Buffer::Heap(data) => Ok(FloatVec {
                buffer: Buffer::Heap(data),
                len: self.len,
                policy: self.policy,
            }),
            buffer @ Buffer::Borrowed(_) => Err(Self {
                buffer,
                len: self.len,
                policy: self.policy,
            }),
        }
    }

    /// Release a growable vector's buffer.
    ///
    /// Fixed vectors fail with `PermissionDenied`; their storage stays with
    /// the caller either way.
    pub fn release(self) -> Result<()> {
        match self.buffer {
            Buffer::Heap(_) => Ok(()),
            Buffer::Borrowed(_) => {
                warn!("attempted to release a fixed-capacity vector");
                Err(Error::PermissionDenied(
                    "fixed-capacity storage is owned by the caller",
                ))
            }
        }
    }
}

// ============================================================
// Trait Implementations
// ============================================================

impl Measure for FloatVec<'_> {
    fn size(&self) -> usize {
        self.len
    }

    fn alloc(&self) -> usize {
        self.capacity()
    }
}

impl Index<usize> for FloatVec<'_> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl fmt::Debug for FloatVec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatVec({:?})", self.as_slice())
    }
}

impl fmt::Display for FloatVec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

impl PartialEq for FloatVec<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, 'buf> IntoIterator for &'a FloatVec<'buf> {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[f64]) -> FloatVec<'static> {
        FloatVec::from_slice(values).unwrap()
    }

    #[test]
    fn test_new_is_zeroed() {
        let v = FloatVec::new(5).unwrap();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 5);
        assert_eq!(v.kind(), StorageKind::Growable);
        assert!(v.buffer.slots().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_new_zero_capacity() {
        assert!(matches!(FloatVec::new(0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_fixed_zeroes_storage() {
        let mut storage = [7.0; 4];
        let v = FloatVec::fixed(&mut storage).unwrap();
        assert_eq!(v.capacity(), 4);
        assert_eq!(v.kind(), StorageKind::Fixed);
        drop(v);
        assert_eq!(storage, [0.0; 4]);
    }

    #[test]
    fn test_growth_preserves_values() {
        let mut v = FloatVec::new(2).unwrap();
        for i in 0..5 {
            v.push_back(f64::from(i)).unwrap();
        }
        assert_eq!(v.capacity(), 8);
        assert_eq!(v.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert!(v.buffer.slots()[5..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_growth_with_small_policy() {
        let policy = GrowthPolicy {
            doubling_threshold: 4,
            fixed_increment: 3,
        };
        let mut v = FloatVec::with_policy(1, policy).unwrap();
        let mut capacities = Vec::new();
        for i in 0..12 {
            v.push_back(f64::from(i)).unwrap();
            capacities.push(v.capacity());
        }
        capacities.dedup();
        assert_eq!(capacities, vec![1, 2, 4, 7, 10, 13]);
    }

    #[test]
    fn test_pop_clears_slot() {
        let mut v = filled(&[1.0, 2.0, 3.0]);
        assert_eq!(v.pop_front().unwrap(), 1.0);
        assert_eq!(v.as_slice(), &[2.0, 3.0]);
        assert_eq!(v.buffer.slots()[2], 0.0);
        assert_eq!(v.pop_back().unwrap(), 3.0);
        assert_eq!(v.buffer.slots()[1], 0.0);
    }

    #[test]
    fn test_trim() {
        let mut v = FloatVec::new(10).unwrap();
        v.push_back(1.0).unwrap();
        v.push_back(2.0).unwrap();
        v.trim().unwrap();
        assert_eq!(v.capacity(), 2);
        assert_eq!(v.as_slice(), &[1.0, 2.0]);

        let mut empty = FloatVec::new(3).unwrap();
        assert_eq!(empty.trim(), Err(Error::EmptyContainer));
    }

    #[test]
    fn test_into_growable() {
        let v = filled(&[1.0]);
        assert!(v.into_growable().is_ok());

        let mut storage = [0.0; 2];
        let fixed = FloatVec::fixed(&mut storage).unwrap();
        let back = fixed.into_growable().unwrap_err();
        assert_eq!(back.kind(), StorageKind::Fixed);
    }

    #[test]
    fn test_display() {
        let v = filled(&[1.0, 2.5, 3.0]);
        assert_eq!(format!("{}", v), "[1, 2.5, 3]");
        assert_eq!(format!("{:?}", v), "FloatVec([1.0, 2.5, 3.0])");
    }
}
