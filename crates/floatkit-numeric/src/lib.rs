//! floatkit numeric library
//!
//! Randomly indexable sequences of `f64` with engine-managed or
//! caller-managed storage.
//!
//! # Storage kinds
//!
//! | Kind | Buffer | Growth | Release |
//! |------|--------|--------|---------|
//! | **Growable** | Heap, owned by the vector | Doubles, then fixed steps | On drop or [`FloatVec::release`] |
//! | **Fixed** | Caller-provided slice | Never; full pushes fail | Never; the caller keeps the storage |
//!
//! # Modules
//!
//! - `vector` - the [`FloatVec`] container: mutation, search, statistics
//! - `simd` - four-lane reductions used by the statistics
//! - `sort` - median-of-three quicksort with an insertion-sort cutoff
//! - `scoped` - acquire-run-release helpers
//!
//! # Example
//!
//! ```
//! use floatkit_numeric::{Direction, FloatVec};
//!
//! let mut v = FloatVec::new(4).unwrap();
//! for x in [3.0, 1.0, 2.0] {
//!     v.push_back(x).unwrap();
//! }
//! v.sort(Direction::Forward);
//! assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
//! assert_eq!(v.binary_search(2.0, 0.0, false).unwrap(), Some(1));
//! ```

#![warn(missing_docs)]
#![allow(unsafe_code)] // SIMD requires unsafe

pub mod scoped;
pub mod simd;
pub mod sort;
pub mod vector;

pub use floatkit_core::{Error, ErrorKind, GrowthPolicy, Measure, Result};
pub use scoped::{with_fixed, with_vector};
pub use sort::Direction;
pub use vector::{FloatVec, StorageKind};
