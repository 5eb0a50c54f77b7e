//! floatkit containers
//!
//! Text-keyed chained hash dictionaries over `f64` data.
//!
//! # Dictionaries
//!
//! | Type | Value | Copy | On remove |
//! |------|-------|------|-----------|
//! | [`ScalarMap`] | `f64` | By value | Value returned |
//! | [`VectorMap`] | Owned growable [`FloatVec`] | Deep clone | Vector returned to caller |
//!
//! Both start with 16 buckets and double once the entry count exceeds
//! 0.7 per bucket. Neither shrinks. Iteration, [`ScalarMap::keys`] and
//! [`ScalarMap::values`] follow table order (bucket by bucket), which is
//! not insertion order and may change across a resize.
//!
//! # Example
//!
//! ```
//! use floatkit_containers::ScalarMap;
//!
//! let mut a = ScalarMap::new();
//! a.insert("x", 1.0).unwrap();
//! let mut b = ScalarMap::new();
//! b.insert("x", 2.0).unwrap();
//! b.insert("y", 3.0).unwrap();
//!
//! let merged = ScalarMap::merge(&a, &b, false).unwrap();
//! assert_eq!(merged.get("x").unwrap(), 1.0);
//! assert_eq!(merged.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod hash;
pub mod scalar_map;
pub mod table;
pub mod vector_map;

pub use floatkit_core::{Error, ErrorKind, Measure, Rejected, Result, TableConfig};
pub use floatkit_numeric::FloatVec;
pub use scalar_map::ScalarMap;
pub use table::{HashTable, TableValue};
pub use vector_map::VectorMap;
