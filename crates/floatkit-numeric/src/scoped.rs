//! Scoped acquisition of vectors.
//!
//! Both helpers acquire a vector, hand it to a closure and release it when
//! the closure returns, including on early return or unwind.
//!
//! ```
//! use floatkit_numeric::{with_fixed, with_vector};
//!
//! let total = with_vector(8, |v| {
//!     v.push_back(1.5)?;
//!     v.push_back(2.5)?;
//!     v.sum()
//! })
//! .unwrap()
//! .unwrap();
//! assert_eq!(total, 4.0);
//!
//! let full = with_fixed::<2, _>(|v| {
//!     v.push_back(1.0).unwrap();
//!     v.push_back(2.0).unwrap();
//!     v.push_back(3.0).is_err()
//! })
//! .unwrap();
//! assert!(full);
//! ```

use floatkit_core::Result;

use crate::vector::FloatVec;

/// Run `f` with a fresh growable vector of `capacity` slots.
///
/// The vector is dropped, and its buffer freed, when `f` returns.
pub fn with_vector<R>(capacity: usize, f: impl FnOnce(&mut FloatVec<'static>) -> R) -> Result<R> {
    let mut vector = FloatVec::new(capacity)?;
    Ok(f(&mut vector))
}

/// Run `f` with a fixed vector over `N` slots of stack storage.
pub fn with_fixed<const N: usize, R>(f: impl FnOnce(&mut FloatVec<'_>) -> R) -> Result<R> {
    let mut storage = [0.0_f64; N];
    let mut vector = FloatVec::fixed(&mut storage)?;
    Ok(f(&mut vector))
}
