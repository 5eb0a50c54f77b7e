//! Four-lane `f64` reductions
//!
//! Reductions walk the input in chunks of [`LANES`] elements, keeping one
//! accumulator per lane, then fold the lanes and finish the tail with a
//! scalar loop. On x86_64 with AVX the lane operations use 256-bit
//! intrinsics; everywhere else they fall back to plain arrays.
//!
//! Lane-wise `min`/`max` give the same result as a sequential fold. Lane-wise
//! `sum` may differ from a sequential sum in the last bits because the
//! additions are reassociated.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Number of `f64` lanes per accumulator.
pub const LANES: usize = 4;

/// 4 x f64 SIMD vector (256-bit)
#[repr(C, align(32))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec4F64 {
    data: [f64; LANES],
}

impl Vec4F64 {
    /// Create a new vector with all lanes set to the same value
    #[inline]
    pub fn splat(x: f64) -> Self {
        Self { data: [x; LANES] }
    }

    /// Create a zero vector
    #[inline]
    pub fn zero() -> Self {
        Self::splat(0.0)
    }

    /// Load four consecutive values.
    ///
    /// # Panics
    ///
    /// Panics if `chunk` does not hold exactly [`LANES`] values.
    #[inline]
    pub fn load(chunk: &[f64]) -> Self {
        let mut data = [0.0; LANES];
        data.copy_from_slice(chunk);
        Self { data }
    }

    /// The lanes as an array
    #[inline]
    pub fn to_array(self) -> [f64; LANES] {
        self.data
    }

    /// Add two vectors
    #[inline]
    pub fn add(self, other: Self) -> Self {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            if is_x86_feature_detected!("avx") {
                let a = _mm256_loadu_pd(self.data.as_ptr());
                let b = _mm256_loadu_pd(other.data.as_ptr());
                let r = _mm256_add_pd(a, b);
                let mut result = Self::zero();
                _mm256_storeu_pd(result.data.as_mut_ptr(), r);
                return result;
            }
        }

        self.zip(other, |a, b| a + b)
    }

    /// Subtract two vectors
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            if is_x86_feature_detected!("avx") {
                let a = _mm256_loadu_pd(self.data.as_ptr());
                let b = _mm256_loadu_pd(other.data.as_ptr());
                let r = _mm256_sub_pd(a, b);
                let mut result = Self::zero();
                _mm256_storeu_pd(result.data.as_mut_ptr(), r);
                return result;
            }
        }

        self.zip(other, |a, b| a - b)
    }

    /// Multiply two vectors element-wise
    #[inline]
    pub fn mul(self, other: Self) -> Self {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            if is_x86_feature_detected!("avx") {
                let a = _mm256_loadu_pd(self.data.as_ptr());
                let b = _mm256_loadu_pd(other.data.as_ptr());
                let r = _mm256_mul_pd(a, b);
                let mut result = Self::zero();
                _mm256_storeu_pd(result.data.as_mut_ptr(), r);
                return result;
            }
        }

        self.zip(other, |a, b| a * b)
    }

    /// Lane-wise minimum.
    ///
    /// A lane of `other` replaces the lane of `self` only when it compares
    /// strictly less, so NaN lanes in `other` are skipped.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            if is_x86_feature_detected!("avx") {
                let acc = _mm256_loadu_pd(self.data.as_ptr());
                let v = _mm256_loadu_pd(other.data.as_ptr());
                // minpd(a, b) is `a < b ? a : b`
                let r = _mm256_min_pd(v, acc);
                let mut result = Self::zero();
                _mm256_storeu_pd(result.data.as_mut_ptr(), r);
                return result;
            }
        }

        self.zip(other, |acc, v| if v < acc { v } else { acc })
    }

    /// Lane-wise maximum. NaN lanes in `other` are skipped.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            if is_x86_feature_detected!("avx") {
                let acc = _mm256_loadu_pd(self.data.as_ptr());
                let v = _mm256_loadu_pd(other.data.as_ptr());
                let r = _mm256_max_pd(v, acc);
                let mut result = Self::zero();
                _mm256_storeu_pd(result.data.as_mut_ptr(), r);
                return result;
            }
        }

        self.zip(other, |acc, v| if v > acc { v } else { acc })
    }

    /// Horizontal sum
    #[inline]
    pub fn sum(self) -> f64 {
        (self.data[0] + self.data[1]) + (self.data[2] + self.data[3])
    }

    /// Minimum lane, skipping NaN
    #[inline]
    pub fn min_elem(self) -> f64 {
        self.data
            .iter()
            .fold(f64::INFINITY, |acc, &v| if v < acc { v } else { acc })
    }

    /// Maximum lane, skipping NaN
    #[inline]
    pub fn max_elem(self) -> f64 {
        self.data
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &v| if v > acc { v } else { acc })
    }

    #[inline]
    fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut result = Self::zero();
        for i in 0..LANES {
            result.data[i] = f(self.data[i], other.data[i]);
        }
        result
    }
}

/// Sum of all values.
pub fn sum(data: &[f64]) -> f64 {
    let mut chunks = data.chunks_exact(LANES);
    let mut acc = Vec4F64::zero();
    for chunk in &mut chunks {
        acc = acc.add(Vec4F64::load(chunk));
    }

    let mut total = acc.sum();
    for &x in chunks.remainder() {
        total += x;
    }
    total
}

/// Smallest non-NaN value, or NaN when `data` is empty or all NaN.
pub fn min(data: &[f64]) -> f64 {
    let mut chunks = data.chunks_exact(LANES);
    let mut acc = Vec4F64::splat(f64::INFINITY);
    for chunk in &mut chunks {
        acc = acc.min(Vec4F64::load(chunk));
    }

    let mut result = acc.min_elem();
    for &x in chunks.remainder() {
        if x < result {
            result = x;
        }
    }

    if result == f64::INFINITY && !data.iter().any(|&x| x == f64::INFINITY) {
        return f64::NAN;
    }
    result
}

/// Largest non-NaN value, or NaN when `data` is empty or all NaN.
pub fn max(data: &[f64]) -> f64 {
    let mut chunks = data.chunks_exact(LANES);
    let mut acc = Vec4F64::splat(f64::NEG_INFINITY);
    for chunk in &mut chunks {
        acc = acc.max(Vec4F64::load(chunk));
    }

    let mut result = acc.max_elem();
    for &x in chunks.remainder() {
        if x > result {
            result = x;
        }
    }

    if result == f64::NEG_INFINITY && !data.iter().any(|&x| x == f64::NEG_INFINITY) {
        return f64::NAN;
    }
    result
}

/// Sum of squared deviations from `mean`.
///
/// Returns positive infinity as soon as an infinite input is seen.
pub fn sum_squared_deviation(data: &[f64], mean: f64) -> f64 {
    let mut chunks = data.chunks_exact(LANES);
    let centre = Vec4F64::splat(mean);
    let mut acc = Vec4F64::zero();
    for chunk in &mut chunks {
        if chunk.iter().any(|x| x.is_infinite()) {
            return f64::INFINITY;
        }
        let diff = Vec4F64::load(chunk).sub(centre);
        acc = acc.add(diff.mul(diff));
    }

    let mut total = acc.sum();
    for &x in chunks.remainder() {
        if x.is_infinite() {
            return f64::INFINITY;
        }
        let diff = x - mean;
        total += diff * diff;
    }
    total
}
