//! In-place quicksort for `f64` slices.
//!
//! Median-of-three pivot selection over the first, middle and last element
//! of each partition, with insertion sort below [`INSERTION_SORT_THRESHOLD`]
//! elements. Partitioning is three-way, so runs of equal keys (including
//! NaN) are settled in one pass. The smaller side is sorted recursively and
//! the larger side iteratively, which bounds recursion depth to O(log n).
//!
//! # NaN ordering
//!
//! NaN compares greater than every number and equal to every other NaN.
//! Ascending sorts put NaN last; descending sorts put NaN first.

use std::cmp::Ordering;

/// Partitions shorter than this are finished with insertion sort.
pub const INSERTION_SORT_THRESHOLD: usize = 10;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order.
    #[default]
    Forward,
    /// Descending order.
    Reverse,
}

/// Total order on `f64` with NaN greater than every number.
#[inline]
pub fn compare(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

/// Whether `a` belongs strictly before `b` in `direction`.
#[inline]
fn precedes(a: f64, b: f64, direction: Direction) -> bool {
    match direction {
        Direction::Forward => compare(a, b) == Ordering::Less,
        Direction::Reverse => compare(a, b) == Ordering::Greater,
    }
}

/// Sort `data` in place.
pub fn quicksort(data: &mut [f64], direction: Direction) {
    let mut v = data;
    loop {
        if v.len() < INSERTION_SORT_THRESHOLD {
            insertion_sort(v, direction);
            return;
        }

        let (lt, gt) = partition(v, direction);
        let (left, rest) = std::mem::take(&mut v).split_at_mut(lt);
        let right = &mut rest[gt - lt..];

        if left.len() < right.len() {
            quicksort(left, direction);
            v = right;
        } else {
            quicksort(right, direction);
            v = left;
        }
    }
}

/// Stable insertion sort.
pub fn insertion_sort(data: &mut [f64], direction: Direction) {
    for i in 1..data.len() {
        let key = data[i];
        let mut j = i;
        while j > 0 && precedes(key, data[j - 1], direction) {
            data[j] = data[j - 1];
            j -= 1;
        }
        data[j] = key;
    }
}

/// Index of the median of `data[a]`, `data[b]`, `data[c]`.
fn median_of_three(data: &[f64], a: usize, b: usize, c: usize, direction: Direction) -> usize {
    let (x, y, z) = (data[a], data[b], data[c]);
    if precedes(x, y, direction) {
        if precedes(y, z, direction) {
            return b;
        }
        if precedes(x, z, direction) {
            return c;
        }
        return a;
    }
    if precedes(x, z, direction) {
        return a;
    }
    if precedes(y, z, direction) {
        return c;
    }
    b
}

/// Three-way partition around the median of three.
///
/// Returns `(lt, gt)`: `data[..lt]` precedes the pivot, `data[lt..gt]` ties
/// with it and `data[gt..]` follows it. The tie band is never empty.
fn partition(data: &mut [f64], direction: Direction) -> (usize, usize) {
    let last = data.len() - 1;
    let pivot = data[median_of_three(data, 0, last / 2, last, direction)];

    let (mut lt, mut i, mut gt) = (0, 0, data.len());
    while i < gt {
        if precedes(data[i], pivot, direction) {
            data.swap(lt, i);
            lt += 1;
            i += 1;
        } else if precedes(pivot, data[i], direction) {
            gt -= 1;
            data.swap(i, gt);
        } else {
            i += 1;
        }
    }
    (lt, gt)
}
