//! Comprehensive FloatVec tests
//!
//! Tests for FloatVec operations including:
//! - Construction (growable, fixed)
//! - Insertion and removal at both ends and in the middle
//! - Reverse, sort and tolerance-aware search
//! - Statistics and cumulative sums
//! - Copy and release semantics

use floatkit_numeric::{Direction, Error, FloatVec, Measure, StorageKind};

fn vector_of(values: &[f64]) -> FloatVec<'static> {
    FloatVec::from_slice(values).unwrap()
}

// ============================================================
// Construction Tests
// ============================================================

mod construction_tests {
    use super::*;

    #[test]
    fn test_init_growable() {
        let v = FloatVec::new(5).unwrap();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 5);
        assert!(v.is_growable());
        assert!(v.is_empty());
    }

    #[test]
    fn test_init_zero_capacity() {
        assert!(matches!(FloatVec::new(0), Err(Error::InvalidArgument(_))));

        let mut storage: [f64; 0] = [];
        assert!(matches!(
            FloatVec::fixed(&mut storage),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_init_fixed() {
        let mut storage = [0.0; 10];
        let v = FloatVec::fixed(&mut storage).unwrap();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 10);
        assert_eq!(v.kind(), StorageKind::Fixed);
    }

    #[test]
    fn test_measure() {
        let mut v = FloatVec::new(3).unwrap();
        v.push_back(1.0).unwrap();
        assert_eq!(v.size(), 1);
        assert_eq!(v.alloc(), 3);
    }
}

// ============================================================
// Insertion Tests
// ============================================================

mod insertion_tests {
    use super::*;

    #[test]
    fn test_push_back_basic() {
        let mut v = FloatVec::new(2).unwrap();
        v.push_back(1.0).unwrap();
        v.push_back(2.0).unwrap();
        v.push_back(3.0).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn test_push_back_special_values() {
        let mut v = FloatVec::new(3).unwrap();
        v.push_back(f64::INFINITY).unwrap();
        v.push_back(f64::NEG_INFINITY).unwrap();
        v.push_back(f64::NAN).unwrap();
        assert_eq!(v.get(0).unwrap(), f64::INFINITY);
        assert_eq!(v.get(1).unwrap(), f64::NEG_INFINITY);
        assert!(v.get(2).unwrap().is_nan());
    }

    #[test]
    fn test_push_back_fixed_full() {
        let mut storage = [0.0; 2];
        let mut v = FloatVec::fixed(&mut storage).unwrap();
        v.push_back(1.0).unwrap();
        v.push_back(2.0).unwrap();
        assert!(matches!(v.push_back(3.0), Err(Error::InvalidArgument(_))));
        assert_eq!(v.len(), 2);
        assert_eq!(v.capacity(), 2);
    }

    #[test]
    fn test_fixed_writes_through_to_storage() {
        let mut storage = [9.0; 3];
        {
            let mut v = FloatVec::fixed(&mut storage).unwrap();
            v.push_back(4.0).unwrap();
            v.push_front(3.0).unwrap();
        }
        assert_eq!(storage, [3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_push_front_basic() {
        let mut v = FloatVec::new(1).unwrap();
        v.push_front(1.0).unwrap();
        v.push_front(2.0).unwrap();
        v.push_front(3.0).unwrap();
        assert_eq!(v.as_slice(), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_push_front_fixed_full() {
        let mut storage = [0.0; 1];
        let mut v = FloatVec::fixed(&mut storage).unwrap();
        v.push_front(1.0).unwrap();
        assert!(matches!(v.push_front(2.0), Err(Error::InvalidArgument(_))));
        assert_eq!(v.as_slice(), &[1.0]);
    }

    #[test]
    fn test_insert_middle_and_end() {
        let mut v = vector_of(&[1.0, 3.0]);
        v.insert(1, 2.0).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
        v.insert(3, 4.0).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        v.insert(0, 0.0).unwrap();
        assert_eq!(v.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut v = vector_of(&[1.0, 2.0]);
        assert_eq!(v.insert(3, 9.0), Err(Error::Range { index: 3, len: 2 }));
        assert_eq!(v.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_insert_fixed_bounds() {
        let mut storage = [0.0; 3];
        let mut v = FloatVec::fixed(&mut storage).unwrap();
        v.insert(0, 1.0).unwrap();
        v.insert(1, 3.0).unwrap();
        v.insert(1, 2.0).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
        assert!(matches!(v.insert(1, 5.0), Err(Error::InvalidArgument(_))));
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_update() {
        let mut v = vector_of(&[1.0, 2.0, 3.0]);
        v.set(1, 20.0).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 20.0, 3.0]);
        assert_eq!(v.set(3, 0.0), Err(Error::Range { index: 3, len: 3 }));

        let mut empty = FloatVec::new(2).unwrap();
        assert!(matches!(empty.set(0, 1.0), Err(Error::Range { .. })));
    }
}

// ============================================================
// Removal Tests
// ============================================================

mod removal_tests {
    use super::*;

    #[test]
    fn test_pop_back() {
        let mut v = vector_of(&[1.0, 2.0, 3.0]);
        assert_eq!(v.pop_back().unwrap(), 3.0);
        assert_eq!(v.pop_back().unwrap(), 2.0);
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_pop_empty() {
        let mut v = FloatVec::new(2).unwrap();
        assert_eq!(v.pop_back(), Err(Error::EmptyContainer));
        assert_eq!(v.pop_front(), Err(Error::EmptyContainer));
        assert_eq!(v.pop_at(0), Err(Error::EmptyContainer));
    }

    #[test]
    fn test_pop_front() {
        let mut v = vector_of(&[1.0, 2.0, 3.0]);
        assert_eq!(v.pop_front().unwrap(), 1.0);
        assert_eq!(v.as_slice(), &[2.0, 3.0]);
    }

    #[test]
    fn test_pop_at() {
        let mut v = vector_of(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.pop_at(1).unwrap(), 2.0);
        assert_eq!(v.as_slice(), &[1.0, 3.0, 4.0]);
        assert_eq!(v.pop_at(2).unwrap(), 4.0);
        assert_eq!(v.pop_at(5), Err(Error::Range { index: 5, len: 2 }));
        assert_eq!(v.as_slice(), &[1.0, 3.0]);
    }

    #[test]
    fn test_pop_fixed_then_push() {
        let mut storage = [0.0; 2];
        let mut v = FloatVec::fixed(&mut storage).unwrap();
        v.push_back(1.0).unwrap();
        v.push_back(2.0).unwrap();
        assert_eq!(v.pop_front().unwrap(), 1.0);
        v.push_back(3.0).unwrap();
        assert_eq!(v.as_slice(), &[2.0, 3.0]);
    }

    #[test]
    fn test_get_out_of_range() {
        let v = vector_of(&[1.0]);
        assert_eq!(v.get(0).unwrap(), 1.0);
        assert_eq!(v.get(1), Err(Error::Range { index: 1, len: 1 }));
    }
}

// ============================================================
// Ordering Tests
// ============================================================

mod ordering_tests {
    use super::*;

    #[test]
    fn test_reverse() {
        let mut v = vector_of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        v.reverse().unwrap();
        assert_eq!(v.as_slice(), &[5.0, 4.0, 3.0, 2.0, 1.0]);

        let mut empty = FloatVec::new(1).unwrap();
        assert_eq!(empty.reverse(), Err(Error::EmptyContainer));
    }

    #[test]
    fn test_sort_forward_and_reverse() {
        let mut v = vector_of(&[5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 0.0, 11.0, 10.0]);
        v.sort(Direction::Forward);
        assert!(v.as_slice().windows(2).all(|w| w[0] <= w[1]));
        v.sort(Direction::Reverse);
        assert!(v.as_slice().windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(v[0], 11.0);
    }

    #[test]
    fn test_sort_edge_cases() {
        let mut single = vector_of(&[1.0]);
        single.sort(Direction::Forward);
        assert_eq!(single.as_slice(), &[1.0]);

        let mut empty = FloatVec::new(1).unwrap();
        empty.sort(Direction::Reverse);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_sort_special_values() {
        let mut v = vector_of(&[1.0, f64::INFINITY, -3.0, f64::NEG_INFINITY, f64::NAN, 0.0]);
        v.sort(Direction::Forward);
        assert_eq!(v[0], f64::NEG_INFINITY);
        assert_eq!(v[4], f64::INFINITY);
        assert!(v[5].is_nan());
    }

    #[test]
    fn test_sort_constant_and_nan_runs() {
        let mut constant = FloatVec::from_slice(&vec![2.5; 100_000]).unwrap();
        constant.sort(Direction::Forward);
        assert_eq!(constant.len(), 100_000);
        assert!(constant.iter().all(|&x| x == 2.5));

        let mut nans = FloatVec::from_slice(&vec![f64::NAN; 100_000]).unwrap();
        nans.sort(Direction::Forward);
        assert!(nans.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_sort_fixed() {
        let mut storage = [0.0; 4];
        let mut v = FloatVec::fixed(&mut storage).unwrap();
        for x in [3.0, 1.0, 4.0, 2.0] {
            v.push_back(x).unwrap();
        }
        v.sort(Direction::Forward);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_binary_search_basic() {
        let mut v = vector_of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(v.binary_search(3.0, 0.0001, false).unwrap(), Some(2));
        assert_eq!(v.binary_search(1.0, 0.0, false).unwrap(), Some(0));
        assert_eq!(v.binary_search(5.0, 0.0, false).unwrap(), Some(4));
        assert_eq!(v.binary_search(0.0, 0.0, false).unwrap(), None);
        assert_eq!(v.binary_search(6.0, 0.0, false).unwrap(), None);
    }

    #[test]
    fn test_binary_search_tolerance() {
        let mut v = vector_of(&[1.0, 2.0, 3.0]);
        assert_eq!(v.binary_search(2.5, 0.1, false).unwrap(), None);
        assert_eq!(v.binary_search(2.05, 0.1, false).unwrap(), Some(1));
    }

    #[test]
    fn test_binary_search_sort_first() {
        let mut v = vector_of(&[5.0, 3.0, 1.0, 4.0, 2.0]);
        assert_eq!(v.binary_search(4.0, 0.0, true).unwrap(), Some(3));
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_binary_search_errors() {
        let mut v = vector_of(&[1.0, 2.0]);
        assert!(matches!(
            v.binary_search(1.0, -0.1, false),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            v.binary_search(f64::NAN, 0.1, false),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            v.binary_search(1.0, f64::NAN, false),
            Err(Error::InvalidArgument(_))
        ));

        let mut empty = FloatVec::new(1).unwrap();
        assert_eq!(
            empty.binary_search(1.0, 0.1, false),
            Err(Error::EmptyContainer)
        );
    }
}

// ============================================================
// Capacity Tests
// ============================================================

mod capacity_tests {
    use super::*;
    use floatkit_numeric::GrowthPolicy;

    #[test]
    fn test_policy_carries_into_results() {
        let policy = GrowthPolicy {
            doubling_threshold: 2,
            fixed_increment: 5,
        };
        let mut v = FloatVec::with_policy(1, policy).unwrap();
        assert_eq!(v.policy(), policy);
        for x in [1.0, 2.0, 3.0] {
            v.push_back(x).unwrap();
        }
        // 1 -> 2 by doubling, then 2 -> 7 by the fixed increment.
        assert_eq!(v.capacity(), 7);

        let mut sums = v.cumulative_sum().unwrap();
        assert_eq!(sums.policy(), policy);
        assert_eq!(sums.capacity(), 3);
        sums.push_back(10.0).unwrap();
        assert_eq!(sums.capacity(), 8);

        assert_eq!(FloatVec::new(1).unwrap().policy(), GrowthPolicy::default());
    }

    #[test]
    fn test_trim_basic() {
        let mut v = FloatVec::new(16).unwrap();
        v.push_back(1.0).unwrap();
        v.push_back(2.0).unwrap();
        v.push_back(3.0).unwrap();
        v.trim().unwrap();
        assert_eq!(v.capacity(), 3);
        v.push_back(4.0).unwrap();
        assert_eq!(v.capacity(), 6);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_trim_fixed_and_optimal() {
        let mut storage = [0.0; 4];
        let mut v = FloatVec::fixed(&mut storage).unwrap();
        v.trim().unwrap();
        assert_eq!(v.capacity(), 4);

        let mut full = vector_of(&[1.0, 2.0]);
        full.trim().unwrap();
        assert_eq!(full.capacity(), 2);
    }

    #[test]
    fn test_trim_empty() {
        let mut v = FloatVec::new(4).unwrap();
        assert_eq!(v.trim(), Err(Error::EmptyContainer));
        assert_eq!(v.capacity(), 4);
    }
}

// ============================================================
// Statistics Tests
// ============================================================

mod statistics_tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let v = vector_of(&[3.0, -1.0, 4.0, 1.0, 5.0, -9.0, 2.0, 6.0, 5.0, 3.0]);
        assert_eq!(v.min().unwrap(), -9.0);
        assert_eq!(v.max().unwrap(), 6.0);
    }

    #[test]
    fn test_min_max_special_values() {
        let v = vector_of(&[1.0, f64::INFINITY, f64::NAN, -2.0, f64::NEG_INFINITY]);
        assert_eq!(v.min().unwrap(), f64::NEG_INFINITY);
        assert_eq!(v.max().unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_min_max_fixed() {
        let mut storage = [0.0; 3];
        let mut v = FloatVec::fixed(&mut storage).unwrap();
        v.push_back(-1.0).unwrap();
        v.push_back(7.0).unwrap();
        assert_eq!(v.min().unwrap(), -1.0);
        assert_eq!(v.max().unwrap(), 7.0);
    }

    #[test]
    fn test_reductions_empty() {
        let v = FloatVec::new(4).unwrap();
        assert_eq!(v.min(), Err(Error::EmptyContainer));
        assert_eq!(v.max(), Err(Error::EmptyContainer));
        assert_eq!(v.sum(), Err(Error::EmptyContainer));
        assert_eq!(v.average(), Err(Error::EmptyContainer));
        assert!(matches!(v.cumulative_sum(), Err(Error::EmptyContainer)));
    }

    #[test]
    fn test_sum_average() {
        let v = vector_of(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(v.sum().unwrap(), 45.0);
        assert_eq!(v.average().unwrap(), 5.0);

        let negative = vector_of(&[-1.0, -2.0, -3.0]);
        assert_eq!(negative.sum().unwrap(), -6.0);
        assert_eq!(negative.average().unwrap(), -2.0);
    }

    #[test]
    fn test_sum_special_values() {
        let v = vector_of(&[1.0, f64::INFINITY, 2.0]);
        assert_eq!(v.sum().unwrap(), f64::INFINITY);
        let v = vector_of(&[1.0, f64::NAN]);
        assert!(v.sum().unwrap().is_nan());
    }

    #[test]
    fn test_std_dev() {
        let v = vector_of(&[2.0, 4.0, 4.0, 6.0]);
        assert!((v.std_dev().unwrap() - 2.0_f64.sqrt()).abs() < 1e-12);

        let same = vector_of(&[3.0, 3.0, 3.0, 3.0, 3.0]);
        assert_eq!(same.std_dev().unwrap(), 0.0);
    }

    #[test]
    fn test_std_dev_needs_two() {
        let single = vector_of(&[1.0]);
        assert_eq!(single.std_dev(), Err(Error::EmptyContainer));
    }

    #[test]
    fn test_std_dev_infinite() {
        let v = vector_of(&[1.0, 2.0, 3.0, 4.0, 5.0, f64::INFINITY]);
        assert_eq!(v.std_dev().unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_cumulative_sum() {
        let v = vector_of(&[1.0, -2.0, 3.0, -4.0]);
        let cum = v.cumulative_sum().unwrap();
        assert_eq!(cum.as_slice(), &[1.0, -1.0, 2.0, -2.0]);
        assert!(cum.is_growable());
    }

    #[test]
    fn test_cumulative_sum_infinite_tail() {
        let v = vector_of(&[1.0, f64::INFINITY, 2.0, f64::NAN]);
        let cum = v.cumulative_sum().unwrap();
        assert_eq!(
            cum.as_slice(),
            &[1.0, f64::INFINITY, f64::INFINITY, f64::INFINITY]
        );

        let v = vector_of(&[1.0, f64::NEG_INFINITY, 5.0]);
        let cum = v.cumulative_sum().unwrap();
        assert_eq!(cum.as_slice(), &[1.0, f64::NEG_INFINITY, f64::NEG_INFINITY]);
    }

    #[test]
    fn test_cumulative_sum_nan() {
        let v = vector_of(&[1.0, f64::NAN, 2.0]);
        assert!(matches!(
            v.cumulative_sum(),
            Err(Error::InvalidArgument(_))
        ));
    }
}

// ============================================================
// Copy and Release Tests
// ============================================================

mod copy_tests {
    use super::*;

    #[test]
    fn test_copy_independent() {
        let mut original = FloatVec::new(8).unwrap();
        original.push_back(1.0).unwrap();
        original.push_back(2.0).unwrap();

        let copy = original.try_clone().unwrap();
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.capacity(), 8);

        original.set(0, 100.0).unwrap();
        original.push_back(3.0).unwrap();
        assert_eq!(copy.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_copy_of_fixed_is_growable() {
        let mut storage = [0.0; 3];
        let mut fixed = FloatVec::fixed(&mut storage).unwrap();
        fixed.push_back(5.0).unwrap();

        let mut copy = fixed.try_clone().unwrap();
        assert_eq!(copy.kind(), StorageKind::Growable);
        assert_eq!(copy.capacity(), 3);
        for _ in 0..5 {
            copy.push_back(1.0).unwrap();
        }
        assert_eq!(copy.len(), 6);
    }

    #[test]
    fn test_release() {
        let v = FloatVec::new(4).unwrap();
        assert!(v.release().is_ok());

        let mut storage = [1.0; 2];
        let fixed = FloatVec::fixed(&mut storage).unwrap();
        assert!(matches!(fixed.release(), Err(Error::PermissionDenied(_))));
        storage[0] = 4.0;
        assert_eq!(storage, [4.0, 0.0]);
    }
}
