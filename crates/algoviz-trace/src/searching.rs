//! Step-recording searching algorithms.
//!
//! A search trace ends with exactly one terminal step carrying `found`.
//! A hit short-circuits the trace; a miss appends a not-found terminal with
//! no highlighted indices.

use crate::step::{Recorder, Trace};

/// Linear scan from the left.
pub fn linear_search(input: &[i64], target: i64) -> Trace {
    let arr = input.to_vec();
    let mut rec = Recorder::default();

    for i in 0..arr.len() {
        rec.compare(&arr, [i]);
        if arr[i] == target {
            return rec.finish_search(&arr, Some(i));
        }
    }

    rec.finish_search(&arr, None)
}

/// Binary search over a sorted slice.
///
/// Comparison steps highlight `[left, mid, right]`. After each narrowing a
/// neutral bounds-update step highlights the new window, or nothing once the
/// window is empty.
pub fn binary_search(input: &[i64], target: i64) -> Trace {
    let arr = input.to_vec();
    let mut rec = Recorder::default();

    // Half-open window [lo, hi); the inclusive right bound is hi - 1.
    let (mut lo, mut hi) = (0usize, arr.len());

    while lo < hi {
        let mid = midpoint(lo, hi);
        rec.compare(&arr, [lo, mid, hi - 1]);

        if arr[mid] == target {
            return rec.finish_search(&arr, Some(mid));
        }

        if arr[mid] < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }

        rec.neutral(&arr, window(lo, hi));
    }

    rec.finish_search(&arr, None)
}

/// floor((left + right) / 2) for the inclusive bounds of `[lo, hi)`.
fn midpoint(lo: usize, hi: usize) -> usize {
    lo + (hi - 1 - lo) / 2
}

fn window(lo: usize, hi: usize) -> Vec<usize> {
    if lo < hi {
        vec![lo, midpoint(lo, hi), hi - 1]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;
    use proptest::prelude::*;

    #[test]
    fn linear_finds_target_after_scanning_prefix() {
        let trace = linear_search(&[4, 2, 9, 1], 9);

        assert_eq!(trace.outcome(), Some(true));
        assert_eq!(trace.comparison_count(), 3);

        let scanned: Vec<_> = trace
            .iter()
            .filter(|s| s.comparison)
            .map(|s| s.indices.clone())
            .collect();
        assert_eq!(scanned, vec![vec![0], vec![1], vec![2]]);

        let last = trace.last().unwrap();
        assert_eq!(last.found, Some(true));
        assert_eq!(last.indices, vec![2]);
    }

    #[test]
    fn linear_miss_ends_with_empty_not_found() {
        let trace = linear_search(&[4, 2, 9, 1], 999);
        assert_eq!(trace.comparison_count(), 4);

        let last = trace.last().unwrap();
        assert_eq!(last.found, Some(false));
        assert!(!last.comparison);
        assert!(last.indices.is_empty());
    }

    #[test]
    fn binary_finds_target_within_log_bound() {
        let trace = binary_search(&[1, 2, 4, 9], 9);
        assert_eq!(trace.outcome(), Some(true));
        assert_eq!(trace.last().unwrap().indices, vec![3]);
        assert!(trace.comparison_count() <= 3);
    }

    #[test]
    fn binary_records_window_and_bounds_update() {
        let trace = binary_search(&[1, 2, 4, 9], 9);

        assert_eq!(trace.steps()[0].indices, vec![0, 1, 3]);
        assert_eq!(trace.steps()[0].kind(), StepKind::Comparison);
        // Target is right of mid: window narrows to [2, 3].
        assert_eq!(trace.steps()[1].kind(), StepKind::Neutral);
        assert_eq!(trace.steps()[1].indices, vec![2, 2, 3]);
    }

    #[test]
    fn binary_miss_ends_with_empty_not_found() {
        let trace = binary_search(&[1, 2, 4, 9], 999);
        let last = trace.last().unwrap();
        assert_eq!(last.found, Some(false));
        assert!(!last.comparison);
        assert!(last.indices.is_empty());
    }

    #[test]
    fn empty_input_only_reports_not_found() {
        for trace in [linear_search(&[], 5), binary_search(&[], 5)] {
            assert_eq!(trace.len(), 1);
            assert_eq!(trace.comparison_count(), 0);
            assert_eq!(trace.outcome(), Some(false));
        }
    }

    #[test]
    fn single_element_hit() {
        let trace = binary_search(&[7], 7);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.steps()[0].indices, vec![0, 0, 0]);
        assert_eq!(trace.outcome(), Some(true));
    }

    proptest! {
        #[test]
        fn searches_agree_with_contains(
            mut input in prop::collection::vec(0i64..30, 0..40),
            target in 0i64..30,
        ) {
            input.sort();
            let expected = input.contains(&target);
            prop_assert_eq!(linear_search(&input, target).outcome(), Some(expected));
            prop_assert_eq!(binary_search(&input, target).outcome(), Some(expected));
        }

        #[test]
        fn search_indices_stay_in_bounds(
            mut input in prop::collection::vec(0i64..30, 0..40),
            target in -5i64..35,
        ) {
            input.sort();
            for trace in [linear_search(&input, target), binary_search(&input, target)] {
                for step in &trace {
                    prop_assert!(step.indices.iter().all(|&i| i < input.len()));
                    prop_assert!(!step.swap);
                }
                prop_assert_eq!(trace.iter().filter(|s| s.found.is_some()).count(), 1);
            }
        }
    }
}
