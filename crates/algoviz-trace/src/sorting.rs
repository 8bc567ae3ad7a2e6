//! Step-recording sorting algorithms.
//!
//! Every generator copies its input and records steps against the private
//! copy. The caller's slice is never touched. Each trace ends with a neutral
//! snapshot of the fully sorted array.

use crate::step::{Recorder, Trace};

/// Bubble sort with early exit on a pass that makes no swaps.
pub fn bubble_sort(input: &[i64]) -> Trace {
    let mut arr = input.to_vec();
    let mut rec = Recorder::default();
    let n = arr.len();

    for i in 0..n {
        let mut swapped = false;

        for j in 0..n - i - 1 {
            rec.compare(&arr, [j, j + 1]);

            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                swapped = true;
                rec.write(&arr, [j, j + 1]);
            }
        }

        if !swapped {
            break;
        }
    }

    rec.finish(&arr)
}

/// Selection sort. Comparison steps highlight the running minimum and the
/// scanned position.
pub fn selection_sort(input: &[i64]) -> Trace {
    let mut arr = input.to_vec();
    let mut rec = Recorder::default();
    let n = arr.len();

    for i in 0..n.saturating_sub(1) {
        let mut min_idx = i;

        for j in i + 1..n {
            rec.compare(&arr, [min_idx, j]);
            if arr[j] < arr[min_idx] {
                min_idx = j;
            }
        }

        if min_idx != i {
            arr.swap(i, min_idx);
            rec.write(&arr, [i, min_idx]);
        }
    }

    rec.finish(&arr)
}

/// Insertion sort. Each leftward shift is a write step; the final
/// insertion of the key is a single-index placement step.
pub fn insertion_sort(input: &[i64]) -> Trace {
    let mut arr = input.to_vec();
    let mut rec = Recorder::default();

    for i in 1..arr.len() {
        let key = arr[i];
        // `hole` is one past the position being compared.
        let mut hole = i;

        rec.compare(&arr, [i, hole - 1]);

        while hole > 0 && arr[hole - 1] > key {
            arr[hole] = arr[hole - 1];
            rec.write(&arr, [hole - 1, hole]);
            hole -= 1;

            if hole > 0 {
                rec.compare(&arr, [i, hole - 1]);
            }
        }

        arr[hole] = key;
        rec.write(&arr, [hole]);
    }

    rec.finish(&arr)
}

/// Top-down merge sort.
pub fn merge_sort(input: &[i64]) -> Trace {
    let mut arr = input.to_vec();
    let mut rec = Recorder::default();

    if arr.len() > 1 {
        let last = arr.len() - 1;
        merge_sort_range(&mut arr, 0, last, &mut rec);
    }

    rec.finish(&arr)
}

fn merge_sort_range(arr: &mut [i64], left: usize, right: usize, rec: &mut Recorder) {
    if left < right {
        let mid = left + (right - left) / 2;
        merge_sort_range(arr, left, mid, rec);
        merge_sort_range(arr, mid + 1, right, rec);
        merge(arr, left, mid, right, rec);
    }
}

fn merge(arr: &mut [i64], left: usize, mid: usize, right: usize, rec: &mut Recorder) {
    let lhs = arr[left..=mid].to_vec();
    let rhs = arr[mid + 1..=right].to_vec();

    let (mut i, mut j, mut k) = (0, 0, left);

    while i < lhs.len() && j < rhs.len() {
        rec.compare(arr, [left + i, mid + 1 + j]);

        if lhs[i] <= rhs[j] {
            arr[k] = lhs[i];
            i += 1;
        } else {
            arr[k] = rhs[j];
            j += 1;
        }

        rec.write(arr, [k]);
        k += 1;
    }

    // Drain whichever half still has elements.
    for &value in lhs[i..].iter().chain(&rhs[j..]) {
        arr[k] = value;
        rec.write(arr, [k]);
        k += 1;
    }
}

/// Quick sort with Lomuto partitioning around the last element.
pub fn quick_sort(input: &[i64]) -> Trace {
    let mut arr = input.to_vec();
    let mut rec = Recorder::default();

    if arr.len() > 1 {
        let last = arr.len() - 1;
        quick_sort_range(&mut arr, 0, last, &mut rec);
    }

    rec.finish(&arr)
}

fn quick_sort_range(arr: &mut [i64], low: usize, high: usize, rec: &mut Recorder) {
    if low < high {
        let pivot = partition(arr, low, high, rec);

        if pivot > low {
            quick_sort_range(arr, low, pivot - 1, rec);
        }
        quick_sort_range(arr, pivot + 1, high, rec);
    }
}

/// Returns the final pivot position.
fn partition(arr: &mut [i64], low: usize, high: usize, rec: &mut Recorder) -> usize {
    let pivot = arr[high];
    // Next slot for an element smaller than the pivot.
    let mut store = low;

    for j in low..high {
        rec.compare(arr, [j, high]);

        if arr[j] < pivot {
            arr.swap(store, j);
            rec.write(arr, [store, j]);
            store += 1;
        }
    }

    arr.swap(store, high);
    rec.write(arr, [store, high]);
    store
}
