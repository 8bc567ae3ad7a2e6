//! Algorithm Step Traces
//!
//! Pure, deterministic step generation for the visualized sorting and
//! searching algorithms.
//!
//! # Model
//!
//! Running an algorithm produces a [`Trace`]: an ordered list of [`Step`]s,
//! each holding a full snapshot of the working array, the positions involved,
//! and whether the step was a comparison, a write, or a search terminal.
//!
//! ```text
//! input [5,3,4,1,2] ──► bubble_sort ──► [cmp(0,1), swap(0,1), cmp(1,2), ..., final]
//! ```
//!
//! Generators never mutate the caller's slice. No timers, no state: the
//! player and the race in `algoviz-vis` own everything that moves.
//!
//! # Usage
//!
//! ```
//! use algoviz_trace::AlgorithmKind;
//!
//! let trace = AlgorithmKind::QuickSort.generate(&[5, 3, 4, 1, 2], None).unwrap();
//! assert_eq!(trace.final_array(), Some(&[1, 2, 3, 4, 5][..]));
//! ```

mod algorithm;
mod array;
mod error;
mod input;
mod searching;
mod sorting;
mod step;

pub use algorithm::{AlgorithmKind, Category, Complexity};
pub use array::{generate_array, is_sorted, random_target, sorted_copy, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE};
pub use error::{InputError, Result, TraceError};
pub use input::{
    parse_array, parse_target, prepare_input, Advisory, CustomInput, PreparedInput,
    MAX_CUSTOM_LEN, MIN_CUSTOM_LEN,
};
pub use searching::{binary_search, linear_search};
pub use sorting::{bubble_sort, insertion_sort, merge_sort, quick_sort, selection_sort};
pub use step::{Step, StepKind, Trace};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_array_is_never_mutated() {
        let input = vec![5, 3, 4, 1, 2];
        for kind in AlgorithmKind::ALL {
            let _ = kind.generate(&input, Some(4)).unwrap();
            assert_eq!(input, vec![5, 3, 4, 1, 2], "{} mutated its input", kind);
        }
    }

    #[test]
    fn every_trace_is_deterministic() {
        let input = [9, 4, 7, 1, 8, 2];
        for kind in AlgorithmKind::ALL {
            let prepared = prepare_input(&[kind], &input);
            let first = kind.generate(&prepared.array, Some(7)).unwrap();
            let second = kind.generate(&prepared.array, Some(7)).unwrap();
            assert_eq!(first, second, "{} is not deterministic", kind);
        }
    }
}
