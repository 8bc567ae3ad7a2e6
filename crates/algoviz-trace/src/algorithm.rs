//! The closed set of visualized algorithms.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TraceError};
use crate::searching::{binary_search, linear_search};
use crate::sorting::{bubble_sort, insertion_sort, merge_sort, quick_sort, selection_sort};
use crate::step::Trace;

/// Which family an algorithm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    #[default]
    Sorting,
    Searching,
}

impl Category {
    /// Algorithms in this category, in display order.
    pub fn algorithms(self) -> &'static [AlgorithmKind] {
        match self {
            Category::Sorting => &AlgorithmKind::SORTING,
            Category::Searching => &AlgorithmKind::SEARCHING,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Sorting => write!(f, "sorting"),
            Category::Searching => write!(f, "searching"),
        }
    }
}

/// Asymptotic cost labels shown next to an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

/// A sorting or searching algorithm with a step generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AlgorithmKind {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    LinearSearch,
    BinarySearch,
}

impl AlgorithmKind {
    /// Sorting algorithms, in display order.
    pub const SORTING: [Self; 5] = [
        Self::BubbleSort,
        Self::SelectionSort,
        Self::InsertionSort,
        Self::MergeSort,
        Self::QuickSort,
    ];

    /// Searching algorithms, in display order.
    pub const SEARCHING: [Self; 2] = [Self::LinearSearch, Self::BinarySearch];

    /// Every algorithm.
    pub const ALL: [Self; 7] = [
        Self::BubbleSort,
        Self::SelectionSort,
        Self::InsertionSort,
        Self::MergeSort,
        Self::QuickSort,
        Self::LinearSearch,
        Self::BinarySearch,
    ];

    /// Stable identifier, e.g. `"quickSort"`.
    pub const fn id(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubbleSort",
            Self::SelectionSort => "selectionSort",
            Self::InsertionSort => "insertionSort",
            Self::MergeSort => "mergeSort",
            Self::QuickSort => "quickSort",
            Self::LinearSearch => "linearSearch",
            Self::BinarySearch => "binarySearch",
        }
    }

    /// Human-readable name, e.g. `"Quick Sort"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BubbleSort => "Bubble Sort",
            Self::SelectionSort => "Selection Sort",
            Self::InsertionSort => "Insertion Sort",
            Self::MergeSort => "Merge Sort",
            Self::QuickSort => "Quick Sort",
            Self::LinearSearch => "Linear Search",
            Self::BinarySearch => "Binary Search",
        }
    }

    pub const fn category(self) -> Category {
        match self {
            Self::LinearSearch | Self::BinarySearch => Category::Searching,
            _ => Category::Sorting,
        }
    }

    pub const fn is_search(self) -> bool {
        matches!(self.category(), Category::Searching)
    }

    /// True if the algorithm only works on sorted input.
    pub const fn requires_sorted_input(self) -> bool {
        matches!(self, Self::BinarySearch)
    }

    pub const fn complexity(self) -> Complexity {
        let (best, average, worst, space) = match self {
            Self::BubbleSort => ("O(n)", "O(n²)", "O(n²)", "O(1)"),
            Self::SelectionSort => ("O(n²)", "O(n²)", "O(n²)", "O(1)"),
            Self::InsertionSort => ("O(n)", "O(n²)", "O(n²)", "O(1)"),
            Self::MergeSort => ("O(n log n)", "O(n log n)", "O(n log n)", "O(n)"),
            Self::QuickSort => ("O(n log n)", "O(n log n)", "O(n²)", "O(log n)"),
            Self::LinearSearch => ("O(1)", "O(n)", "O(n)", "O(1)"),
            Self::BinarySearch => ("O(1)", "O(log n)", "O(log n)", "O(1)"),
        };
        Complexity {
            best,
            average,
            worst,
            space,
        }
    }

    /// Generate the step trace for `array`.
    ///
    /// Searches require a `target`; sorts ignore it. Binary search assumes
    /// the caller has already sorted `array` (see [`crate::prepare_input`]).
    pub fn generate(self, array: &[i64], target: Option<i64>) -> Result<Trace> {
        let trace = match self {
            Self::BubbleSort => bubble_sort(array),
            Self::SelectionSort => selection_sort(array),
            Self::InsertionSort => insertion_sort(array),
            Self::MergeSort => merge_sort(array),
            Self::QuickSort => quick_sort(array),
            Self::LinearSearch => linear_search(array, target.ok_or(TraceError::MissingTarget(self))?),
            Self::BinarySearch => binary_search(array, target.ok_or(TraceError::MissingTarget(self))?),
        };
        Ok(trace)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| TraceError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.id().parse::<AlgorithmKind>().unwrap(), kind);
        }
        assert!(matches!(
            "bogoSort".parse::<AlgorithmKind>(),
            Err(TraceError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn categories_partition_all() {
        let sorting = Category::Sorting.algorithms();
        let searching = Category::Searching.algorithms();
        assert_eq!(sorting.len() + searching.len(), AlgorithmKind::ALL.len());
        assert!(sorting.iter().all(|k| !k.is_search()));
        assert!(searching.iter().all(|k| k.is_search()));
    }

    #[test]
    fn search_without_target_is_rejected() {
        assert_eq!(
            AlgorithmKind::LinearSearch.generate(&[1, 2], None),
            Err(TraceError::MissingTarget(AlgorithmKind::LinearSearch))
        );
        assert!(AlgorithmKind::QuickSort.generate(&[2, 1], None).is_ok());
    }

    #[test]
    fn dispatch_reaches_each_generator() {
        let input = [5, 3, 4, 1, 2];
        for kind in AlgorithmKind::SORTING {
            let trace = kind.generate(&input, None).unwrap();
            assert_eq!(trace.final_array(), Some(&[1, 2, 3, 4, 5][..]), "{}", kind);
        }
        for kind in AlgorithmKind::SEARCHING {
            let trace = kind.generate(&[1, 2, 3, 4, 5], Some(4)).unwrap();
            assert_eq!(trace.outcome(), Some(true), "{}", kind);
        }
    }

    #[test]
    fn only_binary_search_requires_sorted_input() {
        let needs_sort: Vec<_> = AlgorithmKind::ALL
            .into_iter()
            .filter(|k| k.requires_sorted_input())
            .collect();
        assert_eq!(needs_sort, vec![AlgorithmKind::BinarySearch]);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(AlgorithmKind::MergeSort.to_string(), "Merge Sort");
        assert_eq!(AlgorithmKind::BinarySearch.complexity().average, "O(log n)");
    }
}
