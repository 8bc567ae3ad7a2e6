//! Custom input parsing and the binary-search precondition.
//!
//! Parsing happens before any player or race state is touched, so a
//! rejected input leaves everything as it was.

use std::fmt;

use crate::algorithm::AlgorithmKind;
use crate::array::{is_sorted, sorted_copy};
use crate::error::InputError;

/// Minimum number of elements in a custom array.
pub const MIN_CUSTOM_LEN: usize = 2;

/// Maximum number of elements in a custom array.
pub const MAX_CUSTOM_LEN: usize = 100;

/// Parse comma- or whitespace-separated integers.
pub fn parse_array(text: &str) -> Result<Vec<i64>, InputError> {
    let array = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| InputError::InvalidNumber(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if array.len() < MIN_CUSTOM_LEN {
        return Err(InputError::TooFewElements {
            min: MIN_CUSTOM_LEN,
            got: array.len(),
        });
    }
    if array.len() > MAX_CUSTOM_LEN {
        return Err(InputError::TooManyElements {
            max: MAX_CUSTOM_LEN,
            got: array.len(),
        });
    }

    Ok(array)
}

/// Parse an optional search target. Blank input means "pick one for me".
pub fn parse_target(text: &str) -> Result<Option<i64>, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<i64>()
        .map(Some)
        .map_err(|_| InputError::InvalidTarget(text.to_string()))
}

/// A validated custom array and optional search target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomInput {
    pub array: Vec<i64>,
    pub target: Option<i64>,
}

impl CustomInput {
    /// Parse both fields; the target text is ignored unless searching.
    pub fn parse(array_text: &str, target_text: &str, searching: bool) -> Result<Self, InputError> {
        let array = parse_array(array_text)?;
        let target = if searching {
            parse_target(target_text)?
        } else {
            None
        };
        Ok(Self { array, target })
    }
}

/// Advisory shown next to the visualization. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Advisory {
    /// The array was sorted because binary search needs sorted input.
    AutoSortedForBinarySearch,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::AutoSortedForBinarySearch => write!(
                f,
                "Binary Search requires a sorted array. The array has been automatically sorted."
            ),
        }
    }
}

/// Input ready for trace generation or a race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedInput {
    pub array: Vec<i64>,
    pub advisory: Option<Advisory>,
}

/// Enforce input preconditions for every algorithm in `algorithms`.
///
/// This is the single place where the binary-search sort happens: if any of
/// the algorithms needs sorted input the returned array is sorted and, when
/// that changed anything, an advisory is attached.
pub fn prepare_input<'a, I>(algorithms: I, array: &[i64]) -> PreparedInput
where
    I: IntoIterator<Item = &'a AlgorithmKind>,
{
    let needs_sorted = algorithms.into_iter().any(|k| k.requires_sorted_input());

    if needs_sorted {
        let advisory = (!is_sorted(array)).then_some(Advisory::AutoSortedForBinarySearch);
        PreparedInput {
            array: sorted_copy(array),
            advisory,
        }
    } else {
        PreparedInput {
            array: array.to_vec(),
            advisory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators() {
        assert_eq!(parse_array("5, 2 9,1\t5\n6").unwrap(), vec![5, 2, 9, 1, 5, 6]);
        assert_eq!(parse_array("-3,,  4").unwrap(), vec![-3, 4]);
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert_eq!(
            parse_array("1, two, 3"),
            Err(InputError::InvalidNumber("two".into()))
        );
    }

    #[test]
    fn enforces_length_bounds() {
        assert_eq!(
            parse_array("7"),
            Err(InputError::TooFewElements { min: 2, got: 1 })
        );
        assert_eq!(
            parse_array(""),
            Err(InputError::TooFewElements { min: 2, got: 0 })
        );

        let long = (0..101).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
        assert_eq!(
            parse_array(&long),
            Err(InputError::TooManyElements { max: 100, got: 101 })
        );

        let max = (0..100).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        assert_eq!(parse_array(&max).unwrap().len(), 100);
    }

    #[test]
    fn target_parsing() {
        assert_eq!(parse_target("  "), Ok(None));
        assert_eq!(parse_target(" 42 "), Ok(Some(42)));
        assert_eq!(parse_target("x"), Err(InputError::InvalidTarget("x".into())));
    }

    #[test]
    fn custom_input_ignores_target_when_sorting() {
        let input = CustomInput::parse("3 1", "not a number", false).unwrap();
        assert_eq!(input.target, None);
        assert!(CustomInput::parse("3 1", "not a number", true).is_err());
        assert_eq!(CustomInput::parse("3 1", "1", true).unwrap().target, Some(1));
    }

    #[test]
    fn binary_search_gets_sorted_input_with_advisory() {
        let prepared = prepare_input(&[AlgorithmKind::BinarySearch], &[9, 1, 4]);
        assert_eq!(prepared.array, vec![1, 4, 9]);
        assert_eq!(prepared.advisory, Some(Advisory::AutoSortedForBinarySearch));
    }

    #[test]
    fn already_sorted_input_needs_no_advisory() {
        let prepared = prepare_input(&[AlgorithmKind::BinarySearch], &[1, 4, 9]);
        assert_eq!(prepared.array, vec![1, 4, 9]);
        assert_eq!(prepared.advisory, None);
    }

    #[test]
    fn other_algorithms_leave_input_alone() {
        let prepared = prepare_input(
            &[AlgorithmKind::LinearSearch, AlgorithmKind::QuickSort],
            &[9, 1, 4],
        );
        assert_eq!(prepared.array, vec![9, 1, 4]);
        assert_eq!(prepared.advisory, None);
    }
}
