//! Random input arrays and small slice helpers.

use rand::seq::SliceRandom;
use rand::Rng;

/// Smallest value drawn for a generated array.
pub const DEFAULT_MIN_VALUE: i64 = 5;

/// Largest value drawn for a generated array.
pub const DEFAULT_MAX_VALUE: i64 = 100;

/// Draw `size` values uniformly from `[min, max]` inclusive.
///
/// Bounds given in the wrong order are swapped.
pub fn generate_array<R: Rng + ?Sized>(rng: &mut R, size: usize, min: i64, max: i64) -> Vec<i64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    (0..size).map(|_| rng.gen_range(lo..=hi)).collect()
}

/// Pick a random element of `array` to search for.
pub fn random_target<R: Rng + ?Sized>(rng: &mut R, array: &[i64]) -> Option<i64> {
    array.choose(rng).copied()
}

/// True if `array` is in non-decreasing order.
pub fn is_sorted(array: &[i64]) -> bool {
    array.windows(2).all(|w| w[0] <= w[1])
}

/// An ascending copy of `array`.
pub fn sorted_copy(array: &[i64]) -> Vec<i64> {
    let mut sorted = array.to_vec();
    sorted.sort_unstable();
    sorted
}
