//! Race ranking.
//!
//! Ranking is a pure stable sort over [`EntrySummary`] values:
//!
//! 1. completed entries above incomplete ones
//! 2. completed entries by ascending elapsed time
//! 3. incomplete entries by descending progress
//!
//! Entries that compare equal keep their input order.

use std::cmp::Ordering;
use std::fmt;

use algoviz_trace::Category;
use serde::{Deserialize, Serialize};

/// The metrics ranking needs from one race entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub name: String,
    /// 0.0..=100.0
    pub progress: f64,
    pub comparisons: u64,
    pub swaps: u64,
    pub time_elapsed_ms: u64,
    pub completed: bool,
}

fn compare(a: &EntrySummary, b: &EntrySummary) -> Ordering {
    match (a.completed, b.completed) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a.time_elapsed_ms.cmp(&b.time_elapsed_ms),
        (false, false) => b.progress.total_cmp(&a.progress),
    }
}

/// Order entries best first.
pub fn rank(entries: &[EntrySummary]) -> Vec<EntrySummary> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(compare);
    ranked
}

/// Status column of a leaderboard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Completed,
    InProgress { percent: u8 },
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Completed => write!(f, "Completed"),
            EntryStatus::InProgress { percent } => write!(f, "{}% Done", percent),
        }
    }
}

/// One rendered leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    pub status: EntryStatus,
    pub time_elapsed_ms: u64,
    /// Swaps when sorting, comparisons when searching
    pub swaps_or_comparisons: u64,
    pub comparisons: u64,
    /// First place and finished
    pub is_winner: bool,
}

impl fmt::Display for LeaderboardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let place = if self.is_winner {
            "1st".to_string()
        } else {
            self.rank.to_string()
        };
        write!(
            f,
            "{:>3}  {:<16} {:<12} {:>8} {:>6} {:>6}",
            place,
            self.name,
            self.status.to_string(),
            format_seconds(self.time_elapsed_ms),
            self.swaps_or_comparisons,
            self.comparisons
        )
    }
}

/// Milliseconds as seconds with two decimals, e.g. `"1.23s"`.
pub fn format_seconds(ms: u64) -> String {
    format!("{:.2}s", ms as f64 / 1000.0)
}

/// Rank `entries` and render them as rows for `category`.
pub fn leaderboard(category: Category, entries: &[EntrySummary]) -> Vec<LeaderboardRow> {
    rank(entries)
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let status = if entry.completed {
                EntryStatus::Completed
            } else {
                EntryStatus::InProgress {
                    percent: entry.progress.clamp(0.0, 100.0).round() as u8,
                }
            };
            let swaps_or_comparisons = match category {
                Category::Sorting => entry.swaps,
                Category::Searching => entry.comparisons,
            };
            LeaderboardRow {
                rank: i + 1,
                is_winner: i == 0 && entry.completed,
                name: entry.name,
                status,
                time_elapsed_ms: entry.time_elapsed_ms,
                swaps_or_comparisons,
                comparisons: entry.comparisons,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn done(name: &str, ms: u64) -> EntrySummary {
        EntrySummary {
            name: name.to_string(),
            progress: 100.0,
            comparisons: 10,
            swaps: 4,
            time_elapsed_ms: ms,
            completed: true,
        }
    }

    fn running(name: &str, progress: f64) -> EntrySummary {
        EntrySummary {
            name: name.to_string(),
            progress,
            comparisons: 7,
            swaps: 2,
            time_elapsed_ms: 900,
            completed: false,
        }
    }

    fn names(entries: &[EntrySummary]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn completed_first_then_by_time() {
        let entries = [done("A", 500), running("B", 80.0), done("C", 200)];
        assert_eq!(names(&rank(&entries)), vec!["C", "A", "B"]);
    }

    #[test]
    fn incomplete_by_descending_progress() {
        let entries = [running("A", 10.0), running("B", 60.5), running("C", 33.0)];
        assert_eq!(names(&rank(&entries)), vec!["B", "C", "A"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let entries = [done("A", 300), done("B", 300), running("C", 5.0), running("D", 5.0)];
        assert_eq!(names(&rank(&entries)), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn empty_input_ranks_empty() {
        assert!(rank(&[]).is_empty());
        assert!(leaderboard(Category::Sorting, &[]).is_empty());
    }

    #[test]
    fn rows_pick_column_by_category() {
        let entries = [done("Quick Sort", 1234), running("Bubble Sort", 41.6)];

        let rows = leaderboard(Category::Sorting, &entries);
        assert_eq!(rows[0].rank, 1);
        assert!(rows[0].is_winner);
        assert_eq!(rows[0].status, EntryStatus::Completed);
        assert_eq!(rows[0].swaps_or_comparisons, 4);
        assert_eq!(rows[1].status, EntryStatus::InProgress { percent: 42 });
        assert!(!rows[1].is_winner);

        let rows = leaderboard(Category::Searching, &entries);
        assert_eq!(rows[0].swaps_or_comparisons, 10);
    }

    #[test]
    fn no_winner_until_someone_finishes() {
        let rows = leaderboard(Category::Sorting, &[running("A", 90.0)]);
        assert!(!rows[0].is_winner);
    }

    #[test]
    fn row_rendering() {
        assert_eq!(format_seconds(1234), "1.23s");
        assert_eq!(format_seconds(0), "0.00s");
        assert_eq!(EntryStatus::InProgress { percent: 7 }.to_string(), "7% Done");

        let rows = leaderboard(Category::Sorting, &[done("Merge Sort", 2500), running("X", 3.0)]);
        let first = rows[0].to_string();
        assert!(first.contains("1st"));
        assert!(first.contains("2.50s"));
        assert!(rows[1].to_string().contains("3% Done"));
    }

    fn arb_entry() -> impl Strategy<Value = EntrySummary> {
        (any::<bool>(), 0.0f64..100.0, 0u64..10_000).prop_map(|(completed, progress, ms)| {
            EntrySummary {
                name: String::new(),
                progress: if completed { 100.0 } else { progress },
                comparisons: 0,
                swaps: 0,
                time_elapsed_ms: ms,
                completed,
            }
        })
    }

    proptest! {
        #[test]
        fn ranking_is_an_ordered_permutation(entries in prop::collection::vec(arb_entry(), 0..20)) {
            let ranked = rank(&entries);
            prop_assert_eq!(ranked.len(), entries.len());

            for pair in ranked.windows(2) {
                prop_assert!(compare(&pair[0], &pair[1]) != Ordering::Greater);
            }
            let done = entries.iter().filter(|e| e.completed).count();
            prop_assert!(ranked[..done].iter().all(|e| e.completed));
        }
    }
}
