//! Algorithm Visualization Engine
//!
//! Timed playback of algorithm traces and simulated algorithm races.
//!
//! # Architecture
//!
//! - **Scheduler**: injectable periodic timers, virtual or tokio-backed
//! - **Player**: replays one trace step by step with pause and reset
//! - **Race**: advances several synthetic progress simulations on one timer
//! - **Leaderboard**: ranks race entries and renders rows
//!
//! Nothing here owns a thread or a runtime. Components hold a [`TimerId`]
//! and receive ticks through [`Tickable`], so tests drive them on a
//! [`VirtualScheduler`] and the demo binary on a [`TokioScheduler`].
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use algoviz_trace::AlgorithmKind;
//! use algoviz_vis::{Player, PlayerConfig, VirtualScheduler};
//!
//! let mut sched = VirtualScheduler::new();
//! let config = PlayerConfig::for_algorithm(AlgorithmKind::MergeSort).with_seed(1);
//! let mut player = Player::new(config).unwrap();
//!
//! player.start(&mut sched).unwrap();
//! sched.advance(Duration::from_secs(120), &mut player);
//! assert!(player.state().completed);
//! ```

mod config;
mod error;
mod leaderboard;
mod playback;
mod race;
mod scheduler;

pub use config::{
    player_tick_period, validate_array_size, validate_speed, PlayerConfig, RaceConfig,
    DEFAULT_ARRAY_SIZE, DEFAULT_SPEED, MAX_ARRAY_SIZE, MAX_SPEED, MIN_ARRAY_SIZE, MIN_SPEED,
    RACE_REFERENCE_SPEED, RACE_TICK,
};
pub use error::{Error, Result};
pub use leaderboard::{format_seconds, leaderboard, rank, EntryStatus, EntrySummary, LeaderboardRow};
pub use playback::{ArraySource, PlaybackPhase, PlaybackState, PlaybackStatus, Player};
pub use race::{Race, RaceEntry, RacePhase, RaceProfile, RaceStatus};
pub use scheduler::{Scheduler, Tickable, TimerId, TokioScheduler, VirtualScheduler, MIN_PERIOD};

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_trace::{AlgorithmKind, Category};
    use std::time::Duration;

    /// Drives a player and a race off one scheduler.
    struct Both {
        player: Player,
        race: Race,
    }

    impl Tickable for Both {
        fn on_tick(&mut self, timer: TimerId, scheduler: &mut dyn Scheduler) {
            if self.player.timer() == Some(timer) {
                self.player.on_tick(timer, scheduler);
            } else {
                self.race.on_tick(timer, scheduler);
            }
        }
    }

    #[test]
    fn player_and_race_share_a_scheduler() {
        let mut sched = VirtualScheduler::new();
        let mut both = Both {
            player: Player::new(PlayerConfig::for_algorithm(AlgorithmKind::QuickSort).with_seed(5))
                .unwrap(),
            race: Race::new(RaceConfig::default()).unwrap(),
        };

        both.race.toggle_algorithm(AlgorithmKind::QuickSort).unwrap();
        both.race.toggle_algorithm(AlgorithmKind::BubbleSort).unwrap();
        both.player.start(&mut sched).unwrap();
        both.race.start(&mut sched).unwrap();
        assert_eq!(sched.live_timers(), 2);

        sched.advance(Duration::from_secs(300), &mut both);

        assert!(both.player.state().completed);
        assert_eq!(both.race.phase(), RacePhase::Finished);
        assert_eq!(sched.live_timers(), 0);
    }

    #[test]
    fn quick_sort_usually_beats_bubble_sort() {
        let mut wins = 0;
        for seed in 0..20 {
            let mut sched = VirtualScheduler::new();
            let mut race = Race::new(RaceConfig::default().with_seed(seed)).unwrap();
            race.toggle_algorithm(AlgorithmKind::BubbleSort).unwrap();
            race.toggle_algorithm(AlgorithmKind::QuickSort).unwrap();
            race.start(&mut sched).unwrap();
            sched.advance(Duration::from_secs(300), &mut race);

            let board = race.leaderboard();
            assert!(board[0].is_winner);
            if board[0].name == AlgorithmKind::QuickSort.name() {
                wins += 1;
            }
        }
        assert_eq!(wins, 20);
    }

    #[test]
    fn searching_race_ranks_by_completion() {
        let mut sched = VirtualScheduler::new();
        let mut race = Race::new(RaceConfig::for_category(Category::Searching)).unwrap();
        race.toggle_algorithm(AlgorithmKind::LinearSearch).unwrap();
        race.toggle_algorithm(AlgorithmKind::BinarySearch).unwrap();
        race.start(&mut sched).unwrap();
        sched.advance(Duration::from_secs(60), &mut race);

        let board = race.leaderboard();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, "Binary Search");
        assert!(board.iter().all(|row| row.status == EntryStatus::Completed));
    }
}
