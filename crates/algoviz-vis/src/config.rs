//! Player and race configuration.

use std::time::Duration;

use algoviz_trace::{AlgorithmKind, Category, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE};

use crate::error::{Error, Result};

/// Slowest playback speed.
pub const MIN_SPEED: u32 = 10;

/// Fastest playback speed.
pub const MAX_SPEED: u32 = 100;

/// Speed used when none is configured.
pub const DEFAULT_SPEED: u32 = 50;

/// Smallest generated array.
pub const MIN_ARRAY_SIZE: usize = 5;

/// Largest generated array.
pub const MAX_ARRAY_SIZE: usize = 100;

/// Array size used when none is configured.
pub const DEFAULT_ARRAY_SIZE: usize = 30;

/// Race tick period.
pub const RACE_TICK: Duration = Duration::from_millis(100);

/// Speed at which race increments are unscaled.
pub const RACE_REFERENCE_SPEED: f64 = 50.0;

/// Check `speed` against [`MIN_SPEED`]..=[`MAX_SPEED`].
pub fn validate_speed(speed: u32) -> Result<u32> {
    if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
        Ok(speed)
    } else {
        Err(Error::SpeedOutOfRange {
            speed,
            min: MIN_SPEED,
            max: MAX_SPEED,
        })
    }
}

/// Check `size` against [`MIN_ARRAY_SIZE`]..=[`MAX_ARRAY_SIZE`].
pub fn validate_array_size(size: usize) -> Result<usize> {
    if (MIN_ARRAY_SIZE..=MAX_ARRAY_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(Error::ArraySizeOutOfRange {
            size,
            min: MIN_ARRAY_SIZE,
            max: MAX_ARRAY_SIZE,
        })
    }
}

/// Step player tick period: `1000 / (speed / 10)` milliseconds.
///
/// Speed 10 plays one step per second, speed 100 ten per second.
pub fn player_tick_period(speed: u32) -> Duration {
    Duration::from_micros(10_000_000 / u64::from(speed.max(1)))
}

/// Configuration for a [`Player`](crate::Player).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Algorithm to visualize
    pub algorithm: AlgorithmKind,
    /// Playback speed (10..=100)
    pub speed: u32,
    /// Length of generated arrays (5..=100)
    pub array_size: usize,
    /// Inclusive value range of generated arrays
    pub value_range: (i64, i64),
    /// Seed for array and target generation; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::BubbleSort,
            speed: DEFAULT_SPEED,
            array_size: DEFAULT_ARRAY_SIZE,
            value_range: (DEFAULT_MIN_VALUE, DEFAULT_MAX_VALUE),
            seed: None,
        }
    }
}

impl PlayerConfig {
    /// Default configuration for `algorithm`.
    #[must_use]
    pub fn for_algorithm(algorithm: AlgorithmKind) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Set the playback speed.
    #[must_use]
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the generated array length.
    #[must_use]
    pub fn with_array_size(mut self, size: usize) -> Self {
        self.array_size = size;
        self
    }

    /// Set the generated value range.
    #[must_use]
    pub fn with_value_range(mut self, min: i64, max: i64) -> Self {
        self.value_range = (min, max);
        self
    }

    /// Make array generation reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check speed and array size.
    pub fn validate(&self) -> Result<()> {
        validate_speed(self.speed)?;
        validate_array_size(self.array_size)?;
        Ok(())
    }

    /// Period between playback ticks.
    pub fn tick_period(&self) -> Duration {
        player_tick_period(self.speed)
    }
}

/// Configuration for a [`Race`](crate::Race).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceConfig {
    /// Which family of algorithms races
    pub category: Category,
    /// Scales progress increments (10..=100)
    pub speed: u32,
    /// Length of generated arrays (5..=100)
    pub array_size: usize,
    /// Inclusive value range of generated arrays
    pub value_range: (i64, i64),
    /// Period of the shared race tick
    pub tick_period: Duration,
    /// Seed for arrays, targets and progress sampling
    pub seed: u64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            category: Category::Sorting,
            speed: DEFAULT_SPEED,
            array_size: DEFAULT_ARRAY_SIZE,
            value_range: (DEFAULT_MIN_VALUE, DEFAULT_MAX_VALUE),
            tick_period: RACE_TICK,
            seed: 42,
        }
    }
}

impl RaceConfig {
    /// Default configuration for a race in `category`.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        Self {
            category,
            ..Default::default()
        }
    }

    /// Set the speed.
    #[must_use]
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the generated array length.
    #[must_use]
    pub fn with_array_size(mut self, size: usize) -> Self {
        self.array_size = size;
        self
    }

    /// Set the generated value range.
    #[must_use]
    pub fn with_value_range(mut self, min: i64, max: i64) -> Self {
        self.value_range = (min, max);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check speed and array size.
    pub fn validate(&self) -> Result<()> {
        validate_speed(self.speed)?;
        validate_array_size(self.array_size)?;
        Ok(())
    }

    /// Factor applied to sampled progress increments.
    pub fn speed_scale(&self) -> f64 {
        f64::from(self.speed) / RACE_REFERENCE_SPEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_period_matches_speed_formula() {
        assert_eq!(player_tick_period(10), Duration::from_secs(1));
        assert_eq!(player_tick_period(50), Duration::from_millis(200));
        assert_eq!(player_tick_period(100), Duration::from_millis(100));
    }

    #[test]
    fn faster_speed_means_shorter_period() {
        let mut prev = player_tick_period(MIN_SPEED);
        for speed in MIN_SPEED + 1..=MAX_SPEED {
            let period = player_tick_period(speed);
            assert!(period <= prev, "period grew at speed {}", speed);
            prev = period;
        }
    }

    #[test]
    fn speed_bounds() {
        assert!(validate_speed(10).is_ok());
        assert!(validate_speed(100).is_ok());
        assert_eq!(
            validate_speed(9),
            Err(Error::SpeedOutOfRange {
                speed: 9,
                min: 10,
                max: 100
            })
        );
        assert!(validate_speed(101).is_err());
    }

    #[test]
    fn array_size_bounds() {
        assert!(validate_array_size(5).is_ok());
        assert!(validate_array_size(100).is_ok());
        assert!(validate_array_size(4).is_err());
        assert!(validate_array_size(101).is_err());
    }

    #[test]
    fn builders_and_validation() {
        let config = PlayerConfig::for_algorithm(AlgorithmKind::MergeSort)
            .with_speed(80)
            .with_array_size(12)
            .with_seed(9);
        assert!(config.validate().is_ok());
        assert_eq!(config.algorithm, AlgorithmKind::MergeSort);
        assert_eq!(config.seed, Some(9));

        assert!(PlayerConfig::default().with_speed(0).validate().is_err());
        assert!(RaceConfig::default().with_array_size(1000).validate().is_err());
    }

    #[test]
    fn race_speed_scale_is_relative_to_fifty() {
        assert_eq!(RaceConfig::default().speed_scale(), 1.0);
        assert_eq!(RaceConfig::default().with_speed(100).speed_scale(), 2.0);
    }
}
