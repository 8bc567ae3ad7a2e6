//! Step-by-step playback of a single algorithm trace.
//!
//! A [`Player`] owns the array, the generated [`Trace`] and a cursor into it.
//! It never owns a timer: [`Player::start`] asks a [`Scheduler`] for one and
//! each tick arrives through [`Tickable::on_tick`].
//!
//! ```text
//!          start            pause
//!   Idle ───────► Running ◄───────► Paused
//!    ▲               │      start
//!    │ reset         │ last step
//!    └────────── Completed
//! ```

use std::fmt;
use std::time::Duration;

use algoviz_trace::{
    generate_array, prepare_input, random_target, Advisory, AlgorithmKind, CustomInput, Trace,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{validate_array_size, validate_speed, PlayerConfig};
use crate::error::{Error, Result};
use crate::scheduler::{Scheduler, Tickable, TimerId};

/// Where the player lives in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// Array loaded, nothing played yet
    Idle,
    /// Consuming one step per tick
    Running,
    /// Timer still scheduled, ticks ignored
    Paused,
    /// Every step consumed
    Completed,
}

impl fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackPhase::Idle => write!(f, "Idle"),
            PlaybackPhase::Running => write!(f, "Running"),
            PlaybackPhase::Paused => write!(f, "Paused"),
            PlaybackPhase::Completed => write!(f, "Completed"),
        }
    }
}

/// Renderable state of the player at the current cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Steps consumed so far (0..=total_steps)
    pub step_index: usize,
    /// Length of the current trace, 0 before the first start
    pub total_steps: usize,
    pub progress_percent: u8,
    pub comparisons: usize,
    pub swaps: usize,
    pub current_array: Vec<i64>,
    pub current_indices: Vec<usize>,
    pub completed: bool,
    /// Milliseconds since start, paused intervals excluded
    pub time_elapsed_ms: u64,
}

impl PlaybackState {
    fn initial(array: &[i64]) -> Self {
        Self {
            current_array: array.to_vec(),
            ..Default::default()
        }
    }
}

/// How [`Player::reset`] obtains its next array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArraySource {
    /// Fresh random array of the configured size and range
    Random,
    /// A validated user array, with an optional target for searches
    Custom(CustomInput),
}

impl ArraySource {
    /// Parse user text into a custom source.
    pub fn parse(array_text: &str, target_text: &str, searching: bool) -> Result<Self> {
        Ok(Self::Custom(CustomInput::parse(array_text, target_text, searching)?))
    }
}

/// Trace player driven by an injected scheduler.
#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    rng: StdRng,
    array: Vec<i64>,
    target: Option<i64>,
    advisory: Option<Advisory>,
    trace: Option<Trace>,
    state: PlaybackState,
    phase: PlaybackPhase,
    timer: Option<TimerId>,
    started_at: Duration,
    paused_at: Option<Duration>,
    paused_total: Duration,
    torn_down: bool,
}

impl Player {
    /// Create an idle player with a random array.
    pub fn new(config: PlayerConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut player = Self {
            config,
            rng,
            array: Vec::new(),
            target: None,
            advisory: None,
            trace: None,
            state: PlaybackState::default(),
            phase: PlaybackPhase::Idle,
            timer: None,
            started_at: Duration::ZERO,
            paused_at: None,
            paused_total: Duration::ZERO,
            torn_down: false,
        };
        player.load(ArraySource::Random);
        Ok(player)
    }

    /// Start, resume, or replay.
    ///
    /// Paused resumes with counters kept. Completed replays the same array
    /// from the beginning. Running is left alone.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;

        match self.phase {
            PlaybackPhase::Running => Ok(()),
            PlaybackPhase::Paused => {
                let now = scheduler.now();
                if let Some(paused_at) = self.paused_at.take() {
                    self.paused_total += now.saturating_sub(paused_at);
                }
                self.phase = PlaybackPhase::Running;
                debug!(algorithm = %self.config.algorithm, "playback resumed");
                Ok(())
            }
            PlaybackPhase::Idle | PlaybackPhase::Completed => {
                let trace = self.config.algorithm.generate(&self.array, self.target)?;

                self.cancel_timer(scheduler);
                self.state = PlaybackState::initial(&self.array);
                self.state.total_steps = trace.len();
                self.trace = Some(trace);
                self.started_at = scheduler.now();
                self.paused_at = None;
                self.paused_total = Duration::ZERO;
                self.timer = Some(scheduler.schedule(self.config.tick_period()));
                self.phase = PlaybackPhase::Running;

                info!(
                    algorithm = %self.config.algorithm,
                    steps = self.state.total_steps,
                    "playback started"
                );
                Ok(())
            }
        }
    }

    /// Freeze the cursor. The timer keeps ticking but ticks are ignored.
    pub fn pause(&mut self, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;

        if self.phase == PlaybackPhase::Running {
            self.paused_at = Some(scheduler.now());
            self.phase = PlaybackPhase::Paused;
            debug!(algorithm = %self.config.algorithm, step = self.state.step_index, "playback paused");
        }
        Ok(())
    }

    /// Cancel playback and load a new array.
    pub fn reset(&mut self, source: ArraySource, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;
        self.cancel_timer(scheduler);
        self.load(source);
        debug!(algorithm = %self.config.algorithm, len = self.array.len(), "playback reset");
        Ok(())
    }

    /// Cancel the timer and refuse every later command and tick.
    pub fn teardown(&mut self, scheduler: &mut dyn Scheduler) {
        if self.torn_down {
            return;
        }
        self.cancel_timer(scheduler);
        self.torn_down = true;
        debug!(algorithm = %self.config.algorithm, "player torn down");
    }

    /// Change speed. A live timer is rescheduled at the new period.
    pub fn set_speed(&mut self, speed: u32, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;
        let speed = validate_speed(speed).inspect_err(|e| warn!(%e, "speed rejected"))?;
        self.config.speed = speed;

        if let Some(timer) = self.timer.filter(|&t| scheduler.is_live(t)) {
            scheduler.cancel(timer);
            self.timer = Some(scheduler.schedule(self.config.tick_period()));
        }
        Ok(())
    }

    /// Change the generated array length and reset with a fresh array.
    pub fn set_array_size(&mut self, size: usize, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;
        let size = validate_array_size(size).inspect_err(|e| warn!(%e, "array size rejected"))?;
        self.config.array_size = size;
        self.reset(ArraySource::Random, scheduler)
    }

    /// Switch algorithm and reset with a fresh array.
    pub fn set_algorithm(&mut self, algorithm: AlgorithmKind, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;
        self.config.algorithm = algorithm;
        self.reset(ArraySource::Random, scheduler)
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn algorithm(&self) -> AlgorithmKind {
        self.config.algorithm
    }

    /// The array playback starts from.
    pub fn array(&self) -> &[i64] {
        &self.array
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    /// Set when the array was sorted for binary search.
    pub fn advisory(&self) -> Option<Advisory> {
        self.advisory
    }

    /// The trace being played, once started.
    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Serializable snapshot for the presentation layer.
    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }

    fn ensure_live(&self) -> Result<()> {
        if self.torn_down {
            warn!(algorithm = %self.config.algorithm, "command on torn-down player");
            Err(Error::TornDown)
        } else {
            Ok(())
        }
    }

    fn cancel_timer(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
    }

    /// Replace the array and clear every counter.
    fn load(&mut self, source: ArraySource) {
        let algorithm = self.config.algorithm;
        let (raw, target) = match source {
            ArraySource::Random => {
                let (min, max) = self.config.value_range;
                (generate_array(&mut self.rng, self.config.array_size, min, max), None)
            }
            ArraySource::Custom(input) => (input.array, input.target),
        };

        let prepared = prepare_input(&[algorithm], &raw);
        self.target = if algorithm.is_search() {
            target.or_else(|| random_target(&mut self.rng, &prepared.array))
        } else {
            None
        };
        self.array = prepared.array;
        self.advisory = prepared.advisory;
        self.trace = None;
        self.state = PlaybackState::initial(&self.array);
        self.phase = PlaybackPhase::Idle;
        self.started_at = Duration::ZERO;
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
    }

    fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
            .saturating_sub(self.paused_total)
    }

    fn complete(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel_timer(scheduler);
        self.state.completed = true;
        self.state.progress_percent = 100;
        self.phase = PlaybackPhase::Completed;
        info!(
            algorithm = %self.config.algorithm,
            comparisons = self.state.comparisons,
            swaps = self.state.swaps,
            elapsed_ms = self.state.time_elapsed_ms,
            "playback completed"
        );
    }
}

impl Tickable for Player {
    fn on_tick(&mut self, timer: TimerId, scheduler: &mut dyn Scheduler) {
        if self.torn_down || self.timer != Some(timer) {
            debug!(timer = ?timer, "stale tick ignored");
            return;
        }
        if self.phase != PlaybackPhase::Running {
            return;
        }

        let now = scheduler.now();
        self.state.time_elapsed_ms = self.elapsed(now).as_millis() as u64;

        let Some(step) = self
            .trace
            .as_ref()
            .and_then(|t| t.get(self.state.step_index))
        else {
            self.complete(scheduler);
            return;
        };

        if step.comparison {
            self.state.comparisons += 1;
        }
        if step.swap {
            self.state.swaps += 1;
        }
        self.state.current_array.clone_from(&step.array);
        self.state.current_indices.clone_from(&step.indices);
        self.state.step_index += 1;

        let total = self.state.total_steps;
        if self.state.step_index >= total {
            self.complete(scheduler);
        } else {
            let percent = (100.0 * self.state.step_index as f64 / total as f64).round() as u8;
            self.state.progress_percent = percent.min(99);
        }
    }
}

/// Playback status for sending to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub algorithm: AlgorithmKind,
    pub state: PlaybackPhase,
    pub speed: u32,
    pub step_index: usize,
    pub total_steps: usize,
    pub progress_percent: u8,
    pub comparisons: usize,
    pub swaps: usize,
    pub current_array: Vec<i64>,
    pub current_indices: Vec<usize>,
    pub completed: bool,
    pub time_elapsed_ms: u64,
    pub target: Option<i64>,
    pub advisory: Option<String>,
}

impl From<&Player> for PlaybackStatus {
    fn from(player: &Player) -> Self {
        let state = &player.state;
        Self {
            algorithm: player.config.algorithm,
            state: player.phase,
            speed: player.config.speed,
            step_index: state.step_index,
            total_steps: state.total_steps,
            progress_percent: state.progress_percent,
            comparisons: state.comparisons,
            swaps: state.swaps,
            current_array: state.current_array.clone(),
            current_indices: state.current_indices.clone(),
            completed: state.completed,
            time_elapsed_ms: state.time_elapsed_ms,
            target: player.target,
            advisory: player.advisory.map(|a| a.to_string()),
        }
    }
}
