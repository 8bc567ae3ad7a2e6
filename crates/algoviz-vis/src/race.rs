//! Algorithm race simulation.
//!
//! A race advances one [`RaceEntry`] per selected algorithm on a single
//! shared timer. Progress is synthetic: each tick draws increments from the
//! algorithm's [`RaceProfile`], so faster algorithms tend to finish first
//! without replaying real traces.
//!
//! Every tick computes the next generation of entries into a fresh map and
//! swaps it in whole, so observers never see a half-updated race.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use algoviz_trace::{
    generate_array, prepare_input, random_target, sorted_copy, Advisory, AlgorithmKind, Category,
    CustomInput,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{validate_array_size, validate_speed, RaceConfig};
use crate::error::{Error, Result};
use crate::leaderboard::{leaderboard, EntrySummary, LeaderboardRow};
use crate::scheduler::{Scheduler, Tickable, TimerId};

/// Per-tick increment ranges for one algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceProfile {
    /// Half-open progress range, in percent, before speed scaling
    pub progress: (f64, f64),
    /// Inclusive comparison range
    pub comparisons: (u64, u64),
    /// Inclusive swap range; zero for searches
    pub swaps: (u64, u64),
}

impl RaceProfile {
    /// Calibration for `kind`. Cheaper algorithms get larger steps.
    pub const fn for_algorithm(kind: AlgorithmKind) -> Self {
        match kind {
            AlgorithmKind::QuickSort | AlgorithmKind::MergeSort => Self {
                progress: (2.0, 5.0),
                comparisons: (1, 2),
                swaps: (1, 1),
            },
            AlgorithmKind::InsertionSort => Self {
                progress: (1.0, 3.0),
                comparisons: (1, 3),
                swaps: (1, 2),
            },
            AlgorithmKind::SelectionSort | AlgorithmKind::BubbleSort => Self {
                progress: (0.5, 1.5),
                comparisons: (2, 5),
                swaps: (1, 3),
            },
            AlgorithmKind::BinarySearch => Self {
                progress: (5.0, 10.0),
                comparisons: (1, 1),
                swaps: (0, 0),
            },
            AlgorithmKind::LinearSearch => Self {
                progress: (1.0, 3.0),
                comparisons: (1, 3),
                swaps: (0, 0),
            },
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, scale: f64) -> Increment {
        Increment {
            progress: rng.gen_range(self.progress.0..self.progress.1) * scale,
            comparisons: rng.gen_range(self.comparisons.0..=self.comparisons.1),
            swaps: rng.gen_range(self.swaps.0..=self.swaps.1),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Increment {
    progress: f64,
    comparisons: u64,
    swaps: u64,
}

/// Where the race lives in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RacePhase {
    /// Entries zeroed, selection editable
    Ready,
    /// Timer live, entries advancing
    Running,
    /// Timer cancelled, entries frozen
    Paused,
    /// Every selected entry completed
    Finished,
}

impl fmt::Display for RacePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RacePhase::Ready => write!(f, "Ready"),
            RacePhase::Running => write!(f, "Running"),
            RacePhase::Paused => write!(f, "Paused"),
            RacePhase::Finished => write!(f, "Finished"),
        }
    }
}

/// Simulated progress of one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceEntry {
    pub algorithm: AlgorithmKind,
    /// 0.0..=100.0
    pub progress: f64,
    pub comparisons: u64,
    /// Always 0 in a searching race
    pub swaps: u64,
    pub time_elapsed_ms: u64,
    pub completed: bool,
    pub current_array: Vec<i64>,
    pub current_indices: Vec<usize>,
    #[serde(skip)]
    started_at: Duration,
    #[serde(skip)]
    paused_total: Duration,
}

impl RaceEntry {
    fn new(algorithm: AlgorithmKind, array: &[i64]) -> Self {
        Self {
            algorithm,
            progress: 0.0,
            comparisons: 0,
            swaps: 0,
            time_elapsed_ms: 0,
            completed: false,
            current_array: array.to_vec(),
            current_indices: Vec::new(),
            started_at: Duration::ZERO,
            paused_total: Duration::ZERO,
        }
    }

    /// Ranking view of this entry.
    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            name: self.algorithm.name().to_string(),
            progress: self.progress,
            comparisons: self.comparisons,
            swaps: self.swaps,
            time_elapsed_ms: self.time_elapsed_ms,
            completed: self.completed,
        }
    }
}

/// Inputs shared by every entry during one tick.
struct TickContext<'a> {
    category: Category,
    base: &'a [i64],
    sorted: &'a [i64],
    scale: f64,
    now: Duration,
}

/// Advance one incomplete entry by a sampled increment.
fn advance_entry<R: Rng + ?Sized>(entry: &mut RaceEntry, rng: &mut R, ctx: &TickContext<'_>) {
    let inc = RaceProfile::for_algorithm(entry.algorithm).sample(rng, ctx.scale);
    let progress = (entry.progress + inc.progress).min(100.0);
    let fraction = progress / 100.0;
    let n = ctx.base.len();

    match ctx.category {
        Category::Sorting => {
            if progress > entry.progress {
                entry.current_array = ctx
                    .base
                    .iter()
                    .zip(ctx.sorted)
                    .map(|(&v, &s)| if rng.gen::<f64>() < fraction { s } else { v })
                    .collect();
                entry.current_indices = if n == 0 {
                    Vec::new()
                } else {
                    let count = rng.gen_range(1..=3);
                    (0..count).map(|_| rng.gen_range(0..n)).collect()
                };
            } else {
                entry.current_indices.clear();
            }
            entry.swaps += inc.swaps;
        }
        Category::Searching => {
            entry.current_indices = search_indices(entry.algorithm, n, fraction);
            entry.swaps = 0;
        }
    }

    entry.progress = progress;
    entry.comparisons += inc.comparisons;
    entry.time_elapsed_ms = ctx
        .now
        .saturating_sub(entry.started_at)
        .saturating_sub(entry.paused_total)
        .as_millis() as u64;
    entry.completed = progress >= 100.0;
}

/// Highlight positions for a search at `fraction` of the way through.
///
/// Binary search shows a `[left, mid, right]` window that widens with
/// progress; linear search a single probe. Indices are clamped to `n - 1`.
fn search_indices(kind: AlgorithmKind, n: usize, fraction: f64) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let last = n - 1;
    let len = n as f64;

    if kind == AlgorithmKind::BinarySearch {
        let left = (len * (1.0 - fraction) / 2.0).floor() as usize;
        let right = (len * (1.0 + fraction) / 2.0).floor() as usize;
        let mid = (left + right) / 2;
        vec![left.min(last), mid.min(last), right.min(last)]
    } else {
        vec![((len * fraction).floor() as usize).min(last)]
    }
}

/// A race between the algorithms of one category.
#[derive(Debug)]
pub struct Race {
    config: RaceConfig,
    rng: StdRng,
    array: Vec<i64>,
    sorted: Vec<i64>,
    target: Option<i64>,
    advisory: Option<Advisory>,
    selected: Vec<AlgorithmKind>,
    entries: BTreeMap<AlgorithmKind, RaceEntry>,
    phase: RacePhase,
    timer: Option<TimerId>,
    paused_at: Option<Duration>,
    torn_down: bool,
}

impl Race {
    /// Create a ready race with nothing selected and a random array.
    pub fn new(config: RaceConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);

        let mut race = Self {
            config,
            rng,
            array: Vec::new(),
            sorted: Vec::new(),
            target: None,
            advisory: None,
            selected: Vec::new(),
            entries: BTreeMap::new(),
            phase: RacePhase::Ready,
            timer: None,
            paused_at: None,
            torn_down: false,
        };
        race.load(None);
        Ok(race)
    }

    /// Add or remove `kind` from the race. Returns whether it is now selected.
    ///
    /// Selecting binary search sorts the array and every entry's view.
    pub fn toggle_algorithm(&mut self, kind: AlgorithmKind) -> Result<bool> {
        self.ensure_live()?;
        if kind.category() != self.config.category {
            warn!(algorithm = %kind, category = %self.config.category, "toggle outside race category");
            return Err(Error::CategoryMismatch {
                algorithm: kind,
                category: self.config.category,
            });
        }
        if matches!(self.phase, RacePhase::Running | RacePhase::Paused) {
            warn!(algorithm = %kind, phase = %self.phase, "toggle rejected mid-race");
            return Err(Error::InvalidState {
                expected: "Ready or Finished",
                actual: self.phase.to_string(),
            });
        }
        if self.phase == RacePhase::Finished {
            self.zero_entries();
        }

        if let Some(pos) = self.selected.iter().position(|&k| k == kind) {
            self.selected.remove(pos);
            debug!(algorithm = %kind, "algorithm deselected");
            return Ok(false);
        }

        self.selected.push(kind);
        if kind.requires_sorted_input() {
            let prepared = prepare_input(&[kind], &self.array);
            if prepared.advisory.is_some() {
                self.advisory = prepared.advisory;
            }
            self.set_base(prepared.array);
            for entry in self.entries.values_mut() {
                entry.current_array.clone_from(&self.array);
            }
        }
        debug!(algorithm = %kind, "algorithm selected");
        Ok(true)
    }

    /// Start a race, or resume a paused one.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;

        match self.phase {
            RacePhase::Running => Ok(()),
            RacePhase::Paused => {
                let now = scheduler.now();
                let paused = self
                    .paused_at
                    .take()
                    .map_or(Duration::ZERO, |at| now.saturating_sub(at));
                for kind in &self.selected {
                    if let Some(entry) = self.entries.get_mut(kind) {
                        entry.paused_total += paused;
                    }
                }
                self.timer = Some(scheduler.schedule(self.config.tick_period));
                self.phase = RacePhase::Running;
                debug!(paused_ms = paused.as_millis() as u64, "race resumed");
                Ok(())
            }
            RacePhase::Ready | RacePhase::Finished => {
                if self.selected.is_empty() {
                    warn!("race started with no algorithms");
                    return Err(Error::NoAlgorithmsSelected);
                }
                if self.phase == RacePhase::Finished {
                    self.zero_entries();
                }

                let now = scheduler.now();
                for kind in &self.selected {
                    if let Some(entry) = self.entries.get_mut(kind) {
                        entry.started_at = now;
                        entry.paused_total = Duration::ZERO;
                    }
                }
                self.paused_at = None;
                self.timer = Some(scheduler.schedule(self.config.tick_period));
                self.phase = RacePhase::Running;
                info!(
                    category = %self.config.category,
                    racers = self.selected.len(),
                    len = self.array.len(),
                    "race started"
                );
                Ok(())
            }
        }
    }

    /// Cancel the timer and freeze every entry.
    pub fn pause(&mut self, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;

        if self.phase == RacePhase::Running {
            self.cancel_timer(scheduler);
            self.paused_at = Some(scheduler.now());
            self.phase = RacePhase::Paused;
            debug!("race paused");
        }
        Ok(())
    }

    /// New random array and target, every entry zeroed. Selection is kept.
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;
        self.cancel_timer(scheduler);
        self.load(None);
        debug!(len = self.array.len(), "race reset");
        Ok(())
    }

    /// Race on a user-supplied array instead of a random one.
    pub fn set_custom_input(&mut self, input: CustomInput, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;
        self.cancel_timer(scheduler);
        self.load(Some(input));
        debug!(len = self.array.len(), "race loaded custom input");
        Ok(())
    }

    /// Switch category. Clears the selection and loads a fresh array.
    pub fn set_category(&mut self, category: Category, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;
        self.cancel_timer(scheduler);
        self.config.category = category;
        self.selected.clear();
        self.load(None);
        debug!(%category, "race category changed");
        Ok(())
    }

    /// Change speed. Takes effect on the next tick.
    pub fn set_speed(&mut self, speed: u32) -> Result<()> {
        self.ensure_live()?;
        self.config.speed = validate_speed(speed).inspect_err(|e| warn!(%e, "speed rejected"))?;
        Ok(())
    }

    /// Change the array length and reset.
    pub fn set_array_size(&mut self, size: usize, scheduler: &mut dyn Scheduler) -> Result<()> {
        self.ensure_live()?;
        self.config.array_size =
            validate_array_size(size).inspect_err(|e| warn!(%e, "array size rejected"))?;
        self.reset(scheduler)
    }

    /// Cancel the timer and refuse every later command and tick.
    pub fn teardown(&mut self, scheduler: &mut dyn Scheduler) {
        if self.torn_down {
            return;
        }
        self.cancel_timer(scheduler);
        self.torn_down = true;
        debug!("race torn down");
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn category(&self) -> Category {
        self.config.category
    }

    /// The array every entry races on.
    pub fn array(&self) -> &[i64] {
        &self.array
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn advisory(&self) -> Option<Advisory> {
        self.advisory
    }

    /// Selected algorithms in selection order.
    pub fn selected(&self) -> &[AlgorithmKind] {
        &self.selected
    }

    /// One entry per algorithm of the category, selected or not.
    pub fn entries(&self) -> &BTreeMap<AlgorithmKind, RaceEntry> {
        &self.entries
    }

    pub fn entry(&self, kind: AlgorithmKind) -> Option<&RaceEntry> {
        self.entries.get(&kind)
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Ranking views of the selected entries, in selection order.
    pub fn summaries(&self) -> Vec<EntrySummary> {
        self.selected
            .iter()
            .filter_map(|kind| self.entries.get(kind))
            .map(RaceEntry::summary)
            .collect()
    }

    /// Current standings of the selected entries.
    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        leaderboard(self.config.category, &self.summaries())
    }

    /// Serializable snapshot for the presentation layer.
    pub fn status(&self) -> RaceStatus {
        RaceStatus::from(self)
    }

    fn ensure_live(&self) -> Result<()> {
        if self.torn_down {
            warn!("command on torn-down race");
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

    fn set_base(&mut self, array: Vec<i64>) {
        self.sorted = sorted_copy(&array);
        self.array = array;
    }

    /// Replace the array, draw a target when searching, zero every entry.
    fn load(&mut self, input: Option<CustomInput>) {
        let (raw, target) = match input {
            Some(input) => (input.array, input.target),
            None => {
                let (min, max) = self.config.value_range;
                (generate_array(&mut self.rng, self.config.array_size, min, max), None)
            }
        };

        let prepared = prepare_input(&self.selected, &raw);
        self.advisory = prepared.advisory;
        self.set_base(prepared.array);
        self.target = match self.config.category {
            Category::Searching => target.or_else(|| random_target(&mut self.rng, &self.array)),
            Category::Sorting => None,
        };
        self.zero_entries();
    }

    fn zero_entries(&mut self) {
        self.entries = self
            .config
            .category
            .algorithms()
            .iter()
            .map(|&kind| (kind, RaceEntry::new(kind, &self.array)))
            .collect();
        self.paused_at = None;
        self.phase = RacePhase::Ready;
    }
}

impl Tickable for Race {
    fn on_tick(&mut self, timer: TimerId, scheduler: &mut dyn Scheduler) {
        if self.torn_down || self.timer != Some(timer) || self.phase != RacePhase::Running {
            debug!(timer = ?timer, "stale race tick ignored");
            return;
        }

        let ctx = TickContext {
            category: self.config.category,
            base: &self.array,
            sorted: &self.sorted,
            scale: self.config.speed_scale(),
            now: scheduler.now(),
        };

        let mut next = self.entries.clone();
        let mut all_completed = true;
        for kind in &self.selected {
            let Some(entry) = next.get_mut(kind) else {
                continue;
            };
            if !entry.completed {
                advance_entry(entry, &mut self.rng, &ctx);
            }
            all_completed &= entry.completed;
        }
        self.entries = next;

        if all_completed {
            self.cancel_timer(scheduler);
            self.phase = RacePhase::Finished;
            if let Some(winner) = self.leaderboard().first() {
                info!(winner = %winner.name, elapsed_ms = winner.time_elapsed_ms, "race finished");
            }
        }
    }
}

/// Race snapshot for sending to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceStatus {
    pub category: Category,
    pub phase: RacePhase,
    pub speed: u32,
    pub array: Vec<i64>,
    pub target: Option<i64>,
    pub advisory: Option<String>,
    pub selected: Vec<AlgorithmKind>,
    /// Selected entries in selection order
    pub entries: Vec<RaceEntry>,
    pub leaderboard: Vec<LeaderboardRow>,
}

impl From<&Race> for RaceStatus {
    fn from(race: &Race) -> Self {
        Self {
            category: race.config.category,
            phase: race.phase,
            speed: race.config.speed,
            array: race.array.clone(),
            target: race.target,
            advisory: race.advisory.map(|a| a.to_string()),
            selected: race.selected.clone(),
            entries: race
                .selected
                .iter()
                .filter_map(|kind| race.entries.get(kind).cloned())
                .collect(),
            leaderboard: race.leaderboard(),
        }
    }
}
