//! Background process that keeps the leaderboard moving.
//!
//! Every tick the worker:
//! 1. nudges a few members of the top `hot_k` with a small symmetric delta;
//! 2. builds a candidate set from the top `top_k` plus a randomly placed
//!    window of `sample_window` members, and applies between `min_updates`
//!    and `max_updates` standard updates drawn by [`DeltaPolicy`].
//!
//! Index failures abort only the step they occur in and are counted in the
//! [`TickReport`]. The worker never coordinates with readers; each index
//! operation is atomic on its own and nothing more is promised.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::domain::MemberId;
use crate::domain::ports::{RatingUpdate, ScoreIndex, ScoreIndexError};

mod perturber;
mod policy;
mod runtime;

pub use perturber::RatingPerturber;
pub use policy::{DeltaPolicy, HOT_DELTA, NEAR_MAX_DELTA, STANDARD_DELTA};
pub use runtime::LiveUpdateHandle;

/// Tuning for the live update worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveUpdateSettings {
    /// Pause between ticks.
    pub interval: Duration,
    /// Size of the top slice always included in the candidate set.
    pub top_k: u64,
    /// Size of the randomly placed window added to the candidate set.
    pub sample_window: u64,
    /// Fewest standard updates per tick.
    pub min_updates: u32,
    /// Most standard updates per tick.
    pub max_updates: u32,
    /// Size of the top slice targeted by the hot burst.
    pub hot_k: u64,
    /// Updates applied by the hot burst.
    pub hot_updates: u32,
    /// Scores at or above this are biased downward.
    pub near_max_threshold: i64,
    /// Chance, in percent, that a near-ceiling score moves down.
    pub near_max_down_percent: u32,
}

impl Default for LiveUpdateSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            top_k: 50,
            sample_window: 50,
            min_updates: 5,
            max_updates: 14,
            hot_k: 10,
            hot_updates: 3,
            near_max_threshold: 4950,
            near_max_down_percent: 90,
        }
    }
}

/// Rejected [`LiveUpdateSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiveUpdateSettingsError {
    /// A zero interval would spin the worker.
    #[error("live update interval must be greater than zero")]
    ZeroInterval,
    /// The candidate set needs at least the leader.
    #[error("live update top_k must be greater than zero")]
    ZeroTopK,
    /// The per-tick update range is empty.
    #[error("min_updates ({min}) must not exceed max_updates ({max})")]
    InvertedUpdateRange { min: u32, max: u32 },
    /// The near-max chance is not a percentage.
    #[error("near-max down percent must be at most 100, got {value}")]
    PercentOutOfRange { value: u32 },
}

impl LiveUpdateSettings {
    /// Check the settings can drive a worker.
    pub fn validate(&self) -> Result<(), LiveUpdateSettingsError> {
        if self.interval.is_zero() {
            return Err(LiveUpdateSettingsError::ZeroInterval);
        }
        if self.top_k == 0 {
            return Err(LiveUpdateSettingsError::ZeroTopK);
        }
        if self.min_updates > self.max_updates {
            return Err(LiveUpdateSettingsError::InvertedUpdateRange {
                min: self.min_updates,
                max: self.max_updates,
            });
        }
        if self.near_max_down_percent > 100 {
            return Err(LiveUpdateSettingsError::PercentOutOfRange {
                value: self.near_max_down_percent,
            });
        }
        Ok(())
    }
}

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Every write, in order. A member may appear more than once.
    pub writes: Vec<RatingUpdate>,
    /// Selected members that had vanished by the time they were read.
    pub skipped: usize,
    /// Index operations that failed.
    pub failures: usize,
}

impl TickReport {
    /// Distinct members written.
    pub fn members_touched(&self) -> usize {
        self.writes
            .iter()
            .map(|write| &write.id)
            .collect::<HashSet<_>>()
            .len()
    }
}

#[derive(Debug, Clone, Copy)]
enum UpdateKind {
    Hot,
    Standard,
}

/// Perturbs ratings on a fixed interval.
pub struct LiveUpdateWorker {
    index: Arc<dyn ScoreIndex>,
    perturber: RatingPerturber,
    policy: DeltaPolicy,
    settings: LiveUpdateSettings,
    rng: SmallRng,
}

impl LiveUpdateWorker {
    /// Build a worker seeded from the operating system.
    pub fn new(index: Arc<dyn ScoreIndex>, settings: LiveUpdateSettings) -> Self {
        Self::with_rng(index, settings, SmallRng::from_os_rng())
    }

    /// Build a worker with an injected random source.
    pub fn with_rng(
        index: Arc<dyn ScoreIndex>,
        settings: LiveUpdateSettings,
        rng: SmallRng,
    ) -> Self {
        Self {
            perturber: RatingPerturber::new(Arc::clone(&index)),
            policy: DeltaPolicy::new(settings.near_max_threshold, settings.near_max_down_percent),
            index,
            settings,
            rng,
        }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &LiveUpdateSettings {
        &self.settings
    }

    /// Run one update cycle.
    pub async fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        self.hot_burst(&mut report).await;
        self.standard_shuffle(&mut report).await;
        report
    }

    async fn hot_burst(&mut self, report: &mut TickReport) {
        if self.settings.hot_k == 0 || self.settings.hot_updates == 0 {
            return;
        }
        let hot = match self.top_members(self.settings.hot_k).await {
            Ok(hot) => hot,
            Err(error) => {
                warn!(%error, "skipping hot burst");
                report.failures += 1;
                return;
            }
        };
        let updates = self.settings.hot_updates;
        self.apply(&hot, updates, UpdateKind::Hot, report).await;
    }

    async fn standard_shuffle(&mut self, report: &mut TickReport) {
        let candidates = match self.candidates(report).await {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(%error, "skipping standard updates");
                report.failures += 1;
                return;
            }
        };
        let min = self.settings.min_updates;
        let max = self.settings.max_updates.max(min);
        let updates = self.rng.random_range(min..=max);
        self.apply(&candidates, updates, UpdateKind::Standard, report).await;
    }

    /// Top slice plus a random window, deduplicated in first-seen order.
    async fn candidates(
        &mut self,
        report: &mut TickReport,
    ) -> Result<Vec<MemberId>, ScoreIndexError> {
        let mut candidates = self.top_members(self.settings.top_k).await?;
        if self.settings.sample_window == 0 {
            return Ok(candidates);
        }

        let total = match self.index.count().await {
            Ok(total) => total,
            Err(error) => {
                warn!(%error, "sampling skipped; using the top slice only");
                report.failures += 1;
                return Ok(candidates);
            }
        };
        let last_offset = total.saturating_sub(self.settings.sample_window);
        let offset = self.rng.random_range(0..=last_offset);
        let stop = offset.saturating_add(self.settings.sample_window - 1);
        match self.index.range_desc(offset, stop).await {
            Ok(rows) => {
                let mut seen: HashSet<MemberId> = candidates.iter().cloned().collect();
                candidates.extend(
                    rows.into_iter()
                        .map(|row| row.id)
                        .filter(|id| seen.insert(id.clone())),
                );
            }
            Err(error) => {
                warn!(%error, offset, "sampling skipped; using the top slice only");
                report.failures += 1;
            }
        }
        Ok(candidates)
    }

    async fn top_members(&self, k: u64) -> Result<Vec<MemberId>, ScoreIndexError> {
        let rows = self.index.range_desc(0, k.saturating_sub(1)).await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn apply(
        &mut self,
        candidates: &[MemberId],
        updates: u32,
        kind: UpdateKind,
        report: &mut TickReport,
    ) {
        for _ in 0..updates {
            let Some(id) = candidates.choose(&mut self.rng) else {
                return;
            };
            let policy = self.policy;
            let rng = &mut self.rng;
            let outcome = self
                .perturber
                .perturb(id, |current| match kind {
                    UpdateKind::Hot => policy.hot_delta(rng),
                    UpdateKind::Standard => policy.standard_delta(rng, current),
                })
                .await;
            match outcome {
                Ok(Some(write)) => report.writes.push(write),
                Ok(None) => report.skipped += 1,
                Err(error) => {
                    warn!(member = %id, %error, "live update failed");
                    report.failures += 1;
                }
            }
        }
    }
}
