//! Delta distributions for live rating updates.
//!
//! Standard updates drift slightly upward so the board keeps moving, while
//! members close to the ceiling are pushed back down most of the time. The
//! ceiling therefore stays rare however long the process runs.

use std::ops::RangeInclusive;

use rand::Rng;

/// Symmetric delta applied during the hot burst at the very top.
pub const HOT_DELTA: RangeInclusive<i64> = -20..=20;

/// Delta applied to ordinary candidates. Skewed upward.
pub const STANDARD_DELTA: RangeInclusive<i64> = -40..=59;

/// Delta applied to near-ceiling candidates when the downward bias fires.
pub const NEAR_MAX_DELTA: RangeInclusive<i64> = -60..=-1;

/// Chooses the signed change for one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaPolicy {
    near_max_threshold: i64,
    near_max_down_percent: u32,
}

impl DeltaPolicy {
    /// Build a policy. `near_max_down_percent` is capped at 100.
    pub fn new(near_max_threshold: i64, near_max_down_percent: u32) -> Self {
        Self {
            near_max_threshold,
            near_max_down_percent: near_max_down_percent.min(100),
        }
    }

    /// Delta for the hot burst; ignores the current score.
    pub fn hot_delta<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.random_range(HOT_DELTA)
    }

    /// Delta for a standard update of a member currently at `score`.
    pub fn standard_delta<R: Rng + ?Sized>(&self, rng: &mut R, score: i64) -> i64 {
        if score >= self.near_max_threshold && rng.random_ratio(self.near_max_down_percent, 100) {
            return rng.random_range(NEAR_MAX_DELTA);
        }
        rng.random_range(STANDARD_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[rstest]
    fn hot_deltas_stay_symmetric_and_bounded(mut rng: SmallRng) {
        let policy = DeltaPolicy::new(4950, 90);
        for _ in 0..500 {
            assert!(HOT_DELTA.contains(&policy.hot_delta(&mut rng)));
        }
    }

    #[rstest]
    #[case(100)]
    #[case(2500)]
    #[case(4949)]
    fn scores_below_threshold_use_the_standard_range(mut rng: SmallRng, #[case] score: i64) {
        let policy = DeltaPolicy::new(4950, 100);
        for _ in 0..500 {
            assert!(STANDARD_DELTA.contains(&policy.standard_delta(&mut rng, score)));
        }
    }

    #[rstest]
    fn certain_bias_always_pushes_near_max_scores_down(mut rng: SmallRng) {
        let policy = DeltaPolicy::new(4950, 100);
        for _ in 0..500 {
            assert!(NEAR_MAX_DELTA.contains(&policy.standard_delta(&mut rng, 4950)));
        }
    }

    #[rstest]
    fn disabled_bias_leaves_near_max_scores_on_the_standard_range(mut rng: SmallRng) {
        let policy = DeltaPolicy::new(4950, 0);
        for _ in 0..500 {
            assert!(STANDARD_DELTA.contains(&policy.standard_delta(&mut rng, 5000)));
        }
    }

    #[rstest]
    fn default_bias_is_mostly_downward_near_the_ceiling(mut rng: SmallRng) {
        let policy = DeltaPolicy::new(4950, 90);
        let downward = (0..1000)
            .filter(|_| policy.standard_delta(&mut rng, 4990) < 0)
            .count();
        assert!(downward > 850, "only {downward} of 1000 deltas were negative");
    }

    #[rstest]
    fn percent_above_one_hundred_is_capped() {
        assert_eq!(DeltaPolicy::new(4950, 250), DeltaPolicy::new(4950, 100));
    }
}
