//! Startup seeding orchestration.

use example_data::{GenerationError, PlayerSeed, PopulationSpec, generate_population};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{ScoreIndex, ScoreIndexError};
use crate::domain::{MemberId, MemberIdValidationError, ScoredMember};
use crate::example_data::config::SeedSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// The configured population cannot be generated.
    #[error("invalid seed population: {0}")]
    Population(#[from] GenerationError),
    /// A generated name is not a valid member identifier.
    #[error("generated player name is invalid: {0}")]
    InvalidPlayer(#[from] MemberIdValidationError),
    /// Clearing the leaderboard failed.
    #[error("failed to reset leaderboard: {0}")]
    Reset(#[source] ScoreIndexError),
    /// Writing one batch failed; earlier batches stay written.
    #[error("failed to write seed batch {batch}: {source}")]
    Write {
        /// Zero-based batch number.
        batch: usize,
        /// Underlying index error.
        #[source]
        source: ScoreIndexError,
    },
}

/// Summary of a completed seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Members written, showcase players included.
    pub written: usize,
    /// Index calls used to write them.
    pub batches: usize,
    /// Whether the leaderboard was cleared first.
    pub reset: bool,
}

fn to_member(player: PlayerSeed) -> Result<ScoredMember, MemberIdValidationError> {
    Ok(ScoredMember::new(MemberId::new(player.name)?, player.rating))
}

/// Populate the leaderboard on startup when enabled.
///
/// # Examples
///
/// ```rust
/// use backend::example_data::{SeedSettings, seed_leaderboard_on_startup};
/// use backend::outbound::memory::InMemoryScoreIndex;
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let settings = SeedSettings {
///     player_count: Some(5),
///     ..SeedSettings::default()
/// };
/// let index = InMemoryScoreIndex::new();
/// let outcome = seed_leaderboard_on_startup(&settings, &index)
///     .await
///     .expect("seeding succeeds");
/// assert_eq!(outcome.map(|o| o.written), Some(15));
/// # });
/// ```
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the population is invalid or the
/// index rejects a reset or a write.
pub async fn seed_leaderboard_on_startup(
    settings: &SeedSettings,
    index: &dyn ScoreIndex,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.enabled {
        info!(reason = "disabled", "leaderboard seeding skipped");
        return Ok(None);
    }

    let spec = PopulationSpec::new(settings.seed(), settings.player_count())?;
    let members = generate_population(&spec)
        .into_iter()
        .map(to_member)
        .collect::<Result<Vec<_>, _>>()?;

    let reset = settings.reset;
    if reset {
        index.clear().await.map_err(StartupSeedingError::Reset)?;
        debug!("leaderboard cleared before seeding");
    }

    let mut batches = 0;
    for (batch, chunk) in members.chunks(settings.batch_size()).enumerate() {
        index
            .upsert_many(chunk)
            .await
            .map_err(|source| StartupSeedingError::Write { batch, source })?;
        batches += 1;
    }

    info!(
        seed = spec.seed(),
        written = members.len(),
        batches,
        reset,
        "leaderboard seeding applied"
    );
    Ok(Some(SeedOutcome {
        written: members.len(),
        batches,
        reset,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockScoreIndex;
    use crate::outbound::memory::InMemoryScoreIndex;
    use rstest::rstest;

    fn settings(player_count: usize) -> SeedSettings {
        SeedSettings {
            player_count: Some(player_count),
            ..SeedSettings::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_seeding_leaves_the_index_alone() {
        let mut index = MockScoreIndex::new();
        index.expect_clear().never();
        index.expect_upsert_many().never();

        let disabled = SeedSettings {
            enabled: false,
            ..SeedSettings::default()
        };
        let outcome = seed_leaderboard_on_startup(&disabled, &index)
            .await
            .expect("skipped");
        assert!(outcome.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn population_and_showcase_players_are_written() {
        let index = InMemoryScoreIndex::new();
        index
            .upsert(&MemberId::new("stale_player").expect("id"), 300)
            .await
            .expect("pre-existing member");

        let outcome = seed_leaderboard_on_startup(&settings(40), &index)
            .await
            .expect("seeding succeeds")
            .expect("seeding enabled");

        assert_eq!(
            outcome,
            SeedOutcome {
                written: 50,
                batches: 1,
                reset: true,
            }
        );
        assert_eq!(index.count().await.expect("count"), 50);
        let top = index.range_desc(0, 1).await.expect("top two");
        let names: Vec<_> = top.iter().map(|row| row.id.as_ref()).collect();
        assert_eq!(names, ["Legendary_Player_1", "Master_Gamer_2"]);
        let stale = MemberId::new("stale_player").expect("id");
        assert_eq!(index.score_of(&stale).await.expect("lookup"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_is_deterministic_for_a_seed() {
        let first = InMemoryScoreIndex::new();
        let second = InMemoryScoreIndex::new();
        seed_leaderboard_on_startup(&settings(25), &first)
            .await
            .expect("first run");
        seed_leaderboard_on_startup(&settings(25), &second)
            .await
            .expect("second run");

        assert_eq!(
            first.range_desc(0, 34).await.expect("first"),
            second.range_desc(0, 34).await.expect("second")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn writes_are_split_into_batches() {
        let mut index = MockScoreIndex::new();
        index.expect_clear().never();
        index
            .expect_upsert_many()
            .withf(|chunk| chunk.len() <= 7)
            .times(5)
            .returning(|_| Ok(()));

        let batched = SeedSettings {
            player_count: Some(20),
            reset: false,
            batch_size: Some(7),
            ..SeedSettings::default()
        };
        let outcome = seed_leaderboard_on_startup(&batched, &index)
            .await
            .expect("seeding succeeds")
            .expect("seeding enabled");
        assert_eq!(outcome.batches, 5);
        assert!(!outcome.reset);
    }

    #[rstest]
    #[tokio::test]
    async fn write_failures_name_the_batch() {
        let mut index = MockScoreIndex::new();
        index.expect_clear().returning(|| Ok(()));
        index
            .expect_upsert_many()
            .times(1)
            .returning(|_| Err(ScoreIndexError::unavailable("connection reset")));

        let err = seed_leaderboard_on_startup(&settings(3), &index)
            .await
            .expect_err("write fails");
        assert!(matches!(err, StartupSeedingError::Write { batch: 0, .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn oversized_populations_are_rejected_before_io() {
        let index = MockScoreIndex::new();
        let err = seed_leaderboard_on_startup(&settings(usize::MAX), &index)
            .await
            .expect_err("too many players");
        assert!(matches!(
            err,
            StartupSeedingError::Population(GenerationError::TooManyPlayers { .. })
        ));
    }
}
