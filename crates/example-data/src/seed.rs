//! Population descriptions and generated player records.
//!
//! These types are independent of backend domain types to avoid circular
//! dependencies; the backend converts them at the point of use.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Lowest rating assigned to generated (non-showcase) players.
pub const DEFAULT_RATING_FLOOR: i64 = 100;

/// Highest rating assigned to generated (non-showcase) players.
pub const DEFAULT_RATING_CEILING: i64 = 4899;

/// Upper bound on [`PopulationSpec::player_count`].
pub const MAX_PLAYER_COUNT: usize = 1_000_000;

/// A generated player: a unique name and its starting rating.
///
/// # Example
///
/// ```
/// use example_data::PlayerSeed;
///
/// let player = PlayerSeed::new("rahul_kumar_0", 1200);
/// assert_eq!(player.name, "rahul_kumar_0");
/// assert_eq!(player.rating, 1200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSeed {
    /// Unique player name.
    pub name: String,
    /// Starting rating.
    pub rating: i64,
}

impl PlayerSeed {
    /// Build a player record.
    #[must_use]
    pub fn new(name: impl Into<String>, rating: i64) -> Self {
        Self {
            name: name.into(),
            rating,
        }
    }
}

/// How to generate a population.
///
/// ## Invariants
/// - `rating_floor <= rating_ceiling`
/// - `player_count <= MAX_PLAYER_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationSpec {
    seed: u64,
    player_count: usize,
    rating_floor: i64,
    rating_ceiling: i64,
}

impl PopulationSpec {
    /// Describe `player_count` players drawn from `seed` with the default
    /// rating band.
    ///
    /// # Errors
    /// Returns [`GenerationError::TooManyPlayers`] above [`MAX_PLAYER_COUNT`].
    pub const fn new(seed: u64, player_count: usize) -> Result<Self, GenerationError> {
        Self::with_rating_band(
            seed,
            player_count,
            DEFAULT_RATING_FLOOR,
            DEFAULT_RATING_CEILING,
        )
    }

    /// Describe a population with an explicit inclusive rating band.
    ///
    /// # Errors
    /// Returns [`GenerationError`] when the band is empty or the population
    /// is too large.
    pub const fn with_rating_band(
        seed: u64,
        player_count: usize,
        rating_floor: i64,
        rating_ceiling: i64,
    ) -> Result<Self, GenerationError> {
        if rating_floor > rating_ceiling {
            return Err(GenerationError::InvalidRatingRange {
                floor: rating_floor,
                ceiling: rating_ceiling,
            });
        }
        if player_count > MAX_PLAYER_COUNT {
            return Err(GenerationError::TooManyPlayers {
                requested: player_count,
                max: MAX_PLAYER_COUNT,
            });
        }
        Ok(Self {
            seed,
            player_count,
            rating_floor,
            rating_ceiling,
        })
    }

    /// RNG seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of generated players, excluding showcase entries.
    #[must_use]
    pub const fn player_count(&self) -> usize {
        self.player_count
    }

    /// Lowest generated rating.
    #[must_use]
    pub const fn rating_floor(&self) -> i64 {
        self.rating_floor
    }

    /// Highest generated rating.
    #[must_use]
    pub const fn rating_ceiling(&self) -> i64 {
        self.rating_ceiling
    }
}
