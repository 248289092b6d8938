//! Deterministic player generation from a population spec.
//!
//! The same [`PopulationSpec`] always produces identical output: names are
//! built from the fixed rosters and numbered by position, and ratings are
//! drawn from a `ChaCha8` stream seeded with the spec's seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::roster::{
    FIRST_NAMES, HEADLINERS, LAST_NAMES, PRO_PLAYER_BASE_RATING, PRO_PLAYER_COUNT,
};
use crate::seed::{PlayerSeed, PopulationSpec};

/// Generates the bulk population described by `spec`.
///
/// Player `n` (0-based) is named `<first>_<last>_<n>`, where both name
/// fragments are drawn at random from [`FIRST_NAMES`] and [`LAST_NAMES`].
/// The numeric suffix keeps every name unique. Ratings are uniform over the
/// spec's inclusive rating band.
///
/// # Example
///
/// ```
/// use example_data::{PopulationSpec, generate_players, is_valid_player_name};
///
/// let spec = PopulationSpec::new(42, 5).expect("valid spec");
/// let players = generate_players(&spec);
///
/// assert_eq!(players.len(), 5);
/// assert!(players.iter().all(|p| is_valid_player_name(&p.name)));
/// assert!(players.iter().all(|p| (100..=4899).contains(&p.rating)));
/// ```
#[must_use]
pub fn generate_players(spec: &PopulationSpec) -> Vec<PlayerSeed> {
    let mut rng = ChaCha8Rng::seed_from_u64(spec.seed());
    (0..spec.player_count())
        .map(|index| generate_single_player(&mut rng, spec, index))
        .collect()
}

/// Returns the fixed showcase players pinned near the rating ceiling.
///
/// `Legendary_Player_1` holds the maximum rating, `Master_Gamer_2` sits just
/// below it, and `Pro_Player_1` to `Pro_Player_8` occupy consecutive
/// ratings starting at 4990.
#[must_use]
pub fn showcase_players() -> Vec<PlayerSeed> {
    let headliners = HEADLINERS
        .iter()
        .map(|(name, rating)| PlayerSeed::new(*name, *rating));
    let pros = (1..=PRO_PLAYER_COUNT).map(|n| {
        PlayerSeed::new(
            format!("Pro_Player_{n}"),
            PRO_PLAYER_BASE_RATING + n - 1,
        )
    });
    headliners.chain(pros).collect()
}

/// Generates the bulk population followed by the showcase players.
#[must_use]
pub fn generate_population(spec: &PopulationSpec) -> Vec<PlayerSeed> {
    let mut players = generate_players(spec);
    players.extend(showcase_players());
    players
}

fn generate_single_player(
    rng: &mut ChaCha8Rng,
    spec: &PopulationSpec,
    index: usize,
) -> PlayerSeed {
    let first = pick(rng, &FIRST_NAMES);
    let last = pick(rng, &LAST_NAMES);
    let rating = rng.random_range(spec.rating_floor()..=spec.rating_ceiling());
    PlayerSeed::new(format!("{first}_{last}_{index}"), rating)
}

fn pick<'a>(rng: &mut ChaCha8Rng, options: &[&'a str]) -> &'a str {
    let choice = rng.random_range(0..options.len());
    options.get(choice).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;
    use crate::roster::SHOWCASE_PLAYER_COUNT;
    use crate::validation::is_valid_player_name;

    fn spec(seed: u64, count: usize) -> PopulationSpec {
        PopulationSpec::new(seed, count).expect("valid spec")
    }

    #[rstest]
    fn same_seed_produces_identical_players() {
        assert_eq!(generate_players(&spec(42, 200)), generate_players(&spec(42, 200)));
    }

    #[rstest]
    fn different_seeds_produce_different_ratings() {
        let first: Vec<_> = generate_players(&spec(1, 50))
            .into_iter()
            .map(|p| p.rating)
            .collect();
        let second: Vec<_> = generate_players(&spec(2, 50))
            .into_iter()
            .map(|p| p.rating)
            .collect();
        assert_ne!(first, second);
    }

    #[rstest]
    fn names_are_unique_and_suffixed_by_position() {
        let players = generate_players(&spec(42, 1_000));
        let names: HashSet<_> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), players.len());
        for (index, player) in players.iter().enumerate() {
            assert!(player.name.ends_with(&format!("_{index}")), "{}", player.name);
            assert!(is_valid_player_name(&player.name));
        }
    }

    #[rstest]
    fn ratings_stay_within_the_band() {
        let band = PopulationSpec::with_rating_band(9, 500, 1_000, 1_010).expect("valid band");
        assert!(
            generate_players(&band)
                .iter()
                .all(|p| (1_000..=1_010).contains(&p.rating))
        );
    }

    #[rstest]
    fn showcase_players_are_fixed() {
        let showcase = showcase_players();
        assert_eq!(showcase.len(), SHOWCASE_PLAYER_COUNT);
        assert_eq!(
            showcase.first(),
            Some(&PlayerSeed::new("Legendary_Player_1", 5000))
        );
        assert!(showcase.contains(&PlayerSeed::new("Master_Gamer_2", 4998)));
        assert!(showcase.contains(&PlayerSeed::new("Pro_Player_1", 4990)));
        assert!(showcase.contains(&PlayerSeed::new("Pro_Player_8", 4997)));
    }

    #[rstest]
    fn population_appends_showcase_after_bulk() {
        let population = generate_population(&spec(3, 4));
        assert_eq!(population.len(), 4 + SHOWCASE_PLAYER_COUNT);
        assert_eq!(population.get(4).map(|p| p.name.as_str()), Some("Legendary_Player_1"));
    }

    #[rstest]
    fn empty_population_still_has_showcase() {
        assert_eq!(generate_population(&spec(3, 0)), showcase_players());
    }
}
