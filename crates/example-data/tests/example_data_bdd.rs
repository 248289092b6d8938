//! Behavioural tests for example-data crate.
//!
//! These tests validate the crate's behaviour against Gherkin scenarios
//! covering deterministic generation, generated constraints, and spec
//! validation.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use example_data::{
    DEFAULT_RATING_CEILING, DEFAULT_RATING_FLOOR, GenerationError, PlayerSeed, PopulationSpec,
    generate_population, is_valid_player_name,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

/// Test world holding the spec under test and generated players.
#[derive(Default, ScenarioState)]
struct World {
    band: Slot<(i64, i64)>,
    spec_result: Slot<Result<PopulationSpec, GenerationError>>,
    generated: Slot<Vec<PlayerSeed>>,
    second_generation: Slot<Vec<PlayerSeed>>,
}

impl World {
    fn spec(&self) -> PopulationSpec {
        self.spec_result
            .get()
            .expect("spec should be set")
            .expect("spec should be valid")
    }

    fn players(&self) -> Vec<PlayerSeed> {
        self.generated.get().expect("players should be generated")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("a population spec with seed {seed:u64} and {count:usize} players")]
fn a_population_spec(world: &World, seed: u64, count: usize) {
    world.spec_result.set(PopulationSpec::new(seed, count));
}

#[given("a rating band from {floor:i64} to {ceiling:i64}")]
fn a_rating_band(world: &World, floor: i64, ceiling: i64) {
    world.band.set((floor, ceiling));
}

#[when("the population spec is built")]
fn the_population_spec_is_built(world: &World) {
    let (floor, ceiling) = world.band.get().expect("band should be set");
    world
        .spec_result
        .set(PopulationSpec::with_rating_band(1, 10, floor, ceiling));
}

#[when("the population is generated")]
fn the_population_is_generated(world: &World) {
    world.generated.set(generate_population(&world.spec()));
}

#[when("the population is generated twice")]
fn the_population_is_generated_twice(world: &World) {
    let spec = world.spec();
    world.generated.set(generate_population(&spec));
    world.second_generation.set(generate_population(&spec));
}

#[then("both generations produce identical players")]
fn both_generations_produce_identical_players(world: &World) {
    let second = world
        .second_generation
        .get()
        .expect("second generation should be set");
    assert_eq!(world.players(), second, "Generations should be deterministic");
}

#[then("every bulk player has a valid name and an in-band rating")]
fn every_bulk_player_is_valid(world: &World) {
    let spec = world.spec();
    for player in world.players().iter().take(spec.player_count()) {
        assert!(is_valid_player_name(&player.name), "{}", player.name);
        assert!(
            (DEFAULT_RATING_FLOOR..=DEFAULT_RATING_CEILING).contains(&player.rating),
            "{player:?}"
        );
    }
}

#[then("the population contains {count:usize} players")]
fn the_population_contains(world: &World, count: usize) {
    assert_eq!(world.players().len(), count);
}

#[then("the highest rated player is \"{name}\" with rating {rating:i64}")]
fn the_highest_rated_player_is(world: &World, name: String, rating: i64) {
    let players = world.players();
    let top = players
        .iter()
        .max_by_key(|player| player.rating)
        .expect("population is not empty");
    assert_eq!(top, &PlayerSeed::new(name, rating));
}

#[then("building fails with an invalid rating range error")]
fn building_fails(world: &World) {
    match world.spec_result.get().expect("spec result should be set") {
        Err(GenerationError::InvalidRatingRange { .. }) => {}
        other => panic!("Expected InvalidRatingRange, got: {other:?}"),
    }
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Same seed produces identical populations"
)]
fn same_seed_produces_identical_populations(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Generated players respect name and rating constraints"
)]
fn generated_players_respect_constraints(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Showcase players sit at the top of the population"
)]
fn showcase_players_sit_at_the_top(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Inverted rating band is rejected"
)]
fn inverted_rating_band_is_rejected(world: World) {
    let _ = world;
}
