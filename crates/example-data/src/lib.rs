//! Deterministic example player population generation for demonstration
//! purposes.
//!
//! This crate produces believable, reproducible leaderboard populations: a
//! bulk of `<first>_<last>_<n>` players with uniformly distributed ratings,
//! topped up with a handful of showcase players pinned near the rating
//! ceiling. It is independent of backend domain types so the backend can
//! depend on it behind an optional feature.
//!
//! # Overview
//!
//! - [`PopulationSpec`] describes how many players to generate, from which
//!   seed, and within which rating band.
//! - [`generate_players`] produces the bulk population.
//! - [`showcase_players`] returns the fixed, high-rated showcase entries.
//! - [`generate_population`] concatenates both.
//!
//! # Example
//!
//! ```
//! use example_data::{PopulationSpec, generate_population};
//!
//! let spec = PopulationSpec::new(42, 3).expect("valid spec");
//! let players = generate_population(&spec);
//!
//! assert_eq!(players.len(), 3 + example_data::SHOWCASE_PLAYER_COUNT);
//! assert_eq!(players, generate_population(&spec));
//! ```

mod error;
mod generator;
mod roster;
mod seed;
mod validation;

pub use error::GenerationError;
pub use generator::{generate_players, generate_population, showcase_players};
pub use roster::{FIRST_NAMES, LAST_NAMES, SHOWCASE_PLAYER_COUNT};
pub use seed::{
    DEFAULT_RATING_CEILING, DEFAULT_RATING_FLOOR, MAX_PLAYER_COUNT, PlayerSeed, PopulationSpec,
};
pub use validation::{PLAYER_NAME_MAX, is_valid_player_name};
