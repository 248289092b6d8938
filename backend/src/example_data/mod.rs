//! Startup wiring for deterministic leaderboard seeding.

mod config;
mod startup;

pub use config::SeedSettings;
pub use startup::{SeedOutcome, StartupSeedingError, seed_leaderboard_on_startup};
