//! Seeding configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PLAYER_COUNT: usize = 10_000;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration values controlling population seeding at startup.
///
/// The switches default to on. They are read from the environment and
/// config file only: a clap flag can only ever say `true`, so an absent flag
/// would otherwise turn them off.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEADERBOARD_SEED")]
pub struct SeedSettings {
    /// Seed the leaderboard on startup.
    #[ortho_config(default = true, skip_cli)]
    pub enabled: bool,
    /// Delete the leaderboard before seeding.
    #[ortho_config(default = true, skip_cli)]
    pub reset: bool,
    /// Number of generated players, showcase players excluded.
    pub player_count: Option<usize>,
    /// RNG seed for the generated population.
    pub seed: Option<u64>,
    /// Players written per index call.
    pub batch_size: Option<usize>,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            reset: true,
            player_count: None,
            seed: None,
            batch_size: None,
        }
    }
}

impl SeedSettings {
    /// Load from the environment and config file only; command-line flags
    /// belong to the server settings.
    ///
    /// # Errors
    ///
    /// Returns the loader's message when a source is malformed.
    pub fn load_from_env() -> Result<Self, String> {
        let program = std::env::args_os().take(1);
        Self::load_from_iter(program).map_err(|err| err.to_string())
    }

    pub fn player_count(&self) -> usize {
        self.player_count.unwrap_or(DEFAULT_PLAYER_COUNT)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Batch size, never below one.
    pub fn batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE).max(1)
    }
}
