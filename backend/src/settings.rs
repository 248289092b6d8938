//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `LEADERBOARD_*` environment variables, command-line flags
//! and an optional config file. Fields are optional apart from the
//! `live_enabled` switch; accessors apply the defaults, and
//! [`LeaderboardSettings::validate`] turns the raw values into typed settings
//! or a [`SettingsError`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    DEFAULT_MIRROR_CAP, DEFAULT_SCAN_CAP, LiveUpdateSettings, LiveUpdateSettingsError,
    ParseSearchModeError, SearchMode,
};

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_INDEX_KEY: &str = "leaderboard";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_PAGE_LIMIT: u64 = 1000;

/// Errors raised while turning raw configuration into typed settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Configuration sources could not be read or merged.
    #[error("failed to load configuration: {0}")]
    Load(String),
    /// `index_backend` names no known backend.
    #[error("unknown index backend '{0}', expected 'redis' or 'memory'")]
    UnknownBackend(String),
    /// `search_strategy` names no known strategy.
    #[error(transparent)]
    SearchStrategy(#[from] ParseSearchModeError),
    /// Live update settings are inconsistent.
    #[error("invalid live update settings: {0}")]
    LiveUpdates(#[from] LiveUpdateSettingsError),
    /// A numeric setting must be positive.
    #[error("{field} must be greater than zero")]
    Zero {
        /// Name of the offending setting.
        field: &'static str,
    },
}

/// Which score index implementation backs the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexBackend {
    /// Redis sorted set reached through a connection pool.
    #[default]
    Redis,
    /// In-process sorted set; data is lost on restart.
    Memory,
}

impl FromStr for IndexBackend {
    type Err = SettingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(SettingsError::UnknownBackend(raw.to_owned())),
        }
    }
}

impl fmt::Display for IndexBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Redis => "redis",
            Self::Memory => "memory",
        })
    }
}

/// Search configuration after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub mode: SearchMode,
    /// Most matches ranked by mirror search.
    pub mirror_cap: usize,
    /// Most matches ranked by scan search.
    pub scan_cap: usize,
}

/// Raw configuration for the leaderboard server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEADERBOARD")]
pub struct LeaderboardSettings {
    /// Redis connection string.
    pub redis_url: Option<String>,
    /// Sorted-set key holding the leaderboard.
    pub index_key: Option<String>,
    /// `redis` or `memory`.
    pub index_backend: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Most rows returned by one `GET /leaderboard` page.
    pub max_page_limit: Option<u64>,
    /// `mirror` or `scan`.
    pub search_strategy: Option<String>,
    /// Matches ranked per mirror search.
    pub search_mirror_cap: Option<usize>,
    /// Matches ranked per scan search.
    pub search_scan_cap: Option<usize>,
    /// Run the live update worker. Read from the environment and config file
    /// only, since an absent clap switch would turn it off.
    #[ortho_config(default = true, skip_cli)]
    pub live_enabled: bool,
    /// Milliseconds between worker ticks.
    pub live_interval_ms: Option<u64>,
    /// Top slice always included in the worker's candidate set.
    pub live_top_k: Option<u64>,
    /// Size of the randomly placed window added to the candidates.
    pub live_sample_window: Option<u64>,
    pub live_min_updates: Option<u32>,
    pub live_max_updates: Option<u32>,
    /// Top slice targeted by the hot burst.
    pub live_hot_k: Option<u64>,
    /// Updates applied by the hot burst.
    pub live_hot_updates: Option<u32>,
    /// Scores at or above this count as near the maximum.
    pub live_near_max_threshold: Option<i64>,
    /// Percent chance (0 to 100) that a near-max member moves down.
    pub live_near_max_down_percent: Option<u32>,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            index_key: None,
            index_backend: None,
            host: None,
            port: None,
            max_page_limit: None,
            search_strategy: None,
            search_mirror_cap: None,
            search_scan_cap: None,
            live_enabled: true,
            live_interval_ms: None,
            live_top_k: None,
            live_sample_window: None,
            live_min_updates: None,
            live_max_updates: None,
            live_hot_k: None,
            live_hot_updates: None,
            live_near_max_threshold: None,
            live_near_max_down_percent: None,
        }
    }
}

impl LeaderboardSettings {
    /// Load from the process arguments, environment and config file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source is malformed.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter(std::env::args_os())
            .map_err(|err| SettingsError::Load(err.to_string()))
    }

    pub fn redis_url(&self) -> &str {
        self.redis_url.as_deref().unwrap_or(DEFAULT_REDIS_URL)
    }

    pub fn index_key(&self) -> &str {
        self.index_key.as_deref().unwrap_or(DEFAULT_INDEX_KEY)
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn max_page_limit(&self) -> u64 {
        self.max_page_limit.unwrap_or(DEFAULT_MAX_PAGE_LIMIT)
    }

    pub fn live_enabled(&self) -> bool {
        self.live_enabled
    }

    /// Parse `index_backend`, defaulting to Redis.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownBackend`] for unrecognised names.
    pub fn index_backend(&self) -> Result<IndexBackend, SettingsError> {
        self.index_backend
            .as_deref()
            .map_or(Ok(IndexBackend::default()), str::parse)
    }

    /// Parse the search strategy and caps.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown strategy or a zero cap.
    pub fn search(&self) -> Result<SearchSettings, SettingsError> {
        let mode = self
            .search_strategy
            .as_deref()
            .map_or(Ok(SearchMode::default()), str::parse)?;
        let mirror_cap = positive(
            "search_mirror_cap",
            self.search_mirror_cap,
            DEFAULT_MIRROR_CAP,
        )?;
        let scan_cap = positive("search_scan_cap", self.search_scan_cap, DEFAULT_SCAN_CAP)?;
        Ok(SearchSettings {
            mode,
            mirror_cap,
            scan_cap,
        })
    }

    /// Overlay configured live update values on the defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::LiveUpdates`] when the result is inconsistent.
    pub fn live_updates(&self) -> Result<LiveUpdateSettings, SettingsError> {
        let defaults = LiveUpdateSettings::default();
        let settings = LiveUpdateSettings {
            interval: self
                .live_interval_ms
                .map_or(defaults.interval, Duration::from_millis),
            top_k: self.live_top_k.unwrap_or(defaults.top_k),
            sample_window: self.live_sample_window.unwrap_or(defaults.sample_window),
            min_updates: self.live_min_updates.unwrap_or(defaults.min_updates),
            max_updates: self.live_max_updates.unwrap_or(defaults.max_updates),
            hot_k: self.live_hot_k.unwrap_or(defaults.hot_k),
            hot_updates: self.live_hot_updates.unwrap_or(defaults.hot_updates),
            near_max_threshold: self
                .live_near_max_threshold
                .unwrap_or(defaults.near_max_threshold),
            near_max_down_percent: self
                .live_near_max_down_percent
                .unwrap_or(defaults.near_max_down_percent),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check every derived setting at once so startup fails before any I/O.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] encountered.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.index_backend()?;
        self.search()?;
        self.live_updates()?;
        if self.max_page_limit() == 0 {
            return Err(SettingsError::Zero {
                field: "max_page_limit",
            });
        }
        Ok(())
    }
}

fn positive(
    field: &'static str,
    value: Option<usize>,
    default: usize,
) -> Result<usize, SettingsError> {
    match value.unwrap_or(default) {
        0 => Err(SettingsError::Zero { field }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 9] = [
        "LEADERBOARD_REDIS_URL",
        "LEADERBOARD_INDEX_KEY",
        "LEADERBOARD_INDEX_BACKEND",
        "LEADERBOARD_PORT",
        "LEADERBOARD_SEARCH_STRATEGY",
        "LEADERBOARD_LIVE_ENABLED",
        "LEADERBOARD_LIVE_INTERVAL_MS",
        "LEADERBOARD_LIVE_MIN_UPDATES",
        "LEADERBOARD_LIVE_MAX_UPDATES",
    ];

    fn load_from_empty_args() -> LeaderboardSettings {
        LeaderboardSettings::load_from_iter([OsString::from("leaderboard")])
            .expect("config should load")
    }

    fn cleared_env() -> Vec<(&'static str, Option<String>)> {
        KEYS.iter().map(|key| (*key, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();
        assert_eq!(settings.redis_url(), DEFAULT_REDIS_URL);
        assert_eq!(settings.index_key(), "leaderboard");
        assert_eq!(settings.port(), 8080);
        assert_eq!(settings.index_backend(), Ok(IndexBackend::Redis));
        assert_eq!(
            settings.search(),
            Ok(SearchSettings {
                mode: SearchMode::Mirror,
                mirror_cap: 50,
                scan_cap: 10_000,
            })
        );
        assert_eq!(settings.live_updates(), Ok(LiveUpdateSettings::default()));
        assert!(settings.live_enabled());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut env = cleared_env();
        env.extend([
            ("LEADERBOARD_REDIS_URL", Some("redis://cache:6380".to_owned())),
            ("LEADERBOARD_INDEX_BACKEND", Some("memory".to_owned())),
            ("LEADERBOARD_PORT", Some("9000".to_owned())),
            ("LEADERBOARD_SEARCH_STRATEGY", Some("scan".to_owned())),
            ("LEADERBOARD_LIVE_INTERVAL_MS", Some("250".to_owned())),
        ]);
        let _guard = lock_env(env);

        let settings = load_from_empty_args();
        assert_eq!(settings.redis_url(), "redis://cache:6380");
        assert_eq!(settings.port(), 9000);
        assert_eq!(settings.index_backend(), Ok(IndexBackend::Memory));
        assert_eq!(
            settings.search().map(|search| search.mode),
            Ok(SearchMode::Scan)
        );
        assert_eq!(
            settings.live_updates().map(|live| live.interval),
            Ok(Duration::from_millis(250))
        );
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("false"), false)]
    #[case(Some("true"), true)]
    fn live_updates_switch_defaults_on(#[case] raw: Option<&str>, #[case] expected: bool) {
        let mut env = cleared_env();
        env.extend([
            ("LEADERBOARD_LIVE_ENABLED", raw.map(str::to_owned)),
            ("LEADERBOARD_PORT", Some("9100".to_owned())),
        ]);
        let _guard = lock_env(env);

        let settings = load_from_empty_args();
        assert_eq!(settings.live_enabled(), expected);
        assert_eq!(settings.port(), 9100);
    }

    #[rstest]
    fn default_settings_run_live_updates() {
        assert!(LeaderboardSettings::default().live_enabled());
    }

    #[rstest]
    fn inverted_update_range_fails_validation() {
        let mut env = cleared_env();
        env.extend([
            ("LEADERBOARD_LIVE_MIN_UPDATES", Some("9".to_owned())),
            ("LEADERBOARD_LIVE_MAX_UPDATES", Some("3".to_owned())),
        ]);
        let _guard = lock_env(env);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::LiveUpdates(
                LiveUpdateSettingsError::InvertedUpdateRange { min: 9, max: 3 }
            ))
        ));
    }

    #[rstest]
    #[case(LeaderboardSettings { index_backend: Some("sqlite".into()), ..Default::default() })]
    #[case(LeaderboardSettings { search_strategy: Some("fuzzy".into()), ..Default::default() })]
    #[case(LeaderboardSettings { search_scan_cap: Some(0), ..Default::default() })]
    #[case(LeaderboardSettings { max_page_limit: Some(0), ..Default::default() })]
    #[case(LeaderboardSettings { live_interval_ms: Some(0), ..Default::default() })]
    fn invalid_values_are_rejected(#[case] settings: LeaderboardSettings) {
        assert!(settings.validate().is_err());
    }

    #[rstest]
    #[case("redis", IndexBackend::Redis)]
    #[case(" Memory ", IndexBackend::Memory)]
    fn backend_names_parse_case_insensitively(#[case] raw: &str, #[case] expected: IndexBackend) {
        assert_eq!(raw.parse::<IndexBackend>(), Ok(expected));
    }
}
