//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the driving ports and can be exercised without a score index.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLeaderboardQuery, FixtureRatingCommand, LeaderboardQuery, RatingCommand,
};

/// Most rows returned per page when no explicit cap is configured.
pub const DEFAULT_MAX_PAGE_LIMIT: u64 = 1000;

/// Port implementations consumed by the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub leaderboard: Arc<dyn LeaderboardQuery>,
    pub ratings: Arc<dyn RatingCommand>,
}

impl HttpStatePorts {
    /// Deterministic fixtures for both ports.
    pub fn fixtures() -> Self {
        Self {
            leaderboard: Arc::new(FixtureLeaderboardQuery),
            ratings: Arc::new(FixtureRatingCommand),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub leaderboard: Arc<dyn LeaderboardQuery>,
    pub ratings: Arc<dyn RatingCommand>,
    max_page_limit: u64,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{FixtureLeaderboardQuery, FixtureRatingCommand};
    /// use backend::inbound::http::state::{DEFAULT_MAX_PAGE_LIMIT, HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     leaderboard: Arc::new(FixtureLeaderboardQuery),
    ///     ratings: Arc::new(FixtureRatingCommand),
    /// });
    /// assert_eq!(state.max_page_limit(), DEFAULT_MAX_PAGE_LIMIT);
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            leaderboard,
            ratings,
        } = ports;
        Self {
            leaderboard,
            ratings,
            max_page_limit: DEFAULT_MAX_PAGE_LIMIT,
        }
    }

    /// Cap the rows returned per page. The requested `limit` still fixes the
    /// page offset. Zero is raised to one.
    #[must_use]
    pub fn with_max_page_limit(mut self, limit: u64) -> Self {
        self.max_page_limit = limit.max(1);
        self
    }

    /// Most rows a single page may return.
    pub fn max_page_limit(&self) -> u64 {
        self.max_page_limit
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(25, 25)]
    #[case(0, 1)]
    fn page_limit_cap_is_at_least_one(#[case] requested: u64, #[case] expected: u64) {
        let state = HttpState::from(HttpStatePorts::fixtures()).with_max_page_limit(requested);
        assert_eq!(state.max_page_limit(), expected);
    }
}
