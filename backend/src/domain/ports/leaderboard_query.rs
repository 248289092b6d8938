//! Driving port for leaderboard reads.
//!
//! Inbound adapters call this port to list or search the leaderboard without
//! knowing which index backs it. Production wires the leaderboard service;
//! tests can use the deterministic fixture below.

use async_trait::async_trait;
use pagination::{PageRequest, paginate};

use crate::domain::{Error, LeaderboardPage, MemberId, RankedMember, SearchQuery};

/// A listing or search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardRequest {
    /// Normalised page and limit.
    pub page: PageRequest,
    /// Search filter; `None` lists the full ordering.
    pub query: Option<SearchQuery>,
}

impl LeaderboardRequest {
    /// List the full ordering.
    pub fn listing(page: PageRequest) -> Self {
        Self { page, query: None }
    }

    /// Search for members containing `query`.
    pub fn search(page: PageRequest, query: SearchQuery) -> Self {
        Self {
            page,
            query: Some(query),
        }
    }
}

/// Domain use-case port for reading ranked pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardQuery: Send + Sync {
    /// Return one page of ranked members together with the size of the
    /// full (or matched) result set.
    async fn leaderboard(&self, request: LeaderboardRequest) -> Result<LeaderboardPage, Error>;
}

/// Fixture leaderboard used when no index is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLeaderboardQuery;

const FIXTURE_ROWS: [(&str, i64, u64); 4] = [
    ("Legendary_Player_1", 5000, 1),
    ("Master_Gamer_2", 4998, 2),
    ("Pro_Player_1", 4990, 3),
    ("Pro_Player_2", 4990, 3),
];

#[async_trait]
impl LeaderboardQuery for FixtureLeaderboardQuery {
    async fn leaderboard(&self, request: LeaderboardRequest) -> Result<LeaderboardPage, Error> {
        let mut rows = Vec::with_capacity(FIXTURE_ROWS.len());
        for (id, score, rank) in FIXTURE_ROWS {
            let id = MemberId::new(id)
                .map_err(|err| Error::internal(format!("invalid fixture member: {err}")))?;
            rows.push(RankedMember { id, score, rank });
        }
        if let Some(query) = &request.query {
            rows.retain(|member| query.matches(member.id.as_ref()));
        }
        Ok(paginate(rows, request.page))
    }
}
