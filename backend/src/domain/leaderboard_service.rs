//! Leaderboard domain service.
//!
//! Implements the [`LeaderboardQuery`] and [`RatingCommand`] driving ports
//! over a [`ScoreIndex`]. Full listings push the page window down to the
//! index; searches rank the matched set and slice it locally.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated, paginate};
use tracing::{debug, warn};

use crate::domain::ports::{
    LeaderboardQuery, LeaderboardRequest, RatingCommand, RatingUpdate, ScoreIndex,
    ScoreIndexError,
};
use crate::domain::{
    Error, LeaderboardPage, MemberId, Rating, SearchEngine, SearchQuery, anchor_leading_ties,
    resolve_ranks,
};

/// Leaderboard service implementing the driving ports.
#[derive(Clone)]
pub struct LeaderboardService {
    index: Arc<dyn ScoreIndex>,
    search: SearchEngine,
}

impl LeaderboardService {
    /// Create a service that searches by scanning `index`.
    pub fn new(index: Arc<dyn ScoreIndex>) -> Self {
        let search = SearchEngine::scanning(Arc::clone(&index));
        Self { index, search }
    }

    /// Replace the search engine, e.g. with a mirrored one.
    #[must_use]
    pub fn with_search(mut self, search: SearchEngine) -> Self {
        self.search = search;
        self
    }

    fn map_index_error(error: ScoreIndexError) -> Error {
        match error {
            ScoreIndexError::Unavailable { message } => {
                Error::service_unavailable(format!("leaderboard index unavailable: {message}"))
            }
            ScoreIndexError::Query { message } => {
                Error::service_unavailable(format!("leaderboard index query failed: {message}"))
            }
        }
    }

    async fn list(&self, page: PageRequest) -> Result<LeaderboardPage, Error> {
        let total = self.index.count().await.map_err(Self::map_index_error)?;
        let window = page.window();
        if window.start >= total {
            return Ok(Paginated::empty(total));
        }

        let stop = window.stop.min(total - 1);
        let rows = self
            .index
            .range_desc(window.start, stop)
            .await
            .map_err(Self::map_index_error)?;
        let mut ranked = resolve_ranks(rows, window.start);

        // A window opening inside a tie group would otherwise rank its
        // leading rows by position.
        let leading_score = ranked.first().map(|member| member.score);
        if let (true, Some(score)) = (window.start > 0, leading_score) {
            match self.index.count_above(score).await {
                Ok(ahead) => anchor_leading_ties(&mut ranked, ahead.saturating_add(1)),
                Err(error) => warn!(
                    %error,
                    start = window.start,
                    "could not anchor leading ties; keeping positional ranks"
                ),
            }
        }
        Ok(Paginated::new(ranked, total))
    }

    async fn search(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<LeaderboardPage, Error> {
        let matches = self
            .search
            .search(query)
            .await
            .map_err(Self::map_index_error)?;
        debug!(query = %query, matched = matches.len(), "search resolved");
        Ok(paginate(matches, page))
    }
}

#[async_trait]
impl LeaderboardQuery for LeaderboardService {
    async fn leaderboard(&self, request: LeaderboardRequest) -> Result<LeaderboardPage, Error> {
        match &request.query {
            Some(query) => self.search(query, request.page).await,
            None => self.list(request.page).await,
        }
    }
}

#[async_trait]
impl RatingCommand for LeaderboardService {
    async fn set_rating(&self, id: MemberId, rating: Rating) -> Result<RatingUpdate, Error> {
        self.index
            .upsert(&id, rating.value())
            .await
            .map_err(Self::map_index_error)?;
        debug!(member = %id, rating = rating.value(), "rating written");
        Ok(RatingUpdate { id, rating })
    }
}
