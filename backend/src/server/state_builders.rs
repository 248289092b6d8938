//! Builders for the score index and the HTTP state.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use backend::domain::ports::ScoreIndex;
use backend::domain::{LeaderboardService, SearchEngine};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::InMemoryScoreIndex;
use backend::outbound::redis::{RedisPool, RedisPoolConfig, RedisScoreIndex};
use backend::settings::{IndexBackend, LeaderboardSettings, SearchSettings};

/// Connect the configured score index and make sure it answers.
///
/// # Errors
///
/// Fails when the backend name is invalid, the pool cannot be built, or the
/// index does not answer a ping. Any of these aborts startup.
pub async fn build_score_index(settings: &LeaderboardSettings) -> Result<Arc<dyn ScoreIndex>> {
    let index: Arc<dyn ScoreIndex> = match settings.index_backend()? {
        IndexBackend::Redis => {
            let pool = RedisPool::new(RedisPoolConfig::new(settings.redis_url()))
                .await
                .wrap_err("failed to build the redis connection pool")?;
            Arc::new(RedisScoreIndex::new(pool, settings.index_key()))
        }
        IndexBackend::Memory => Arc::new(InMemoryScoreIndex::new()),
    };
    index
        .ping()
        .await
        .wrap_err("score index did not answer at startup")?;
    info!(
        backend = %settings.index_backend()?,
        key = settings.index_key(),
        "score index connected"
    );
    Ok(index)
}

/// Wire the leaderboard service over `index` with the configured search.
pub async fn build_leaderboard_service(
    index: Arc<dyn ScoreIndex>,
    search: SearchSettings,
) -> LeaderboardService {
    let engine = SearchEngine::hydrate(Arc::clone(&index), search.mode)
        .await
        .with_caps(search.mirror_cap, search.scan_cap);
    info!(strategy = ?engine.mode(), cap = engine.cap(), "search engine ready");
    LeaderboardService::new(index).with_search(engine)
}

/// Share one service instance behind both driving ports.
pub fn build_http_state(service: LeaderboardService, max_page_limit: u64) -> web::Data<HttpState> {
    let service = Arc::new(service);
    let state = HttpState::new(HttpStatePorts {
        leaderboard: service.clone(),
        ratings: service,
    })
    .with_max_page_limit(max_page_limit);
    web::Data::new(state)
}
