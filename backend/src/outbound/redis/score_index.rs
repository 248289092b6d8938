//! Redis sorted-set implementation of the [`ScoreIndex`] port.
//!
//! Every port call maps onto one Redis command or one pipeline, so each call
//! is atomic on the server. Scores are stored as doubles; reads truncate them
//! toward zero.

use async_trait::async_trait;
use bb8_redis::redis::{self, RedisError};
use tracing::{debug, warn};

use super::glob::containment_pattern;
use super::pool::{RedisPool, RedisPoolError};
use crate::domain::ports::{IndexStanding, ScanPage, ScoreIndex, ScoreIndexError};
use crate::domain::{MemberId, ScoredMember, SearchQuery};

/// Score index backed by one Redis sorted set.
#[derive(Clone)]
pub struct RedisScoreIndex {
    pool: RedisPool,
    key: String,
}

impl RedisScoreIndex {
    /// Use the sorted set stored at `key`.
    pub fn new(pool: RedisPool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }

    /// Name of the sorted set.
    pub fn key(&self) -> &str {
        &self.key
    }
}

fn map_pool_error(error: RedisPoolError) -> ScoreIndexError {
    ScoreIndexError::unavailable(error.to_string())
}

fn map_redis_error(error: RedisError) -> ScoreIndexError {
    if error.is_io_error()
        || error.is_connection_dropped()
        || error.is_connection_refusal()
        || error.is_timeout()
    {
        ScoreIndexError::unavailable(error.to_string())
    } else {
        ScoreIndexError::query(error.to_string())
    }
}

// Float to integer `as` casts saturate and map NaN to zero.
fn score_from_redis(raw: f64) -> i64 {
    raw.trunc() as i64
}

fn rank_from_redis(raw: f64) -> u64 {
    raw.trunc() as u64
}

fn rows_from_redis(rows: Vec<(String, f64)>) -> Vec<ScoredMember> {
    rows.into_iter()
        .filter_map(|(member, score)| match MemberId::new(member) {
            Ok(id) => Some(ScoredMember::new(id, score_from_redis(score))),
            Err(error) => {
                warn!(%error, "ignoring sorted-set member with an invalid identifier");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ScoreIndex for RedisScoreIndex {
    async fn upsert(&self, id: &MemberId, score: i64) -> Result<(), ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let _: i64 = redis::cmd("ZADD")
            .arg(&self.key)
            .arg(score)
            .arg(id.as_ref())
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn upsert_many(&self, members: &[ScoredMember]) -> Result<(), ScoreIndexError> {
        if members.is_empty() {
            return Ok(());
        }
        let mut command = redis::cmd("ZADD");
        command.arg(&self.key);
        for member in members {
            command.arg(member.score).arg(member.id.as_ref());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let added: i64 = command
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        debug!(key = %self.key, written = members.len(), added, "batch upsert");
        Ok(())
    }

    async fn count(&self) -> Result<u64, ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        redis::cmd("ZCARD")
            .arg(&self.key)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)
    }

    async fn count_above(&self, score: i64) -> Result<u64, ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        redis::cmd("ZCOUNT")
            .arg(&self.key)
            .arg(format!("({score}"))
            .arg("+inf")
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)
    }

    async fn range_desc(
        &self,
        start: u64,
        stop: u64,
    ) -> Result<Vec<ScoredMember>, ScoreIndexError> {
        if start > stop {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, f64)> = redis::cmd("ZREVRANGE")
            .arg(&self.key)
            .arg(start)
            .arg(stop)
            .arg("WITHSCORES")
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(rows_from_redis(rows))
    }

    async fn reverse_rank(&self, id: &MemberId) -> Result<Option<u64>, ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        redis::cmd("ZREVRANK")
            .arg(&self.key)
            .arg(id.as_ref())
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)
    }

    async fn score_of(&self, id: &MemberId) -> Result<Option<i64>, ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let score: Option<f64> = redis::cmd("ZSCORE")
            .arg(&self.key)
            .arg(id.as_ref())
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(score.map(score_from_redis))
    }

    async fn ranks_and_scores(
        &self,
        ids: &[MemberId],
    ) -> Result<Vec<Option<IndexStanding>>, ScoreIndexError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut pipeline = redis::pipe();
        for id in ids {
            pipeline
                .cmd("ZREVRANK")
                .arg(&self.key)
                .arg(id.as_ref())
                .cmd("ZSCORE")
                .arg(&self.key)
                .arg(id.as_ref());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Ranks arrive as integers and scores as strings; both decode as f64.
        let replies: Vec<Option<f64>> = pipeline
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        if replies.len() != ids.len() * 2 {
            return Err(ScoreIndexError::query(format!(
                "expected {} pipeline replies, got {}",
                ids.len() * 2,
                replies.len()
            )));
        }
        Ok(replies
            .chunks_exact(2)
            .map(|pair| match pair {
                [Some(rank), Some(score)] => Some(IndexStanding::new(
                    rank_from_redis(*rank),
                    score_from_redis(*score),
                )),
                _ => None,
            })
            .collect())
    }

    async fn scan_matching(
        &self,
        cursor: u64,
        query: &SearchQuery,
        batch_hint: usize,
    ) -> Result<ScanPage, ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (next, rows): (u64, Vec<(String, f64)>) = redis::cmd("ZSCAN")
            .arg(&self.key)
            .arg(cursor)
            .arg("MATCH")
            .arg(containment_pattern(query))
            .arg("COUNT")
            .arg(batch_hint.max(1))
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        let mut items = rows_from_redis(rows);
        items.retain(|row| query.matches(row.id.as_ref()));
        Ok(ScanPage {
            cursor: next,
            items,
        })
    }

    async fn all_members(&self) -> Result<Vec<MemberId>, ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let members: Vec<String> = redis::cmd("ZRANGE")
            .arg(&self.key)
            .arg(0)
            .arg(-1)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(members
            .into_iter()
            .filter_map(|member| MemberId::new(member).ok())
            .collect())
    }

    async fn ping(&self) -> Result<(), ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ScoreIndexError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let _: i64 = redis::cmd("DEL")
            .arg(&self.key)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}
