//! Redis-backed score index.
//!
//! The leaderboard lives in one sorted set. [`RedisPool`] owns connection
//! checkout and [`RedisScoreIndex`] translates port calls into sorted-set
//! commands.

mod glob;
mod pool;
mod score_index;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError};
pub use score_index::RedisScoreIndex;
