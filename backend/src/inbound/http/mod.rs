//! HTTP inbound adapter exposing the leaderboard REST endpoints.

pub mod error;
pub mod health;
pub mod leaderboard;
pub mod state;
pub mod update;

pub use error::ApiResult;
