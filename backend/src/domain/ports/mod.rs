//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod leaderboard_query;
mod rating_command;
mod score_index;

#[cfg(test)]
pub use leaderboard_query::MockLeaderboardQuery;
pub use leaderboard_query::{FixtureLeaderboardQuery, LeaderboardQuery, LeaderboardRequest};
#[cfg(test)]
pub use rating_command::MockRatingCommand;
pub use rating_command::{FixtureRatingCommand, RatingCommand, RatingUpdate};
#[cfg(test)]
pub use score_index::MockScoreIndex;
pub use score_index::{IndexStanding, ScanPage, ScoreIndex, ScoreIndexError};
