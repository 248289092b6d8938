//! Driving port for administrative rating writes.

use async_trait::async_trait;

use crate::domain::{Error, MemberId, Rating};

/// Outcome of a successful rating write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingUpdate {
    /// Member whose rating was written.
    pub id: MemberId,
    /// Rating now stored.
    pub rating: Rating,
}

/// Domain use-case port for setting a member's rating directly.
///
/// Unknown members are created, matching the index's upsert semantics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingCommand: Send + Sync {
    /// Store `rating` for `id`, creating the member if needed.
    async fn set_rating(&self, id: MemberId, rating: Rating) -> Result<RatingUpdate, Error>;
}

/// Fixture command that acknowledges every write without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRatingCommand;

#[async_trait]
impl RatingCommand for FixtureRatingCommand {
    async fn set_rating(&self, id: MemberId, rating: Rating) -> Result<RatingUpdate, Error> {
        Ok(RatingUpdate { id, rating })
    }
}
