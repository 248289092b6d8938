//! Read-compute-write of a single member's rating.
//!
//! The read and the write are separate index operations. A concurrent writer
//! touching the same member in between loses its update; this race is
//! accepted for simulated scores. Swapping the plain upsert for a conditional
//! write would only touch this module.

use std::sync::Arc;

use crate::domain::ports::{RatingUpdate, ScoreIndex, ScoreIndexError};
use crate::domain::{MemberId, Rating};

/// Applies a delta to a member's current rating.
#[derive(Clone)]
pub struct RatingPerturber {
    index: Arc<dyn ScoreIndex>,
}

impl RatingPerturber {
    /// Perturb ratings stored in `index`.
    pub fn new(index: Arc<dyn ScoreIndex>) -> Self {
        Self { index }
    }

    /// Read `id`'s score, ask `delta` for a change and write back the clamped
    /// result.
    ///
    /// Returns `Ok(None)` when the member no longer exists; nothing is
    /// written in that case.
    pub async fn perturb<F>(
        &self,
        id: &MemberId,
        delta: F,
    ) -> Result<Option<RatingUpdate>, ScoreIndexError>
    where
        F: FnOnce(i64) -> i64 + Send,
    {
        let Some(current) = self.index.score_of(id).await? else {
            return Ok(None);
        };
        let rating = Rating::clamped(current.saturating_add(delta(current)));
        self.index.upsert(id, rating.value()).await?;
        Ok(Some(RatingUpdate {
            id: id.clone(),
            rating,
        }))
    }
}
