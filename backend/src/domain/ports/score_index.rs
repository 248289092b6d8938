//! Driven port for the ordered score index.
//!
//! The index is a sorted associative store mapping member identifiers to
//! integer scores. Each operation is individually atomic; callers get no
//! guarantee that a sequence of operations observes a single snapshot.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{MemberId, ScoredMember, SearchQuery};

define_port_error! {
    /// Errors surfaced by score index adapters.
    pub enum ScoreIndexError {
        /// The backing store could not be reached or a connection could not
        /// be checked out.
        Unavailable { message: String } => "score index unavailable: {message}",
        /// The store answered with an error or an unexpected reply.
        Query { message: String } => "score index query failed: {message}",
    }
}

/// A member's global position and score, as looked up individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStanding {
    /// 0-based position from the top of the descending ordering.
    pub reverse_rank: u64,
    /// Current score.
    pub score: i64,
}

impl IndexStanding {
    /// Pair a reverse rank with a score.
    pub fn new(reverse_rank: u64, score: i64) -> Self {
        Self {
            reverse_rank,
            score,
        }
    }
}

/// One step of a cursor-based scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// Continuation cursor; `0` means the scan is complete.
    pub cursor: u64,
    /// Rows yielded by this step. May contain rows that do not match the
    /// query or that an earlier step already yielded.
    pub items: Vec<ScoredMember>,
}

impl ScanPage {
    /// Whether the scan has no further steps.
    pub fn is_last(&self) -> bool {
        self.cursor == 0
    }
}

/// Port for reading and writing the ordered score index.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreIndex: Send + Sync {
    /// Insert or overwrite a member's score.
    async fn upsert(&self, id: &MemberId, score: i64) -> Result<(), ScoreIndexError>;

    /// Insert or overwrite several members in one round trip.
    async fn upsert_many(&self, members: &[ScoredMember]) -> Result<(), ScoreIndexError>;

    /// Total member count.
    async fn count(&self) -> Result<u64, ScoreIndexError>;

    /// Number of members whose score is strictly greater than `score`.
    async fn count_above(&self, score: i64) -> Result<u64, ScoreIndexError>;

    /// The inclusive, 0-based `[start, stop]` window in descending score
    /// order. Ties follow the index's own deterministic member ordering.
    async fn range_desc(&self, start: u64, stop: u64)
    -> Result<Vec<ScoredMember>, ScoreIndexError>;

    /// 0-based position of `id` from the top, if present.
    async fn reverse_rank(&self, id: &MemberId) -> Result<Option<u64>, ScoreIndexError>;

    /// Current score of `id`, if present.
    async fn score_of(&self, id: &MemberId) -> Result<Option<i64>, ScoreIndexError>;

    /// Look up the standing of every member in `ids` in a single batch.
    ///
    /// The result lines up with `ids`; members absent from the index yield
    /// `None`.
    async fn ranks_and_scores(
        &self,
        ids: &[MemberId],
    ) -> Result<Vec<Option<IndexStanding>>, ScoreIndexError>;

    /// Advance a best-effort scan for members whose identifier contains
    /// `query`. Start with cursor `0` and loop until [`ScanPage::is_last`].
    /// `batch_hint` suggests how many members each step should examine.
    async fn scan_matching(
        &self,
        cursor: u64,
        query: &SearchQuery,
        batch_hint: usize,
    ) -> Result<ScanPage, ScoreIndexError>;

    /// Every member identifier currently stored.
    async fn all_members(&self) -> Result<Vec<MemberId>, ScoreIndexError>;

    /// Check that the index is reachable.
    async fn ping(&self) -> Result<(), ScoreIndexError>;

    /// Remove every member.
    async fn clear(&self) -> Result<(), ScoreIndexError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn error_constructors_accept_str() {
        assert_eq!(
            ScoreIndexError::unavailable("connection refused").to_string(),
            "score index unavailable: connection refused"
        );
        assert_eq!(
            ScoreIndexError::query("WRONGTYPE").to_string(),
            "score index query failed: WRONGTYPE"
        );
    }

    #[rstest]
    #[case(0, true)]
    #[case(17, false)]
    fn scan_page_reports_completion(#[case] cursor: u64, #[case] last: bool) {
        let page = ScanPage {
            cursor,
            items: Vec::new(),
        };
        assert_eq!(page.is_last(), last);
    }
}
