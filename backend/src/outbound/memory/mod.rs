//! In-process score index.
//!
//! Reproduces the Redis sorted-set ordering so tests and local development
//! see the same ranks as production. Each port call takes the lock once, which
//! gives the same per-operation atomicity the Redis adapter has.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{IndexStanding, ScanPage, ScoreIndex, ScoreIndexError};
use crate::domain::{MemberId, ScoredMember, SearchQuery};

mod score_set;

use score_set::{ScoreSet, to_u64, to_usize};

/// Score index held in process memory.
///
/// # Examples
/// ```
/// use backend::domain::MemberId;
/// use backend::domain::ports::ScoreIndex;
/// use backend::outbound::memory::InMemoryScoreIndex;
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let index = InMemoryScoreIndex::default();
/// let id = MemberId::new("kiran_patel_3").expect("id");
/// index.upsert(&id, 2400).await.expect("upsert");
/// assert_eq!(index.score_of(&id).await.expect("lookup"), Some(2400));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryScoreIndex {
    set: RwLock<ScoreSet>,
}

impl InMemoryScoreIndex {
    /// Build an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete a member, returning whether it existed.
    pub fn remove(&self, id: &MemberId) -> Result<bool, ScoreIndexError> {
        Ok(self.write()?.remove(id))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ScoreSet>, ScoreIndexError> {
        self.set
            .read()
            .map_err(|_| ScoreIndexError::unavailable("in-memory index lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ScoreSet>, ScoreIndexError> {
        self.set
            .write()
            .map_err(|_| ScoreIndexError::unavailable("in-memory index lock poisoned"))
    }
}

#[async_trait]
impl ScoreIndex for InMemoryScoreIndex {
    async fn upsert(&self, id: &MemberId, score: i64) -> Result<(), ScoreIndexError> {
        self.write()?.insert(id, score);
        Ok(())
    }

    async fn upsert_many(&self, members: &[ScoredMember]) -> Result<(), ScoreIndexError> {
        let mut set = self.write()?;
        for member in members {
            set.insert(&member.id, member.score);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, ScoreIndexError> {
        Ok(to_u64(self.read()?.len()))
    }

    async fn count_above(&self, score: i64) -> Result<u64, ScoreIndexError> {
        Ok(to_u64(self.read()?.count_above(score)))
    }

    async fn range_desc(
        &self,
        start: u64,
        stop: u64,
    ) -> Result<Vec<ScoredMember>, ScoreIndexError> {
        Ok(self.read()?.range_desc(to_usize(start), to_usize(stop)))
    }

    async fn reverse_rank(&self, id: &MemberId) -> Result<Option<u64>, ScoreIndexError> {
        Ok(self.read()?.reverse_rank(id).map(to_u64))
    }

    async fn score_of(&self, id: &MemberId) -> Result<Option<i64>, ScoreIndexError> {
        Ok(self.read()?.score(id))
    }

    async fn ranks_and_scores(
        &self,
        ids: &[MemberId],
    ) -> Result<Vec<Option<IndexStanding>>, ScoreIndexError> {
        let set = self.read()?;
        Ok(ids
            .iter()
            .map(|id| {
                let reverse_rank = set.reverse_rank(id)?;
                let score = set.score(id)?;
                Some(IndexStanding::new(to_u64(reverse_rank), score))
            })
            .collect())
    }

    async fn scan_matching(
        &self,
        cursor: u64,
        query: &SearchQuery,
        batch_hint: usize,
    ) -> Result<ScanPage, ScoreIndexError> {
        let set = self.read()?;
        let start = to_usize(cursor);
        let batch = batch_hint.max(1);
        let items = set
            .iter_desc()
            .skip(start)
            .take(batch)
            .filter(|(member, _)| query.matches(member.as_ref()))
            .map(|(member, score)| ScoredMember::new(member.clone(), score))
            .collect();
        let next = start.saturating_add(batch);
        let cursor = if next >= set.len() { 0 } else { to_u64(next) };
        Ok(ScanPage { cursor, items })
    }

    async fn all_members(&self) -> Result<Vec<MemberId>, ScoreIndexError> {
        Ok(self
            .read()?
            .iter_desc()
            .map(|(member, _)| member.clone())
            .collect())
    }

    async fn ping(&self) -> Result<(), ScoreIndexError> {
        self.read().map(|_| ())
    }

    async fn clear(&self) -> Result<(), ScoreIndexError> {
        self.write()?.clear();
        Ok(())
    }
}
