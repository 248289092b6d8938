//! Sorted set with Redis ordering semantics.
//!
//! Members live in per-score buckets kept in a `BTreeMap`, with a side table
//! from member to score for point lookups. Ascending order is score, then
//! member bytes; descending order reverses both, which is what `ZREVRANGE`
//! and `ZREVRANK` report.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound::{Excluded, Unbounded};

use crate::domain::{MemberId, ScoredMember};

#[derive(Debug, Default)]
pub(crate) struct ScoreSet {
    by_score: BTreeMap<i64, BTreeSet<MemberId>>,
    scores: HashMap<MemberId, i64>,
}

pub(crate) fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

pub(crate) fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

impl ScoreSet {
    /// Insert or move `member`. Returns `true` when the member is new.
    pub(crate) fn insert(&mut self, member: &MemberId, score: i64) -> bool {
        let previous = self.scores.insert(member.clone(), score);
        if let Some(old) = previous {
            if old == score {
                return false;
            }
            self.detach(member, old);
        }
        self.by_score.entry(score).or_default().insert(member.clone());
        previous.is_none()
    }

    /// Remove `member`. Returns `true` when it was present.
    pub(crate) fn remove(&mut self, member: &MemberId) -> bool {
        match self.scores.remove(member) {
            Some(score) => {
                self.detach(member, score);
                true
            }
            None => false,
        }
    }

    fn detach(&mut self, member: &MemberId, score: i64) {
        if let Some(bucket) = self.by_score.get_mut(&score) {
            bucket.remove(member);
            if bucket.is_empty() {
                self.by_score.remove(&score);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.by_score.clear();
        self.scores.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.scores.len()
    }

    pub(crate) fn score(&self, member: &MemberId) -> Option<i64> {
        self.scores.get(member).copied()
    }

    pub(crate) fn count_above(&self, score: i64) -> usize {
        self.by_score
            .range((Excluded(score), Unbounded))
            .map(|(_, bucket)| bucket.len())
            .sum()
    }

    /// 0-based position in descending order.
    pub(crate) fn reverse_rank(&self, member: &MemberId) -> Option<usize> {
        let score = self.score(member)?;
        let bucket = self.by_score.get(&score)?;
        let ahead_in_bucket = bucket.range((Excluded(member), Unbounded)).count();
        Some(self.count_above(score) + ahead_in_bucket)
    }

    pub(crate) fn iter_desc(&self) -> impl Iterator<Item = (&MemberId, i64)> + '_ {
        self.by_score
            .iter()
            .rev()
            .flat_map(|(score, bucket)| bucket.iter().rev().map(move |member| (member, *score)))
    }

    /// Inclusive `[start, stop]` window in descending order.
    pub(crate) fn range_desc(&self, start: usize, stop: usize) -> Vec<ScoredMember> {
        if start > stop {
            return Vec::new();
        }
        self.iter_desc()
            .skip(start)
            .take(stop.saturating_sub(start).saturating_add(1))
            .map(|(member, score)| ScoredMember::new(member.clone(), score))
            .collect()
    }
}
