//! Competition ranking over index rows.
//!
//! Two paths produce [`RankedMember`] values:
//!
//! - contiguous windows read with `range_desc` are ranked locally with
//!   [`resolve_ranks`], where tied scores share the better rank and the next
//!   distinct score skips ahead by the tie group size;
//! - individually looked-up search matches already carry their global
//!   position from the index and are only ordered with [`order_by_rank`].

use super::ports::IndexStanding;
use super::{MemberId, RankedMember, ScoredMember};

/// Rank a contiguous, descending window whose first row sits at 0-based
/// position `rank_offset` in the full ordering.
///
/// # Examples
/// ```
/// use backend::domain::{MemberId, ScoredMember, resolve_ranks};
///
/// let rows = ["c:200", "a:100", "b:100"].map(|row| {
///     let (id, score) = row.split_once(':').expect("fixture row");
///     ScoredMember::new(MemberId::new(id).expect("id"), score.parse().expect("score"))
/// });
/// let ranks: Vec<u64> = resolve_ranks(rows.into(), 0).iter().map(|m| m.rank).collect();
/// assert_eq!(ranks, [1, 2, 2]);
/// ```
pub fn resolve_ranks(rows: Vec<ScoredMember>, rank_offset: u64) -> Vec<RankedMember> {
    let mut previous_score = None;
    let mut current_rank = rank_offset;
    let mut position = rank_offset;
    rows.into_iter()
        .map(|ScoredMember { id, score }| {
            position = position.saturating_add(1);
            if previous_score != Some(score) {
                current_rank = position;
                previous_score = Some(score);
            }
            RankedMember {
                id,
                score,
                rank: current_rank,
            }
        })
        .collect()
}

/// Re-anchor the tie group that opens a window.
///
/// A window starting mid-way through a tie group ranks its leading rows by
/// position. `true_rank` (one more than the number of members with a strictly
/// higher score) is the rank full materialisation would assign them.
pub fn anchor_leading_ties(ranked: &mut [RankedMember], true_rank: u64) {
    let Some(leading_score) = ranked.first().map(|member| member.score) else {
        return;
    };
    ranked
        .iter_mut()
        .take_while(|member| member.score == leading_score)
        .for_each(|member| member.rank = true_rank);
}

/// Turn per-member index lookups into ranked results ordered by rank.
///
/// `standings` must line up with `ids`. Members whose lookup came back empty
/// vanished mid-query and are dropped. Returns the ranked members and the
/// number dropped.
pub fn order_by_rank(
    ids: Vec<MemberId>,
    standings: Vec<Option<IndexStanding>>,
) -> (Vec<RankedMember>, usize) {
    let mut dropped = 0;
    let mut ranked: Vec<RankedMember> = ids
        .into_iter()
        .zip(standings)
        .filter_map(|(id, standing)| match standing {
            Some(IndexStanding {
                reverse_rank,
                score,
            }) => Some(RankedMember {
                id,
                score,
                rank: reverse_rank.saturating_add(1),
            }),
            None => {
                dropped += 1;
                None
            }
        })
        .collect();
    ranked.sort_by(|left, right| {
        left.rank
            .cmp(&right.rank)
            .then_with(|| left.id.cmp(&right.id))
    });
    (ranked, dropped)
}
