//! Substring search over member identifiers.
//!
//! Candidates come from one of two sources:
//!
//! - a [`MemberMirror`], the process-local snapshot of identifiers taken once
//!   at startup, scanned in memory up to `mirror_cap` matches;
//! - a cursor scan of the live index, looped to completion and capped at
//!   `scan_cap` matches.
//!
//! Either way the candidates are ranked with one batched index lookup, so the
//! reported scores and ranks always come from the index and never from the
//! mirror.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, warn};

use super::ports::{ScoreIndex, ScoreIndexError};
use super::{MemberId, RankedMember, order_by_rank};

/// Members examined per scan step.
pub const SCAN_BATCH_HINT: usize = 1000;

/// Default number of candidates ranked by mirror search.
pub const DEFAULT_MIRROR_CAP: usize = 50;

/// Default number of candidates ranked by scan search.
pub const DEFAULT_SCAN_CAP: usize = 10_000;

/// A non-empty, case-insensitive substring query.
///
/// # Examples
/// ```
/// use backend::domain::SearchQuery;
///
/// let query = SearchQuery::new("Pro_").expect("non-empty");
/// assert_eq!(query.as_str(), "Pro_");
/// assert!(query.matches("pro_player_7"));
/// assert!(SearchQuery::new("").is_none());
/// assert!(!SearchQuery::new(" pro").expect("non-empty").matches("pro_player_7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    /// Wrap `raw` as given; `None` only for the empty string. Whitespace is
    /// part of the query.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_owned(),
            folded: raw.to_lowercase(),
        })
    }

    /// The query as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `candidate` contains the query, ignoring case.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.to_lowercase().contains(&self.folded)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Read-only snapshot of every member identifier.
///
/// Taken once and never refreshed. Identifiers are immutable, so the only
/// staleness is members created after the snapshot, which mirror search will
/// not find.
#[derive(Debug, Clone, Default)]
pub struct MemberMirror {
    // Lowercased copies sit beside the originals so matching does not
    // allocate per candidate.
    entries: Vec<(MemberId, String)>,
}

impl MemberMirror {
    /// Snapshot `members`.
    pub fn new(members: Vec<MemberId>) -> Self {
        let entries = members
            .into_iter()
            .map(|id| {
                let folded = id.as_ref().to_lowercase();
                (id, folded)
            })
            .collect();
        Self { entries }
    }

    /// Number of identifiers in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first `cap` identifiers, in snapshot order, containing `query`.
    pub fn matching(&self, query: &SearchQuery, cap: usize) -> Vec<MemberId> {
        self.entries
            .iter()
            .filter(|(_, folded)| folded.contains(&query.folded))
            .take(cap)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Where search candidates come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Scan the startup snapshot held in memory.
    #[default]
    Mirror,
    /// Scan the live index.
    Scan,
}

/// Rejected [`SearchMode`] spelling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search strategy `{0}`; expected `mirror` or `scan`")]
pub struct ParseSearchModeError(String);

impl FromStr for SearchMode {
    type Err = ParseSearchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mirror" => Ok(Self::Mirror),
            "scan" => Ok(Self::Scan),
            _ => Err(ParseSearchModeError(s.to_owned())),
        }
    }
}

/// Finds and ranks members whose identifier contains a query.
#[derive(Clone)]
pub struct SearchEngine {
    index: Arc<dyn ScoreIndex>,
    mirror: Option<Arc<MemberMirror>>,
    mirror_cap: usize,
    scan_cap: usize,
}

impl SearchEngine {
    /// Search by scanning the live index.
    pub fn scanning(index: Arc<dyn ScoreIndex>) -> Self {
        Self {
            index,
            mirror: None,
            mirror_cap: DEFAULT_MIRROR_CAP,
            scan_cap: DEFAULT_SCAN_CAP,
        }
    }

    /// Search the candidates in `mirror`.
    pub fn mirrored(index: Arc<dyn ScoreIndex>, mirror: Arc<MemberMirror>) -> Self {
        Self {
            mirror: Some(mirror),
            ..Self::scanning(index)
        }
    }

    /// Build an engine for `mode`, hydrating the mirror from the index when
    /// asked to. A failed hydration falls back to scanning.
    pub async fn hydrate(index: Arc<dyn ScoreIndex>, mode: SearchMode) -> Self {
        if mode == SearchMode::Scan {
            return Self::scanning(index);
        }
        match index.all_members().await {
            Ok(members) => {
                let mirror = Arc::new(MemberMirror::new(members));
                info!(members = mirror.len(), "search mirror hydrated");
                Self::mirrored(index, mirror)
            }
            Err(error) => {
                warn!(%error, "mirror hydration failed; falling back to index scan");
                Self::scanning(index)
            }
        }
    }

    /// Override the candidate caps. A zero cap is raised to one.
    #[must_use]
    pub fn with_caps(mut self, mirror_cap: usize, scan_cap: usize) -> Self {
        self.mirror_cap = mirror_cap.max(1);
        self.scan_cap = scan_cap.max(1);
        self
    }

    /// Strategy in effect.
    pub fn mode(&self) -> SearchMode {
        if self.mirror.is_some() {
            SearchMode::Mirror
        } else {
            SearchMode::Scan
        }
    }

    /// Upper bound on the number of results a single search can return.
    pub fn cap(&self) -> usize {
        match self.mode() {
            SearchMode::Mirror => self.mirror_cap,
            SearchMode::Scan => self.scan_cap,
        }
    }

    /// Matching members ordered by rank, then identifier.
    ///
    /// Members that vanish between candidate selection and the rank lookup
    /// are dropped.
    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RankedMember>, ScoreIndexError> {
        let candidates = match &self.mirror {
            Some(mirror) => mirror.matching(query, self.mirror_cap),
            None => self.scan_candidates(query).await?,
        };
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let standings = self.index.ranks_and_scores(&candidates).await?;
        let (ranked, dropped) = order_by_rank(candidates, standings);
        if dropped > 0 {
            warn!(query = %query, dropped, "search candidates vanished before ranking");
        }
        Ok(ranked)
    }

    async fn scan_candidates(&self, query: &SearchQuery) -> Result<Vec<MemberId>, ScoreIndexError> {
        let mut seen = HashSet::new();
        let mut matches = Vec::new();
        let mut cursor = 0;
        loop {
            let page = match self
                .index
                .scan_matching(cursor, query, SCAN_BATCH_HINT)
                .await
            {
                Ok(page) => page,
                Err(error) if matches.is_empty() => return Err(error),
                Err(error) => {
                    warn!(
                        query = %query,
                        matched = matches.len(),
                        %error,
                        "index scan failed part-way; returning partial matches"
                    );
                    break;
                }
            };

            for row in page.items {
                if matches.len() >= self.scan_cap {
                    break;
                }
                // Scans may revisit members and MATCH filtering is advisory.
                if query.matches(row.id.as_ref()) && seen.insert(row.id.clone()) {
                    matches.push(row.id);
                }
            }
            if page.cursor == 0 || matches.len() >= self.scan_cap {
                break;
            }
            cursor = page.cursor;
        }
        Ok(matches)
    }
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("mode", &self.mode())
            .field("mirror_len", &self.mirror.as_ref().map(|m| m.len()))
            .field("mirror_cap", &self.mirror_cap)
            .field("scan_cap", &self.scan_cap)
            .finish_non_exhaustive()
    }
}
