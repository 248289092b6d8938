//! Leaderboard domain: entities, ranking, search, services and ports.
//!
//! Purpose: hold everything that decides what the leaderboard returns, free
//! of transport and storage concerns. Adapters depend on this module; it
//! depends on nothing but the ports it declares.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - MemberId / Rating / ScoredMember / RankedMember: the member model.
//! - resolve_ranks / anchor_leading_ties / order_by_rank: competition ranking.
//! - SearchQuery / MemberMirror / SearchEngine: substring search.
//! - LeaderboardService: implements the driving ports over a score index.
//! - LiveUpdateWorker: the background rating perturbation process.

pub mod error;
pub mod leaderboard_service;
pub mod live_updates;
pub mod member;
pub mod ports;
pub mod ranking;
pub mod search;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::leaderboard_service::LeaderboardService;
pub use self::live_updates::{
    DeltaPolicy, LiveUpdateHandle, LiveUpdateSettings, LiveUpdateSettingsError,
    LiveUpdateWorker, RatingPerturber, TickReport,
};
pub use self::member::{
    MemberId, MemberIdValidationError, RankedMember, Rating, RatingValidationError, ScoredMember,
};
pub use self::ranking::{anchor_leading_ties, order_by_rank, resolve_ranks};
pub use self::search::{
    DEFAULT_MIRROR_CAP, DEFAULT_SCAN_CAP, MemberMirror, ParseSearchModeError, SearchEngine,
    SearchMode, SearchQuery,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// One page of ranked members plus the size of the full result set.
pub type LeaderboardPage = pagination::Paginated<RankedMember>;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u64> {
///     Err(Error::not_found("no such member"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
