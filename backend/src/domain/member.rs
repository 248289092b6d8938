//! Leaderboard member data model.
//!
//! A member is a unique identifier paired with an integer rating. The score
//! index owns the authoritative copy; the types here validate values at the
//! boundary and carry derived rank information back out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`MemberId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberIdValidationError {
    Empty,
}

impl fmt::Display for MemberIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for MemberIdValidationError {}

/// Unique, immutable member identifier (the leaderboard username).
///
/// Surrounding whitespace is trimmed on construction.
///
/// # Examples
/// ```
/// use backend::domain::MemberId;
///
/// let id = MemberId::new("  rahul_kumar_7 ").expect("valid id");
/// assert_eq!(id.as_ref(), "rahul_kumar_7");
/// assert!(MemberId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberId(String);

impl MemberId {
    /// Validate and construct a [`MemberId`].
    pub fn new(id: impl Into<String>) -> Result<Self, MemberIdValidationError> {
        Self::from_owned(id.into())
    }

    fn from_owned(id: String) -> Result<Self, MemberIdValidationError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(MemberIdValidationError::Empty);
        }
        if trimmed.len() == id.len() {
            return Ok(Self(id));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MemberId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MemberId> for String {
    fn from(value: MemberId) -> Self {
        value.0
    }
}

impl TryFrom<String> for MemberId {
    type Error = MemberIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validation errors returned by the [`Rating`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingValidationError {
    NotAnInteger { raw: String },
    OutOfRange { value: i64 },
}

impl fmt::Display for RatingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInteger { raw } => write!(f, "rating must be an integer, got '{raw}'"),
            Self::OutOfRange { value } => write!(
                f,
                "rating must be between {} and {}, got {value}",
                Rating::MIN,
                Rating::MAX
            ),
        }
    }
}

impl std::error::Error for RatingValidationError {}

/// A member rating within `[Rating::MIN, Rating::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(i64);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: i64 = 100;
    /// Highest allowed rating.
    pub const MAX: i64 = 5000;

    /// Validate and construct a rating.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Rating;
    ///
    /// assert_eq!(Rating::new(4200).map(Rating::value), Ok(4200));
    /// assert!(Rating::new(5001).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, RatingValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingValidationError::OutOfRange { value })
        }
    }

    /// Parse a rating from raw text, e.g. a query-string value.
    pub fn parse(raw: &str) -> Result<Self, RatingValidationError> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| RatingValidationError::NotAnInteger {
                raw: raw.to_owned(),
            })?;
        Self::new(value)
    }

    /// Saturate an arbitrary score into the allowed range.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Rating;
    ///
    /// assert_eq!(Rating::clamped(7_000).value(), Rating::MAX);
    /// assert_eq!(Rating::clamped(-3).value(), Rating::MIN);
    /// ```
    #[must_use]
    pub fn clamped(score: i64) -> Self {
        Self(score.clamp(Self::MIN, Self::MAX))
    }

    /// The raw integer value.
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw index row: a member and its current score.
///
/// Scores are whatever the index holds; they are not re-validated against the
/// rating range because foreign writers may have stored anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoredMember {
    pub id: MemberId,
    pub score: i64,
}

impl ScoredMember {
    /// Pair a member with a score.
    pub fn new(id: MemberId, score: i64) -> Self {
        Self { id, score }
    }
}

/// A member with its 1-based competition rank, computed per query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankedMember {
    pub id: MemberId,
    pub score: i64,
    pub rank: u64,
}
