//! Normalised page requests and window arithmetic.

use thiserror::Error;

/// Page used when the caller omits one or supplies an invalid value.
pub const DEFAULT_PAGE: u64 = 1;

/// Limit used when the caller omits one or supplies an invalid value.
pub const DEFAULT_LIMIT: u64 = 50;

/// Validation errors raised by the strict [`PageRequest::new`] constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Pages are 1-based.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A window must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// A 1-based page number and a positive page size.
///
/// The offset always follows the requested `limit`. An optional item cap
/// bounds how many items a page holds without moving where it starts.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
/// - `max_items`, when set, is at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    limit: u64,
    max_items: Option<u64>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            max_items: None,
        }
    }
}

/// Inclusive, 0-based `[start, stop]` window over an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Offset of the first item in the page.
    pub start: u64,
    /// Offset of the last item the page may hold.
    pub stop: u64,
}

impl PageRequest {
    /// Build a request, rejecting zero values.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when `page` or `limit` is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PaginationError};
    ///
    /// assert_eq!(PageRequest::new(0, 10), Err(PaginationError::ZeroPage));
    /// assert_eq!(PageRequest::new(3, 10).expect("valid").offset(), 20);
    /// ```
    pub const fn new(page: u64, limit: u64) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self {
            page,
            limit,
            max_items: None,
        })
    }

    /// Build a request from raw query-string values.
    ///
    /// Absent, unparseable or non-positive values fall back to
    /// [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`].
    ///
    /// # Examples
    /// ```
    /// use pagination::{DEFAULT_LIMIT, PageRequest};
    ///
    /// let request = PageRequest::from_query(Some("2"), Some("-4"));
    /// assert_eq!(request.page(), 2);
    /// assert_eq!(request.limit(), DEFAULT_LIMIT);
    /// ```
    #[must_use]
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
            max_items: None,
        }
    }

    /// Hold at most `max_items` items per page (ignored when zero).
    ///
    /// The offset is still `(page - 1) * limit`, so a capped page starts
    /// where the uncapped one would and simply holds fewer items.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::new(2, 1500).expect("valid").with_max_items(1000);
    /// assert_eq!(request.offset(), 1500);
    /// assert_eq!(request.page_size(), 1000);
    /// ```
    #[must_use]
    pub fn with_max_items(self, max_items: u64) -> Self {
        Self {
            max_items: (max_items > 0).then_some(max_items),
            ..self
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The requested page size; drives the offset.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// The maximum number of items on the page: `limit`, bounded by the
    /// item cap when one is set.
    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.max_items.map_or(self.limit, |cap| self.limit.min(cap))
    }

    /// Offset of the first item: `(page - 1) * limit`, saturating.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Inclusive window to request from ordered storage.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        let start = self.offset();
        PageWindow {
            start,
            stop: start.saturating_add(self.page_size() - 1),
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let value = raw?.trim().parse::<i64>().ok()?;
    u64::try_from(value).ok().filter(|parsed| *parsed >= 1)
}
