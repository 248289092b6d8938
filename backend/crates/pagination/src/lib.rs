//! Page/limit pagination primitives shared by leaderboard endpoints.
//!
//! The crate owns two concerns:
//!
//! - [`PageRequest`]: a normalised, 1-based `page` plus `limit` pair. Lenient
//!   constructors substitute defaults for absent or invalid input so inbound
//!   adapters never reject a listing request because of paging noise.
//! - [`Paginated`]: the response envelope pairing a page of items with the
//!   size of the full result set.
//!
//! Listing paths that can push the window down to storage use
//! [`PageRequest::window`]; paths that already hold the full, ordered result
//! set use [`paginate`].
//!
//! # Example
//!
//! ```
//! use pagination::{PageRequest, paginate};
//!
//! let request = PageRequest::new(2, 2).expect("valid request");
//! let page = paginate(vec!["a", "b", "c"], request);
//!
//! assert_eq!(page.items(), &["c"]);
//! assert_eq!(page.total(), 3);
//! ```

mod envelope;
mod request;

pub use envelope::{Paginated, paginate};
pub use request::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest, PageWindow, PaginationError};
