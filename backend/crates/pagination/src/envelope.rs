//! Pagination envelope and in-memory slicing.

use serde::Serialize;

use crate::PageRequest;

/// One page of an ordered result set.
///
/// ## Invariants
/// - `total` counts the full result set before slicing, not the page.
/// - `items.len()` never exceeds the page size of the request that built it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated<T> {
    items: Vec<T>,
    total: u64,
}

impl<T> Paginated<T> {
    /// Wrap an already-sliced page and the size of its full result set.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// An empty page over a result set of `total` items.
    #[must_use]
    pub const fn empty(total: u64) -> Self {
        Self::new(Vec::new(), total)
    }

    /// Items on this page, in result-set order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Size of the full result set.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Split into items and total.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, u64) {
        (self.items, self.total)
    }

    /// Transform every item while preserving the total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Slice a fully materialised, ordered result set.
///
/// Returns an empty page when the request's offset lies at or beyond the end
/// of `results`; `total` is always `results.len()`.
///
/// # Examples
/// ```
/// use pagination::{PageRequest, paginate};
///
/// let request = PageRequest::new(5, 10).expect("valid request");
/// let page = paginate(vec![1, 2, 3], request);
/// assert!(page.items().is_empty());
/// assert_eq!(page.total(), 3);
/// ```
#[must_use]
pub fn paginate<T>(mut results: Vec<T>, request: PageRequest) -> Paginated<T> {
    let total = u64::try_from(results.len()).unwrap_or(u64::MAX);
    let start = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    if start >= results.len() {
        return Paginated::empty(total);
    }
    let size = usize::try_from(request.page_size()).unwrap_or(usize::MAX);
    let end = start.saturating_add(size).min(results.len());
    results.truncate(end);
    let items = results.split_off(start);
    Paginated::new(items, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(page: u64, limit: u64) -> PageRequest {
        PageRequest::new(page, limit).expect("valid request")
    }

    #[rstest]
    #[case(1, 2, vec!['a', 'b'])]
    #[case(2, 2, vec!['c', 'd'])]
    #[case(3, 2, vec!['e'])]
    #[case(4, 2, vec![])]
    #[case(1, 100, vec!['a', 'b', 'c', 'd', 'e'])]
    fn slices_the_requested_window(#[case] page: u64, #[case] limit: u64, #[case] expected: Vec<char>) {
        let results = vec!['a', 'b', 'c', 'd', 'e'];
        let paged = paginate(results, request(page, limit));
        assert_eq!(paged.items(), expected.as_slice());
        assert_eq!(paged.total(), 5);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(7)]
    fn concatenated_pages_reconstruct_the_input(#[case] limit: u64) {
        let results: Vec<u32> = (0..17).collect();
        let mut rebuilt = Vec::new();
        for page in 1.. {
            let paged = paginate(results.clone(), request(page, limit));
            assert_eq!(paged.total(), 17);
            if paged.items().is_empty() {
                break;
            }
            assert!(paged.items().len() <= usize::try_from(limit).expect("small limit"));
            rebuilt.extend_from_slice(paged.items());
        }
        assert_eq!(rebuilt, results);
    }

    #[rstest]
    fn capped_pages_start_at_the_requested_offset() {
        let results: Vec<u32> = (0..10).collect();
        let paged = paginate(results, request(2, 4).with_max_items(2));
        assert_eq!(paged.items(), &[4, 5]);
        assert_eq!(paged.total(), 10);
    }

    #[rstest]
    fn empty_results_give_an_empty_first_page() {
        let paged = paginate(Vec::<u8>::new(), request(1, 10));
        assert_eq!(paged, Paginated::empty(0));
    }

    #[rstest]
    fn map_preserves_total() {
        let paged = Paginated::new(vec![1, 2], 9).map(|n| n * 10);
        assert_eq!(paged.into_parts(), (vec![10, 20], 9));
    }

    #[rstest]
    fn serialises_items_and_total() {
        let json = serde_json::to_value(Paginated::new(vec!["x"], 4)).expect("serialises");
        assert_eq!(json, serde_json::json!({ "items": ["x"], "total": 4 }));
    }
}
