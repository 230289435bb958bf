//! Paginated list state shared by the feed and search controllers
//!
//! A [`PagedList`] accumulates items across pages and tracks one request at
//! a time. Each request carries the generation it was issued under; fresh
//! loads bump the generation, so a response that arrives after it has been
//! superseded is reported as [`ApplyOutcome::Stale`] and dropped.

use crate::api::CatalogError;
use crate::models::PageResult;

/// Whether a response replaces or extends the accumulated items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Fresh,
    Append,
}

/// A page request issued by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u32,
    pub mode: FetchMode,
}

/// Request lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading(PageRequest),
    Errored(String),
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

/// Result of feeding a response back into the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    /// Superseded by a newer request; state untouched
    Stale,
}

/// Accumulated pages plus the single-flight request gate
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    items: Vec<T>,
    page: u32,
    has_more: bool,
    phase: Phase,
    generation: u64,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: false,
            phase: Phase::Idle,
            generation: 0,
        }
    }
}

impl<T> PagedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Last successfully loaded page (1 before any load)
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Errored(msg) => Some(msg),
            _ => None,
        }
    }

    /// The request currently awaited, if any
    pub fn in_flight(&self) -> Option<&PageRequest> {
        match &self.phase {
            Phase::Loading(request) => Some(request),
            _ => None,
        }
    }

    /// Start a page-1 load that replaces the items
    ///
    /// Always succeeds. Any in-flight request is superseded and an error is
    /// cleared.
    pub fn begin_fresh(&mut self) -> PageRequest {
        self.generation += 1;
        let request = PageRequest {
            generation: self.generation,
            page: 1,
            mode: FetchMode::Fresh,
        };
        self.phase = Phase::Loading(request);
        request
    }

    /// Start loading the next page
    ///
    /// Returns `None` while a request is in flight, after an error, or when
    /// the last response reported no further pages.
    pub fn begin_next(&mut self) -> Option<PageRequest> {
        if self.phase != Phase::Idle || !self.has_more {
            return None;
        }
        let request = PageRequest {
            generation: self.generation,
            page: self.page + 1,
            mode: FetchMode::Append,
        };
        self.phase = Phase::Loading(request);
        Some(request)
    }

    /// Feed a completed request back in
    pub fn apply(
        &mut self,
        request: &PageRequest,
        result: Result<PageResult<T>, CatalogError>,
    ) -> ApplyOutcome {
        if self.in_flight() != Some(request) {
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.has_more = page.has_more();
                self.page = request.page;
                match request.mode {
                    FetchMode::Fresh => self.items = page.results,
                    FetchMode::Append => self.items.extend(page.results),
                }
                self.phase = Phase::Idle;
                ApplyOutcome::Applied
            }
            Err(e) => {
                self.phase = Phase::Errored(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    /// Leave the error state without issuing a request
    pub fn dismiss_error(&mut self) {
        if matches!(self.phase, Phase::Errored(_)) {
            self.phase = Phase::Idle;
        }
    }

    /// Drop all items and supersede anything in flight
    pub fn reset(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.page = 1;
        self.has_more = false;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32, results: Vec<u32>, total_pages: u32) -> Result<PageResult<u32>, CatalogError> {
        Ok(PageResult {
            page: n,
            total_results: results.len() as u32,
            results,
            total_pages,
        })
    }

    #[test]
    fn test_fresh_then_append() {
        let mut list = PagedList::new();

        let first = list.begin_fresh();
        assert_eq!(first.page, 1);
        assert_eq!(list.apply(&first, page(1, vec![1, 2], 3)), ApplyOutcome::Applied);
        assert_eq!(list.items(), &[1, 2]);
        assert!(list.has_more());

        let next = list.begin_next().unwrap();
        assert_eq!(next.page, 2);
        assert_eq!(next.mode, FetchMode::Append);
        assert_eq!(list.apply(&next, page(2, vec![3], 3)), ApplyOutcome::Applied);
        assert_eq!(list.items(), &[1, 2, 3]);
        assert_eq!(list.page(), 2);
    }

    #[test]
    fn test_next_is_gated_while_loading() {
        let mut list = PagedList::<u32>::new();
        let first = list.begin_fresh();
        assert!(list.begin_next().is_none());
        list.apply(&first, page(1, vec![1], 4));

        assert!(list.begin_next().is_some());
        assert!(list.begin_next().is_none());
    }

    #[test]
    fn test_next_requires_more_pages() {
        let mut list = PagedList::new();
        let first = list.begin_fresh();
        list.apply(&first, page(1, vec![1], 1));
        assert!(!list.has_more());
        assert!(list.begin_next().is_none());
    }

    #[test]
    fn test_fresh_supersedes_in_flight() {
        let mut list = PagedList::new();
        let first = list.begin_fresh();
        list.apply(&first, page(1, vec![1, 2], 5));

        let next = list.begin_next().unwrap();
        let refresh = list.begin_fresh();

        assert_eq!(list.apply(&refresh, page(1, vec![9], 5)), ApplyOutcome::Applied);
        assert_eq!(list.apply(&next, page(2, vec![3, 4], 5)), ApplyOutcome::Stale);
        assert_eq!(list.items(), &[9]);
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_failure_keeps_items_and_has_more() {
        let mut list = PagedList::new();
        let first = list.begin_fresh();
        list.apply(&first, page(1, vec![1, 2], 5));

        let next = list.begin_next().unwrap();
        let outcome = list.apply(&next, Err(CatalogError::Status(503)));

        assert_eq!(outcome, ApplyOutcome::Failed);
        assert_eq!(list.items(), &[1, 2]);
        assert!(list.has_more());
        assert_eq!(list.page(), 1);
        assert!(list.error().is_some());
        assert!(list.begin_next().is_none());
    }

    #[test]
    fn test_has_more_follows_latest_response() {
        let mut list = PagedList::new();
        let first = list.begin_fresh();
        list.apply(&first, page(1, vec![1, 2], 5));

        // Provider shrank the listing between pages
        let next = list.begin_next().unwrap();
        list.apply(&next, page(2, vec![], 2));
        assert!(!list.has_more());
        assert_eq!(list.items(), &[1, 2]);
    }

    #[test]
    fn test_reset_makes_in_flight_stale() {
        let mut list = PagedList::new();
        let first = list.begin_fresh();
        list.reset();

        assert_eq!(list.apply(&first, page(1, vec![1], 2)), ApplyOutcome::Stale);
        assert!(list.items().is_empty());
        assert_eq!(*list.phase(), Phase::Idle);
    }

    #[test]
    fn test_dismiss_error() {
        let mut list = PagedList::<u32>::new();
        let first = list.begin_fresh();
        list.apply(&first, Err(CatalogError::Schema("missing results".into())));
        list.dismiss_error();
        assert_eq!(*list.phase(), Phase::Idle);
    }
}
