//! Incremental title search
//!
//! Keystrokes update the query immediately. Queries shorter than the
//! minimum length clear the results without touching the network; longer
//! ones are handed out as a [`DebounceTicket`] and only the newest ticket
//! turns into a request once the quiet period elapses (see
//! [`crate::debounce::Debouncer`]). Failed searches leave the results as they
//! were and are only logged.

use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{Catalog, CatalogError};
use crate::models::{PageResult, Title};
use crate::paging::{ApplyOutcome, PageRequest, PagedList};

/// Shortest query that triggers a search
pub const MIN_QUERY_LEN: usize = 3;

/// Identifies one scheduled debounce; only the latest is honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

/// What the caller should do after a text change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChange {
    /// Results were cleared synchronously; cancel any pending debounce
    Cleared,
    /// Schedule this ticket after the debounce window
    Scheduled(DebounceTicket),
}

/// A search request: the query it was issued for plus paging info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: PageRequest,
}

/// A completed search request
#[derive(Debug)]
pub struct SearchResponse {
    pub request: SearchRequest,
    pub result: Result<PageResult<Title>, CatalogError>,
}

/// Search controller
pub struct SearchController<C: ?Sized> {
    catalog: Arc<C>,
    query: String,
    list: PagedList<Title>,
    min_len: usize,
    next_ticket: u64,
    pending: Option<DebounceTicket>,
    /// Query the current results belong to
    active_query: String,
    last_error: Option<String>,
}

impl<C: Catalog + ?Sized + 'static> SearchController<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_min_len(catalog, MIN_QUERY_LEN)
    }

    pub fn with_min_len(catalog: Arc<C>, min_len: usize) -> Self {
        Self {
            catalog,
            query: String::new(),
            list: PagedList::new(),
            min_len: min_len.max(1),
            next_ticket: 0,
            pending: None,
            active_query: String::new(),
            last_error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[Title] {
        self.list.items()
    }

    pub fn page(&self) -> u32 {
        self.list.page()
    }

    pub fn has_more(&self) -> bool {
        self.list.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    /// Most recent failure, kept for display only
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_pending_debounce(&self) -> bool {
        self.pending.is_some()
    }

    /// Record new input text
    pub fn on_text_change(&mut self, text: impl Into<String>) -> TextChange {
        self.query = text.into();

        if !self.is_searchable() {
            self.pending = None;
            self.list.reset();
            self.active_query.clear();
            return TextChange::Cleared;
        }

        self.next_ticket += 1;
        let ticket = DebounceTicket(self.next_ticket);
        self.pending = Some(ticket);
        TextChange::Scheduled(ticket)
    }

    /// The debounce window for `ticket` elapsed
    ///
    /// Returns a page-1 request only if `ticket` is still the newest one.
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Option<SearchRequest> {
        if self.pending != Some(ticket) {
            debug!(?ticket, "ignoring superseded debounce");
            return None;
        }
        self.pending = None;
        Some(self.begin_fresh())
    }

    /// Search immediately, bypassing the debounce
    pub fn submit(&mut self) -> Option<SearchRequest> {
        if !self.is_searchable() {
            return None;
        }
        self.pending = None;
        Some(self.begin_fresh())
    }

    /// Request the next page of the current results
    pub fn begin_load_more(&mut self) -> Option<SearchRequest> {
        if self.active_query.is_empty() {
            return None;
        }
        let page = self.list.begin_next()?;
        debug!(page = page.page, "search load more");
        Some(SearchRequest {
            query: self.active_query.clone(),
            page,
        })
    }

    /// Reset the query and results and drop any pending debounce
    pub fn clear(&mut self) {
        self.query.clear();
        self.active_query.clear();
        self.pending = None;
        self.last_error = None;
        self.list.reset();
    }

    fn is_searchable(&self) -> bool {
        self.query.trim().chars().count() >= self.min_len
    }

    fn begin_fresh(&mut self) -> SearchRequest {
        let query = self.query.trim().to_string();
        let page = self.list.begin_fresh();
        debug!(%query, generation = page.generation, "search");
        self.active_query = query.clone();
        SearchRequest { query, page }
    }

    /// Run the network round trip for `request`
    pub fn fetch(&self, request: SearchRequest) -> impl Future<Output = SearchResponse> + Send + 'static {
        let catalog = Arc::clone(&self.catalog);
        async move {
            let result = catalog.search(&request.query, request.page.page).await;
            SearchResponse { request, result }
        }
    }

    /// Apply a completed request
    pub fn apply(&mut self, response: SearchResponse) -> ApplyOutcome {
        let SearchResponse { request, result } = response;
        let outcome = self.list.apply(&request.page, result);
        match outcome {
            ApplyOutcome::Applied => self.last_error = None,
            ApplyOutcome::Failed => {
                let message = self.list.error().unwrap_or("search failed").to_string();
                warn!(query = %request.query, page = request.page.page, error = %message, "search failed");
                self.last_error = Some(message);
                self.list.dismiss_error();
            }
            ApplyOutcome::Stale => {
                debug!(query = %request.query, "dropping stale search response");
            }
        }
        outcome
    }

    /// Submit and wait for the result; `None` for a blank query
    pub async fn submit_now(&mut self) -> Option<ApplyOutcome> {
        let request = self.submit()?;
        let response = self.fetch(request).await;
        Some(self.apply(response))
    }

    pub async fn load_more(&mut self) -> Option<ApplyOutcome> {
        let request = self.begin_load_more()?;
        let response = self.fetch(request).await;
        Some(self.apply(response))
    }
}

impl<C: ?Sized> std::fmt::Debug for SearchController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("query", &self.query)
            .field("list", &self.list)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
