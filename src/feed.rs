//! Paginated feed of popular titles
//!
//! Initial load, pull-to-refresh, infinite-scroll continuation and
//! error/retry over [`Catalog::popular`]. Requests are split into
//! `begin_*` / [`FeedController::fetch`] / [`FeedController::apply`] so the UI
//! can run the network round trip on a spawned task; the `async` wrappers
//! do all three in one call.

use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{Catalog, CatalogError};
use crate::models::{PageResult, Title};
use crate::paging::{ApplyOutcome, PageRequest, PagedList, Phase};

/// A completed popular-titles request
#[derive(Debug)]
pub struct FeedResponse {
    pub request: PageRequest,
    pub result: Result<PageResult<Title>, CatalogError>,
}

/// Coarse feed state for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Empty,
    Loading,
    Populated,
    Errored,
}

/// Popular-titles feed controller
pub struct FeedController<C: ?Sized> {
    catalog: Arc<C>,
    list: PagedList<Title>,
}

impl<C: Catalog + ?Sized + 'static> FeedController<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            list: PagedList::new(),
        }
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

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn phase(&self) -> &Phase {
        self.list.phase()
    }

    pub fn status(&self) -> FeedStatus {
        match self.list.phase() {
            Phase::Loading(_) => FeedStatus::Loading,
            Phase::Errored(_) => FeedStatus::Errored,
            Phase::Idle if self.list.items().is_empty() => FeedStatus::Empty,
            Phase::Idle => FeedStatus::Populated,
        }
    }

    /// Reload page 1, replacing the accumulated titles
    ///
    /// Used for the initial load and pull-to-refresh. Never gated: an
    /// in-flight request is superseded.
    pub fn begin_refresh(&mut self) -> PageRequest {
        let request = self.list.begin_fresh();
        debug!(generation = request.generation, "feed refresh");
        request
    }

    /// Same as a refresh
    pub fn begin_retry(&mut self) -> PageRequest {
        self.begin_refresh()
    }

    /// Request the next page when scrolled near the end
    ///
    /// No-op (`None`) while loading, after an error, or at the last page.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        let request = self.list.begin_next()?;
        debug!(page = request.page, "feed load more");
        Some(request)
    }

    /// Run the network round trip for `request`
    pub fn fetch(&self, request: PageRequest) -> impl Future<Output = FeedResponse> + Send + 'static {
        let catalog = Arc::clone(&self.catalog);
        async move {
            let result = catalog.popular(request.page).await;
            FeedResponse { request, result }
        }
    }

    /// Apply a completed request to the feed
    pub fn apply(&mut self, response: FeedResponse) -> ApplyOutcome {
        let outcome = self.list.apply(&response.request, response.result);
        match outcome {
            ApplyOutcome::Failed => {
                warn!(page = response.request.page, error = ?self.list.error(), "feed load failed");
            }
            ApplyOutcome::Stale => {
                debug!(page = response.request.page, "dropping stale feed response");
            }
            ApplyOutcome::Applied => {}
        }
        outcome
    }

    pub async fn refresh(&mut self) -> ApplyOutcome {
        let request = self.begin_refresh();
        let response = self.fetch(request).await;
        self.apply(response)
    }

    pub async fn retry(&mut self) -> ApplyOutcome {
        self.refresh().await
    }

    /// Load the next page; `None` when the gate refused the request
    pub async fn load_more(&mut self) -> Option<ApplyOutcome> {
        let request = self.begin_load_more()?;
        let response = self.fetch(request).await;
        Some(self.apply(response))
    }
}

impl<C: ?Sized> std::fmt::Debug for FeedController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedController")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}
