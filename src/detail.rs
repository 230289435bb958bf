//! Detail aggregation
//!
//! Metadata, credits and reviews for one title are requested concurrently
//! and merged only after all three settle. [`aggregate`] is all-or-nothing;
//! [`aggregate_partial`] keeps each part's outcome so a caller can render
//! what arrived.

use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{Catalog, CatalogError};
use crate::models::{CastMember, DetailView, MovieDetail, Review};

/// Fetch and merge all three parts; any failure fails the whole view
///
/// All three requests run to completion even when one fails early. The
/// first error in metadata, credits, reviews order is returned.
pub async fn aggregate<C: Catalog + ?Sized>(catalog: &C, id: u64) -> Result<DetailView, CatalogError> {
    aggregate_partial(catalog, id).await.complete()
}

/// Fetch all three parts and keep their individual outcomes
pub async fn aggregate_partial<C: Catalog + ?Sized>(catalog: &C, id: u64) -> PartialDetail {
    debug!(id, "fetching details");
    let (movie, cast, reviews) = tokio::join!(catalog.movie(id), catalog.credits(id), catalog.reviews(id));
    PartialDetail { movie, cast, reviews }
}

/// Independently fallible parts of a detail view
#[derive(Debug)]
pub struct PartialDetail {
    pub movie: Result<MovieDetail, CatalogError>,
    pub cast: Result<Vec<CastMember>, CatalogError>,
    pub reviews: Result<Vec<Review>, CatalogError>,
}

impl PartialDetail {
    /// Merge into a full view, or return the first failure
    pub fn complete(self) -> Result<DetailView, CatalogError> {
        Ok(DetailView {
            movie: self.movie?,
            cast: self.cast?,
            reviews: self.reviews?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.movie.is_ok() && self.cast.is_ok() && self.reviews.is_ok()
    }
}

/// Per-visit detail state
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    Pending,
    Loading,
    Ready(Box<DetailView>),
    Failed(String),
}

/// Generic message shown when the detail view cannot be built
pub const DETAIL_FAILED_MESSAGE: &str = "Error loading movie details";

/// Loads the detail view for one title, once
///
/// A new loader is created per visit; there is no retry and the title id
/// never changes.
pub struct DetailLoader<C: ?Sized> {
    catalog: Arc<C>,
    title_id: u64,
    phase: DetailPhase,
}

impl<C: Catalog + ?Sized + 'static> DetailLoader<C> {
    pub fn new(catalog: Arc<C>, title_id: u64) -> Self {
        Self {
            catalog,
            title_id,
            phase: DetailPhase::Pending,
        }
    }

    pub fn title_id(&self) -> u64 {
        self.title_id
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    pub fn view(&self) -> Option<&DetailView> {
        match &self.phase {
            DetailPhase::Ready(view) => Some(&**view),
            _ => None,
        }
    }

    /// Start the fetch; `None` if it was already started
    pub fn begin(&mut self) -> Option<impl Future<Output = Result<DetailView, CatalogError>> + Send + 'static> {
        if self.phase != DetailPhase::Pending {
            return None;
        }
        self.phase = DetailPhase::Loading;
        let catalog = Arc::clone(&self.catalog);
        let id = self.title_id;
        Some(async move { catalog.details(id).await })
    }

    /// Record the outcome of the fetch started by [`DetailLoader::begin`]
    pub fn finish(&mut self, result: Result<DetailView, CatalogError>) {
        if self.phase != DetailPhase::Loading {
            return;
        }
        self.phase = match result {
            Ok(view) => DetailPhase::Ready(Box::new(view)),
            Err(e) => {
                warn!(id = self.title_id, error = %e, "detail load failed");
                DetailPhase::Failed(DETAIL_FAILED_MESSAGE.to_string())
            }
        };
    }

    /// Begin and finish in one call
    pub async fn load(&mut self) -> &DetailPhase {
        if let Some(fetch) = self.begin() {
            let result = fetch.await;
            self.finish(result);
        }
        &self.phase
    }
}

impl<C: ?Sized> std::fmt::Debug for DetailLoader<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailLoader")
            .field("title_id", &self.title_id)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
