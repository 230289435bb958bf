//! Remote catalog access
//!
//! [`Catalog`] is the seam between the controllers and the movie metadata
//! provider. [`TmdbClient`] is the HTTP implementation; tests substitute
//! in-memory fakes.

pub mod tmdb;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CastMember, DetailView, MovieDetail, PageResult, Review, Title};

pub use tmdb::TmdbClient;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    Schema(String),

    #[error("Page numbers start at 1")]
    InvalidPage,
}

impl CatalogError {
    /// Transport failures and non-success statuses
    pub fn is_network(&self) -> bool {
        matches!(self, CatalogError::Transport(_) | CatalogError::Status(_))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, CatalogError::Schema(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Status(404))
    }
}

/// Read-only access to the movie catalog
///
/// Implementations hold no mutable state and are shared behind an `Arc`
/// by every controller.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// One page of popular titles (`page >= 1`)
    async fn popular(&self, page: u32) -> Result<PageResult<Title>, CatalogError>;

    /// One page of titles matching `query` (`page >= 1`)
    ///
    /// Blank queries are not special-cased here; callers filter them.
    async fn search(&self, query: &str, page: u32) -> Result<PageResult<Title>, CatalogError>;

    async fn movie(&self, id: u64) -> Result<MovieDetail, CatalogError>;

    async fn credits(&self, id: u64) -> Result<Vec<CastMember>, CatalogError>;

    async fn reviews(&self, id: u64) -> Result<Vec<Review>, CatalogError>;

    /// Metadata, credits and reviews fetched concurrently and merged
    ///
    /// Fails as a whole if any of the three requests fails.
    async fn details(&self, id: u64) -> Result<DetailView, CatalogError> {
        crate::detail::aggregate(self, id).await
    }
}
