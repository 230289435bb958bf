//! Cinescope - movie discovery in the terminal
//!
//! Browse popular titles, search the catalog as you type, and open a detail
//! view with cast and reviews. Backed by the TMDB API.
//!
//! # Modules
//!
//! - `models` - Titles, pages, detail views, image URLs
//! - `api` - The `Catalog` trait and its TMDB client
//! - `paging` - Generation-tagged page accumulation shared by feed and search
//! - `feed` - Popular-titles feed controller
//! - `search` - Incremental search controller
//! - `debounce` - Latest-wins timer used by the search box
//! - `detail` - Concurrent detail aggregation and per-visit loader
//! - `config` - Environment credentials and the settings file
//! - `logging` - Tracing subscriber setup
//! - `app` - TUI state and navigation
//! - `ui` - TUI rendering
//! - `cli` / `commands` - Scriptable subcommands

pub mod models;
pub mod api;
pub mod paging;
pub mod feed;
pub mod search;
pub mod debounce;
pub mod detail;
pub mod config;
pub mod logging;
pub mod app;
pub mod ui;
pub mod cli;
pub mod commands;

// Re-export commonly used types
pub use models::{CastMember, DetailView, ImageSize, MovieDetail, PageResult, Review, Title};

pub use api::{Catalog, CatalogError, TmdbClient};
pub use app::{App, AppState};
pub use config::Config;
pub use feed::FeedController;
pub use search::SearchController;
