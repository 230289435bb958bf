//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the same controllers the TUI uses.
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::api::{Catalog, CatalogError, TmdbClient};
use crate::cli::{ExitCode, ImageCmd, InfoCmd, Output, PopularCmd, SearchCmd};
use crate::config::{Config, Settings};
use crate::detail::{aggregate_partial, PartialDetail};
use crate::feed::{FeedController, FeedResponse};
use crate::models::{image_url, CastMember, DetailView, ImageSize, MovieDetail, Review, Title};
use crate::paging::{FetchMode, PageRequest};
use crate::search::{SearchController, TextChange};

/// Cast members listed in text output
const TEXT_CAST_LIMIT: usize = 5;

/// One page (or accumulated pages) of titles
#[derive(Debug, Serialize)]
pub struct TitlePage<'a> {
    /// Last page included
    pub page: u32,
    pub has_more: bool,
    pub results: &'a [Title],
}

impl TitlePage<'_> {
    fn text(&self) -> String {
        if self.results.is_empty() {
            return "No results".to_string();
        }
        let mut lines: Vec<String> = self
            .results
            .iter()
            .map(|t| format!("{:>8}  {}", t.id, t))
            .collect();
        if self.has_more {
            lines.push(format!("-- more after page {} --", self.page));
        }
        lines.join("\n")
    }
}

fn limited(items: &[Title], limit: Option<usize>) -> &[Title] {
    match limit {
        Some(n) => &items[..n.min(items.len())],
        None => items,
    }
}

fn connect(config_path: Option<&Path>, output: &Output) -> Result<(TmdbClient, Config), ExitCode> {
    match Config::from_env(config_path) {
        Ok(config) => Ok((TmdbClient::new(&config), config)),
        Err(e) => Err(output.error(e.to_string(), ExitCode::ConfigError)),
    }
}

fn catalog_error(output: &Output, context: &str, err: &CatalogError) -> ExitCode {
    output.error(format!("{}: {}", context, err), ExitCode::from(err))
}

// =============================================================================
// Popular Command
// =============================================================================

pub async fn popular_cmd(cmd: PopularCmd, config_path: Option<&Path>, output: &Output) -> ExitCode {
    let (client, _) = match connect(config_path, output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Some(page) = cmd.page {
        output.info(format!("Fetching popular movies (page {})...", page));
        return match client.popular(page).await {
            Ok(result) => {
                let page = TitlePage {
                    page: result.page,
                    has_more: result.has_more(),
                    results: limited(&result.results, cmd.limit),
                };
                print_or_fail(output, &page, || page.text())
            }
            Err(e) => catalog_error(output, "Failed to load popular movies", &e),
        };
    }

    if cmd.pages == 0 {
        return output.error("--pages must be at least 1", ExitCode::InvalidArgs);
    }
    output.info(format!("Fetching popular movies ({} page(s))...", cmd.pages));

    let mut feed = FeedController::new(Arc::new(client));
    let mut request = Some(feed.begin_refresh());
    while let Some(next) = request {
        if let Err(e) = step_feed(&mut feed, next).await {
            return catalog_error(output, "Failed to load popular movies", &e);
        }
        request = if feed.page() < cmd.pages {
            feed.begin_load_more()
        } else {
            None
        };
    }

    let page = TitlePage {
        page: feed.page(),
        has_more: feed.has_more(),
        results: limited(feed.items(), cmd.limit),
    };
    print_or_fail(output, &page, || page.text())
}

/// Fetch and apply one feed page, keeping the failure for the exit code
async fn step_feed<C: Catalog + ?Sized + 'static>(
    feed: &mut FeedController<C>,
    request: PageRequest,
) -> Result<(), CatalogError> {
    let response = feed.fetch(request).await;
    let result = Ok(response.result?);
    feed.apply(FeedResponse { request, result });
    Ok(())
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config_path: Option<&Path>, output: &Output) -> ExitCode {
    let (client, config) = match connect(config_path, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if cmd.page == 0 {
        return output.error("--page must be at least 1", ExitCode::InvalidArgs);
    }

    let min_len = config.settings.min_query_len;
    let mut search = SearchController::with_min_len(Arc::new(client), min_len);
    if search.on_text_change(cmd.query.clone()) == TextChange::Cleared {
        return output.error(
            format!("Query must be at least {} characters", min_len),
            ExitCode::InvalidArgs,
        );
    }

    output.info(format!("Searching for: {}", cmd.query.trim()));

    let mut request = search.submit();
    // Start of the most recently applied page within the accumulated items
    let mut page_start = 0;
    while let Some(next) = request {
        let before = search.items().len();
        let mode = next.page.mode;
        let response = search.fetch(next).await;
        if let Err(e) = &response.result {
            return catalog_error(output, "Search failed", e);
        }
        search.apply(response);
        page_start = if mode == FetchMode::Append { before } else { 0 };

        request = if search.page() < cmd.page {
            search.begin_load_more()
        } else {
            None
        };
    }

    let results: &[Title] = if search.page() == cmd.page {
        &search.items()[page_start..]
    } else {
        &[]
    };
    let page = TitlePage {
        page: cmd.page,
        has_more: search.page() == cmd.page && search.has_more(),
        results: limited(results, cmd.limit),
    };
    print_or_fail(output, &page, || page.text())
}

// =============================================================================
// Info Command
// =============================================================================

/// Detail view plus resolved artwork URLs
#[derive(Debug, Serialize)]
pub struct InfoOutput<'a> {
    #[serde(flatten)]
    pub detail: &'a DetailView,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

/// Whatever parts of a detail view loaded
#[derive(Debug, Serialize)]
pub struct PartialInfoOutput {
    pub movie: MovieDetail,
    pub cast: Option<Vec<CastMember>>,
    pub reviews: Option<Vec<Review>>,
    /// One entry per part that failed
    pub errors: Vec<String>,
}

impl PartialInfoOutput {
    /// Fails only when the metadata itself failed
    pub fn from_partial(partial: PartialDetail) -> Result<Self, CatalogError> {
        let movie = partial.movie?;
        let mut errors = Vec::new();
        let cast = partial
            .cast
            .map_err(|e| errors.push(format!("credits: {}", e)))
            .ok();
        let reviews = partial
            .reviews
            .map_err(|e| errors.push(format!("reviews: {}", e)))
            .ok();
        Ok(Self {
            movie,
            cast,
            reviews,
            errors,
        })
    }
}

pub async fn info_cmd(cmd: InfoCmd, config_path: Option<&Path>, output: &Output) -> ExitCode {
    let (client, config) = match connect(config_path, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let base = &config.settings.image_base_url;

    output.info(format!("Getting info for: {}", cmd.id));

    if cmd.partial {
        let partial = aggregate_partial(&client, cmd.id).await;
        return match PartialInfoOutput::from_partial(partial) {
            Ok(info) => print_or_fail(output, &info, || {
                let mut text = info_text(&info.movie, info.cast.as_deref(), info.reviews.as_deref());
                for err in &info.errors {
                    text.push_str(&format!("\n! {}", err));
                }
                text
            }),
            Err(e) => catalog_error(output, "Movie info failed", &e),
        };
    }

    match client.details(cmd.id).await {
        Ok(view) => {
            let info = InfoOutput {
                detail: &view,
                poster_url: image_url(base, view.movie.poster_path.as_deref(), ImageSize::Medium),
                backdrop_url: image_url(base, view.movie.backdrop_path.as_deref(), ImageSize::Original),
            };
            print_or_fail(output, &info, || {
                info_text(&view.movie, Some(view.cast.as_slice()), Some(view.reviews.as_slice()))
            })
        }
        Err(e) => catalog_error(output, "Movie info failed", &e),
    }
}

fn info_text(movie: &MovieDetail, cast: Option<&[CastMember]>, reviews: Option<&[Review]>) -> String {
    let mut lines = vec![movie.to_string()];
    if let Some(tagline) = &movie.tagline {
        lines.push(tagline.clone());
    }
    if !movie.genres.is_empty() {
        lines.push(movie.genres.join(" · "));
    }
    if !movie.overview.is_empty() {
        lines.push(String::new());
        lines.push(movie.overview.clone());
    }
    if let Some(cast) = cast {
        let names: Vec<&str> = cast.iter().take(TEXT_CAST_LIMIT).map(|m| m.name.as_str()).collect();
        lines.push(String::new());
        lines.push(format!("Cast: {}", if names.is_empty() { "-".to_string() } else { names.join(", ") }));
    }
    if let Some(reviews) = reviews {
        lines.push(format!("Reviews: {}", reviews.len()));
    }
    lines.join("\n")
}

// =============================================================================
// Image Command
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ImageOutput {
    pub url: String,
    pub size: ImageSize,
}

pub fn image_cmd(cmd: ImageCmd, config_path: Option<&Path>, output: &Output) -> ExitCode {
    let settings = Settings::load(config_path);
    let size = ImageSize::from(cmd.size);
    match image_url(&settings.image_base_url, Some(cmd.path.trim()), size) {
        Some(url) => {
            let image = ImageOutput { url, size };
            print_or_fail(output, &image, || image.url.clone())
        }
        None => output.error("Image path is empty", ExitCode::InvalidArgs),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn print_or_fail<T: Serialize>(output: &Output, data: &T, text: impl FnOnce() -> String) -> ExitCode {
    match output.print(data, text) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_IMAGE_BASE;

    fn title(id: u64, name: &str) -> Title {
        Title {
            id,
            title: name.to_string(),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: "2021-09-15".to_string(),
            vote_average: 7.8,
            vote_count: 1,
            genre_ids: vec![],
        }
    }

    fn movie() -> MovieDetail {
        MovieDetail {
            id: 1,
            title: "Dune".into(),
            tagline: None,
            overview: String::new(),
            release_date: "2021-09-15".into(),
            runtime: Some(155),
            genres: vec![],
            vote_average: 7.8,
            vote_count: 10,
            poster_path: None,
            backdrop_path: None,
        }
    }

    #[test]
    fn test_limited() {
        let items = vec![title(1, "a"), title(2, "b"), title(3, "c")];
        assert_eq!(limited(&items, Some(2)).len(), 2);
        assert_eq!(limited(&items, Some(10)).len(), 3);
        assert_eq!(limited(&items, None).len(), 3);
    }

    #[test]
    fn test_title_page_text() {
        let items = vec![title(438631, "Dune")];
        let page = TitlePage {
            page: 1,
            has_more: true,
            results: &items,
        };
        assert_eq!(page.text(), "  438631  Dune (2021) ★ 7.8\n-- more after page 1 --");
    }

    #[test]
    fn test_partial_output_collects_errors() {
        let partial = PartialDetail {
            movie: Ok(movie()),
            cast: Err(CatalogError::Status(500)),
            reviews: Ok(vec![]),
        };
        let info = PartialInfoOutput::from_partial(partial).unwrap();
        assert!(info.cast.is_none());
        assert_eq!(info.reviews, Some(vec![]));
        assert_eq!(info.errors, vec!["credits: Server returned status 500".to_string()]);
    }

    #[test]
    fn test_partial_output_requires_movie() {
        let partial = PartialDetail {
            movie: Err(CatalogError::Status(404)),
            cast: Ok(vec![]),
            reviews: Ok(vec![]),
        };
        let err = PartialInfoOutput::from_partial(partial).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_info_text() {
        let cast: &[CastMember] = &[];
        let reviews: &[Review] = &[];
        let text = info_text(&movie(), Some(cast), Some(reviews));
        assert_eq!(text, "Dune (2021) - 2h 35m - ★ 7.8\n\nCast: -\nReviews: 0");
    }

    #[test]
    fn test_image_url_for_cli() {
        let url = image_url(DEFAULT_IMAGE_BASE, Some("/x.jpg"), ImageSize::from(crate::cli::SizeArg::Original));
        assert_eq!(url.as_deref(), Some("https://image.tmdb.org/t/p/original/x.jpg"));
    }
}
