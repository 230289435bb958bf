//! TMDB (The Movie Database) API client
//!
//! Popular listing, search, and per-title metadata, credits and reviews.
//! API docs: https://developer.themoviedb.org/docs

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Catalog, CatalogError};
use crate::config::Config;
use crate::models::{CastMember, MovieDetail, PageResult, Review, Title};

/// Language sent with every request unless configured otherwise
pub const DEFAULT_LANGUAGE: &str = "en-US";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    access_token: String,
    base_url: String,
    language: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a client from loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            access_token: config.access_token.clone(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            language: config.settings.language.clone(),
            client: build_http_client(config.settings.request_timeout_secs),
        }
    }

    /// Create a client against an explicit base URL (for testing)
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            access_token: access_token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            client: build_http_client(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the `language` parameter
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, "catalog request");

        let response = self
            .client
            .get(&url)
            .query(&[("language", self.language.as_str())])
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "catalog request failed");
                CatalogError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "catalog returned error status");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(endpoint, error = %e, "catalog response did not match schema");
            CatalogError::Schema(format!("JSON parse error: {}", e))
        })
    }
}

fn build_http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

fn check_page(page: u32) -> Result<u32, CatalogError> {
    if page == 0 {
        Err(CatalogError::InvalidPage)
    } else {
        Ok(page)
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn popular(&self, page: u32) -> Result<PageResult<Title>, CatalogError> {
        let page = check_page(page)?;
        self.get(&format!("/movie/popular?page={}", page)).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<PageResult<Title>, CatalogError> {
        let page = check_page(page)?;
        let endpoint = format!(
            "/search/movie?query={}&page={}",
            urlencoding::encode(query),
            page
        );
        self.get(&endpoint).await
    }

    async fn movie(&self, id: u64) -> Result<MovieDetail, CatalogError> {
        let response: MovieResponse = self.get(&format!("/movie/{}", id)).await?;
        Ok(response.into_detail())
    }

    async fn credits(&self, id: u64) -> Result<Vec<CastMember>, CatalogError> {
        let response: CreditsResponse = self.get(&format!("/movie/{}/credits", id)).await?;
        Ok(response.cast)
    }

    async fn reviews(&self, id: u64) -> Result<Vec<Review>, CatalogError> {
        let response: PageResult<Review> = self.get(&format!("/movie/{}/reviews", id)).await?;
        Ok(response.results)
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct MovieResponse {
    id: u64,
    title: String,
    tagline: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    vote_average: Option<f32>,
    vote_count: Option<u32>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

impl MovieResponse {
    fn into_detail(self) -> MovieDetail {
        MovieDetail {
            id: self.id,
            title: self.title,
            tagline: self.tagline.filter(|t| !t.trim().is_empty()),
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            runtime: self.runtime,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastMember>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_page() {
        assert!(matches!(check_page(0), Err(CatalogError::InvalidPage)));
        assert_eq!(check_page(1).unwrap(), 1);
    }

    #[test]
    fn test_movie_response_blank_tagline() {
        let raw: MovieResponse = serde_json::from_str(
            r#"{
                "id": 438631,
                "title": "Dune",
                "tagline": "",
                "release_date": "2021-09-15",
                "runtime": 155,
                "genres": [{"id": 878, "name": "Science Fiction"}],
                "vote_average": 7.8,
                "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
                "backdrop_path": null
            }"#,
        )
        .unwrap();

        let detail = raw.into_detail();
        assert_eq!(detail.tagline, None);
        assert_eq!(detail.genres, vec!["Science Fiction".to_string()]);
        assert_eq!(detail.overview, "");
        assert_eq!(detail.vote_count, 0);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = TmdbClient::with_base_url("token", "https://api.test/3/");
        assert_eq!(client.base_url(), "https://api.test/3");
    }
}
