//! Shared fixtures for controller tests
//!
//! `FakeCatalog` serves scripted pages and records every call it receives.
//! Anything not scripted answers with a 404.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use cinescope::api::{Catalog, CatalogError};
use cinescope::models::{CastMember, MovieDetail, PageResult, Review, Title};

/// A call received by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Popular(u32),
    Search(String, u32),
    Movie(u64),
    Credits(u64),
    Reviews(u64),
}

#[derive(Debug, Clone)]
enum Scripted<T> {
    Ok(T),
    Status(u16),
}

impl<T: Clone> Scripted<T> {
    fn resolve(entry: Option<&Self>) -> Result<T, CatalogError> {
        match entry {
            Some(Scripted::Ok(value)) => Ok(value.clone()),
            Some(Scripted::Status(code)) => Err(CatalogError::Status(*code)),
            None => Err(CatalogError::Status(404)),
        }
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    popular: Mutex<HashMap<u32, Scripted<PageResult<Title>>>>,
    search: Mutex<HashMap<(String, u32), Scripted<PageResult<Title>>>>,
    movies: Mutex<HashMap<u64, Scripted<MovieDetail>>>,
    credits: Mutex<HashMap<u64, Scripted<Vec<CastMember>>>>,
    reviews: Mutex<HashMap<u64, Scripted<Vec<Review>>>>,
    /// Simulated latency for every call
    latency: Option<Duration>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn popular_page(&self, page: u32, ids: &[u64], total_pages: u32) {
        self.popular
            .lock()
            .unwrap()
            .insert(page, Scripted::Ok(page_of(page, ids, total_pages)));
    }

    pub fn fail_popular(&self, page: u32, status: u16) {
        self.popular.lock().unwrap().insert(page, Scripted::Status(status));
    }

    pub fn search_page(&self, query: &str, page: u32, ids: &[u64], total_pages: u32) {
        self.search
            .lock()
            .unwrap()
            .insert((query.to_string(), page), Scripted::Ok(page_of(page, ids, total_pages)));
    }

    pub fn fail_search(&self, query: &str, page: u32, status: u16) {
        self.search
            .lock()
            .unwrap()
            .insert((query.to_string(), page), Scripted::Status(status));
    }

    /// Script metadata, credits and reviews for `id`
    pub fn movie_detail(&self, id: u64, cast: usize, reviews: usize) {
        self.movies.lock().unwrap().insert(id, Scripted::Ok(movie(id)));
        self.credits
            .lock()
            .unwrap()
            .insert(id, Scripted::Ok((0..cast as u64).map(cast_member).collect()));
        self.reviews
            .lock()
            .unwrap()
            .insert(id, Scripted::Ok((0..reviews).map(review).collect()));
    }

    pub fn fail_credits(&self, id: u64, status: u16) {
        self.credits.lock().unwrap().insert(id, Scripted::Status(status));
    }

    pub fn fail_reviews(&self, id: u64, status: u16) {
        self.reviews.lock().unwrap().insert(id, Scripted::Status(status));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<(String, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(q, p) => Some((q, p)),
                _ => None,
            })
            .collect()
    }

    pub fn popular_calls(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Popular(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn popular(&self, page: u32) -> Result<PageResult<Title>, CatalogError> {
        self.record(Call::Popular(page)).await;
        Scripted::resolve(self.popular.lock().unwrap().get(&page))
    }

    async fn search(&self, query: &str, page: u32) -> Result<PageResult<Title>, CatalogError> {
        self.record(Call::Search(query.to_string(), page)).await;
        Scripted::resolve(self.search.lock().unwrap().get(&(query.to_string(), page)))
    }

    async fn movie(&self, id: u64) -> Result<MovieDetail, CatalogError> {
        self.record(Call::Movie(id)).await;
        Scripted::resolve(self.movies.lock().unwrap().get(&id))
    }

    async fn credits(&self, id: u64) -> Result<Vec<CastMember>, CatalogError> {
        self.record(Call::Credits(id)).await;
        Scripted::resolve(self.credits.lock().unwrap().get(&id))
    }

    async fn reviews(&self, id: u64) -> Result<Vec<Review>, CatalogError> {
        self.record(Call::Reviews(id)).await;
        Scripted::resolve(self.reviews.lock().unwrap().get(&id))
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn title(id: u64) -> Title {
    Title {
        id,
        title: format!("Title {}", id),
        poster_path: Some(format!("/poster{}.jpg", id)),
        backdrop_path: None,
        overview: String::new(),
        release_date: "2021-09-15".to_string(),
        vote_average: 7.0,
        vote_count: 100,
        genre_ids: vec![],
    }
}

pub fn page_of(page: u32, ids: &[u64], total_pages: u32) -> PageResult<Title> {
    PageResult {
        page,
        results: ids.iter().copied().map(title).collect(),
        total_pages,
        total_results: total_pages * 20,
    }
}

pub fn movie(id: u64) -> MovieDetail {
    MovieDetail {
        id,
        title: format!("Title {}", id),
        tagline: None,
        overview: "Overview".to_string(),
        release_date: "2021-09-15".to_string(),
        runtime: Some(155),
        genres: vec!["Drama".to_string()],
        vote_average: 7.0,
        vote_count: 100,
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
    }
}

pub fn cast_member(id: u64) -> CastMember {
    CastMember {
        id,
        name: format!("Actor {}", id),
        character: format!("Role {}", id),
        profile_path: None,
    }
}

pub fn review(n: usize) -> Review {
    Review {
        id: format!("r{}", n),
        author: format!("critic{}", n),
        content: "Worth it.".to_string(),
        created_at: "2021-10-01T00:00:00.000Z".to_string(),
        url: None,
    }
}

pub fn ids(items: &[Title]) -> Vec<u64> {
    items.iter().map(|t| t.id).collect()
}
