//! Data structures for Cinescope
//!
//! Shared models used across the catalog client, controllers and UI:
//! - **Titles**: movie records as they appear in list endpoints
//! - **Pages**: the paginated envelope returned by list endpoints
//! - **Details**: metadata, cast and reviews merged for the detail view
//! - **Images**: size tiers and URL construction for artwork

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default base for TMDB image assets
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

// =============================================================================
// Titles
// =============================================================================

/// A movie record from a list endpoint (popular, search)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    /// `YYYY-MM-DD`, empty when unknown
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
}

impl Title {
    /// Release year, if the date is known
    pub fn year(&self) -> Option<u16> {
        extract_year(&self.release_date)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year() {
            Some(year) => write!(f, "{} ({}) ★ {:.1}", self.title, year, self.vote_average),
            None => write!(f, "{} ★ {:.1}", self.title, self.vote_average),
        }
    }
}

// =============================================================================
// Pages
// =============================================================================

/// One page of a paginated listing
///
/// `results` is required: an envelope without it is a schema error. The
/// counters default to zero, which reads as "no further pages".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> PageResult<T> {
    /// Whether another page exists after this one
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

// =============================================================================
// Details
// =============================================================================

/// Full metadata for one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: String,
    pub release_date: String,
    /// Minutes
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl MovieDetail {
    pub fn year(&self) -> Option<u16> {
        extract_year(&self.release_date)
    }

    /// Runtime formatted as `2h 35m`
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime.filter(|m| *m > 0).map(|m| {
            if m >= 60 {
                format!("{}h {}m", m / 60, m % 60)
            } else {
                format!("{}m", m)
            }
        })
    }
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(year) = self.year() {
            write!(f, " ({})", year)?;
        }
        if let Some(runtime) = self.runtime_label() {
            write!(f, " - {}", runtime)?;
        }
        write!(f, " - ★ {:.1}", self.vote_average)
    }
}

/// One credited cast member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// One user review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Metadata, cast and reviews for a single detail-screen visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub movie: MovieDetail,
    pub cast: Vec<CastMember>,
    pub reviews: Vec<Review>,
}

impl DetailView {
    /// Artwork path for the header: backdrop first, poster as fallback
    pub fn hero_path(&self) -> Option<&str> {
        self.movie
            .backdrop_path
            .as_deref()
            .or(self.movie.poster_path.as_deref())
    }
}

// =============================================================================
// Images
// =============================================================================

/// Size tiers served by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// 200px wide (cast thumbnails)
    Small,
    /// 500px wide (posters, backdrops)
    Medium,
    Original,
}

impl ImageSize {
    pub fn segment(&self) -> &'static str {
        match self {
            ImageSize::Small => "w200",
            ImageSize::Medium => "w500",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Build an absolute image URL from a provider-relative path
///
/// Returns `None` when the path is absent or empty, meaning the caller
/// should render a placeholder.
pub fn image_url(base: &str, path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{}/{}{}", base, size.segment(), path))
    } else {
        Some(format!("{}/{}/{}", base, size.segment(), path))
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extract year from a date string like "2022-03-04"
pub(crate) fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}
