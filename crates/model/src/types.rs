//! Core domain types shared by the clients and the orchestrator.
//!
//! Everything here is plain data: produced by a client, moved into a
//! [`ViewState`](crate::ViewState), and never mutated after that.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Numeric catalog identifier of a movie
pub type MovieId = u32;

/// Image shown for cast members that have no portrait
pub const CAST_PLACEHOLDER_IMAGE: &str = "/img/noprofile.jpg";

// =============================================================================
// Search Results
// =============================================================================

/// One row of a search result or suggestion list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year: u16,
    pub cover_image_url: String,
}

impl MovieSummary {
    /// `"Title (Year)"`, the way result lists label a movie
    pub fn display_title(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

// =============================================================================
// Movie Details
// =============================================================================

/// A screenshot pair. Either side may be missing in catalog data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub thumbnail_url: Option<String>,
    pub full_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl CastMember {
    /// Portrait URL, or the shared placeholder when the catalog has none
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(CAST_PLACEHOLDER_IMAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub label: String,
    pub url: String,
}

/// Full record for the detail view.
///
/// Built in one piece by the catalog client and replaced wholesale on the
/// next selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    pub year: u16,
    pub genres: Vec<String>,
    /// IMDb score as reported by the catalog (0.0 - 10.0)
    pub rating: f32,
    /// Certification board rating, e.g. "PG-13". Empty when unrated.
    pub mpa_rating: String,
    pub runtime_minutes: u32,
    pub full_description: String,
    pub background_image_url: String,
    pub poster_image_url: String,
    /// At most three entries, in catalog order
    pub screenshots: Vec<Screenshot>,
    pub cast: Vec<CastMember>,
    pub download_links: Vec<DownloadLink>,
}

impl MovieDetails {
    /// Maximum number of screenshots the catalog exposes per movie
    pub const MAX_SCREENSHOTS: usize = 3;

    /// Genres joined the way the detail header shows them
    pub fn genre_line(&self) -> String {
        self.genres.join("/ ")
    }

    /// Screenshots that can be opened at full size
    pub fn visible_screenshots(&self) -> impl Iterator<Item = &Screenshot> {
        self.screenshots.iter().filter(|shot| shot.full_url.is_some())
    }
}

// =============================================================================
// Suggestions and Trailers
// =============================================================================

/// "Similar movies" for exactly one movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub for_movie: MovieId,
    pub movies: Vec<MovieSummary>,
}

impl SuggestionSet {
    pub fn new(for_movie: MovieId, movies: Vec<MovieSummary>) -> Self {
        Self { for_movie, movies }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }
}

/// Embeddable trailer URL. Absence is modelled as `Option::None` by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerReference {
    pub embed_url: String,
}

impl TrailerReference {
    pub fn new(embed_url: impl Into<String>) -> Self {
        Self {
            embed_url: embed_url.into(),
        }
    }
}
