//! JSON shapes of the YTS v2 API and their conversion into model types.
//!
//! YTS sends `null` for many fields on sparse records, so almost everything
//! is optional here and defaults are applied during conversion.

use serde::Deserialize;

use model::{CastMember, DownloadLink, MovieDetails, MovieId, MovieSummary, Screenshot};

/// Every YTS response: `{"status": "ok", "status_message": ..., "data": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub status_message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Payload of a successful response, `None` for any other status
    pub fn into_ok_data(self) -> Option<T> {
        if self.status == "ok" { self.data } else { None }
    }

    pub fn describe(&self) -> String {
        format!(
            "status={} message={}",
            self.status,
            self.status_message.as_deref().unwrap_or("-")
        )
    }
}

/// `data` of `list_movies.json` and `movie_suggestions.json`
#[derive(Debug, Deserialize)]
pub(crate) struct MovieListData {
    #[serde(default)]
    pub movies: Option<Vec<WireMovie>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMovie {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub medium_cover_image: Option<String>,
}

impl From<WireMovie> for MovieSummary {
    fn from(movie: WireMovie) -> Self {
        MovieSummary {
            id: movie.id,
            title: movie.title.unwrap_or_default(),
            year: movie.year.unwrap_or_default(),
            cover_image_url: movie.medium_cover_image.unwrap_or_default(),
        }
    }
}

/// `data` of `movie_details.json`
#[derive(Debug, Deserialize)]
pub(crate) struct MovieDetailsData {
    #[serde(default)]
    pub movie: Option<WireMovieDetails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub mpa_rating: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub description_full: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub medium_cover_image: Option<String>,
    #[serde(default)]
    pub medium_screenshot_image1: Option<String>,
    #[serde(default)]
    pub medium_screenshot_image2: Option<String>,
    #[serde(default)]
    pub medium_screenshot_image3: Option<String>,
    #[serde(default)]
    pub large_screenshot_image1: Option<String>,
    #[serde(default)]
    pub large_screenshot_image2: Option<String>,
    #[serde(default)]
    pub large_screenshot_image3: Option<String>,
    #[serde(default)]
    pub cast: Option<Vec<WireCastMember>>,
    #[serde(default)]
    pub torrents: Option<Vec<WireTorrent>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCastMember {
    pub name: String,
    #[serde(default)]
    pub url_small_image: Option<String>,
    #[serde(default)]
    pub imdb_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireTorrent {
    pub url: String,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl WireMovieDetails {
    /// Convert into a [`MovieDetails`].
    ///
    /// YTS answers unknown ids with `status: ok` and a placeholder record
    /// whose id is 0 and whose title is empty; those yield `None`.
    pub fn into_details(self) -> Option<MovieDetails> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        if self.id == 0 {
            return None;
        }

        let screenshots = [
            (self.medium_screenshot_image1, self.large_screenshot_image1),
            (self.medium_screenshot_image2, self.large_screenshot_image2),
            (self.medium_screenshot_image3, self.large_screenshot_image3),
        ]
        .into_iter()
        .filter(|(thumb, full)| thumb.is_some() || full.is_some())
        .map(|(thumbnail_url, full_url)| Screenshot {
            thumbnail_url,
            full_url,
        })
        .take(MovieDetails::MAX_SCREENSHOTS)
        .collect();

        let cast = self
            .cast
            .unwrap_or_default()
            .into_iter()
            .map(|member| CastMember {
                id: member.imdb_code.unwrap_or_else(|| member.name.clone()),
                name: member.name,
                image_url: member.url_small_image.filter(|url| !url.is_empty()),
            })
            .collect();

        let download_links = self
            .torrents
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, torrent)| DownloadLink {
                label: torrent_label(index, torrent.quality.as_deref(), torrent.kind.as_deref()),
                url: torrent.url,
            })
            .collect();

        Some(MovieDetails {
            id: self.id,
            title,
            year: self.year.unwrap_or_default(),
            genres: self.genres.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            mpa_rating: self.mpa_rating.unwrap_or_default(),
            runtime_minutes: self.runtime.unwrap_or_default(),
            full_description: self.description_full.unwrap_or_default(),
            background_image_url: self.background_image.unwrap_or_default(),
            poster_image_url: self.medium_cover_image.unwrap_or_default(),
            screenshots,
            cast,
            download_links,
        })
    }
}

/// "1080p bluray", or "Link N" (1-based) when the torrent carries no metadata
fn torrent_label(index: usize, quality: Option<&str>, kind: Option<&str>) -> String {
    let label = [quality, kind]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if label.is_empty() {
        format!("Link {}", index + 1)
    } else {
        label
    }
}
