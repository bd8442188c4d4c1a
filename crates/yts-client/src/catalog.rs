//! Catalog client: title search and per-movie details.

use tracing::{debug, instrument, warn};

use model::{MovieDetails, MovieId, MovieSummary, SearchQuery};

use crate::error::CatalogError;
use crate::http::YtsHttp;
use crate::wire::{Envelope, MovieDetailsData, MovieListData};

/// Client for `list_movies.json` and `movie_details.json`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: YtsHttp,
}

impl CatalogClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http: YtsHttp::new(client, base_url),
        }
    }

    /// Search the catalog by title.
    ///
    /// # Returns
    /// Summaries in server order. A well-formed answer without movies is
    /// [`CatalogError::NoResults`]; anything that never produced a readable
    /// answer is [`CatalogError::Transport`].
    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, CatalogError> {
        let body = self
            .http
            .get_text("list_movies.json", &[("query_term", query.to_string())])
            .await?;

        let envelope: Envelope<MovieListData> = serde_json::from_str(&body).map_err(|e| {
            warn!("Undecodable search response: {}", e);
            CatalogError::Transport(format!("invalid search response: {e}"))
        })?;
        let outcome = envelope.describe();

        let movies = envelope
            .into_ok_data()
            .and_then(|data| data.movies)
            .unwrap_or_default();
        if movies.is_empty() {
            debug!("Search returned no movies ({})", outcome);
            return Err(CatalogError::NoResults);
        }

        let results: Vec<MovieSummary> = movies.into_iter().map(MovieSummary::from).collect();
        debug!("Search returned {} movies", results.len());
        Ok(results)
    }

    /// Fetch the full record of one movie, with images and cast.
    #[instrument(skip(self))]
    pub async fn get_details(&self, movie_id: MovieId) -> Result<MovieDetails, CatalogError> {
        let body = self
            .http
            .get_text(
                "movie_details.json",
                &[
                    ("movie_id", movie_id.to_string()),
                    ("with_images", "true".to_string()),
                    ("with_cast", "true".to_string()),
                ],
            )
            .await?;

        let envelope: Envelope<MovieDetailsData> = serde_json::from_str(&body).map_err(|e| {
            warn!("Malformed details response for movie {}: {}", movie_id, e);
            CatalogError::NotFound(format!("malformed response for movie {movie_id}"))
        })?;
        let outcome = envelope.describe();

        envelope
            .into_ok_data()
            .and_then(|data| data.movie)
            .and_then(|movie| movie.into_details())
            .ok_or_else(|| {
                debug!("No details for movie {} ({})", movie_id, outcome);
                CatalogError::NotFound(format!("movie {movie_id}"))
            })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}
