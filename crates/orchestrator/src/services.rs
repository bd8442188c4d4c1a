//! Seams between the orchestrator and the remote services.
//!
//! The orchestrator only sees these traits. The concrete HTTP clients
//! implement them here; tests plug in in-memory fakes.

use async_trait::async_trait;

use model::{MovieDetails, MovieId, MovieSummary, SearchQuery, SuggestionSet, TrailerReference};
use trailer::TrailerLocator;
use yts_client::{CatalogClient, CatalogError, RecommendationError, SuggestionsClient};

/// Title search and movie details
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, CatalogError>;

    async fn get_details(&self, movie_id: MovieId) -> Result<MovieDetails, CatalogError>;
}

/// "Similar movies" for a title
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn get_suggestions(&self, movie_id: MovieId)
        -> Result<SuggestionSet, RecommendationError>;
}

/// Best-effort trailer lookup.
///
/// Implementations must not fail: every problem is reported as `None`.
#[async_trait]
pub trait TrailerService: Send + Sync {
    async fn find_trailer(&self, title: &str, year: u16) -> Option<TrailerReference>;
}

#[async_trait]
impl CatalogService for CatalogClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, CatalogError> {
        CatalogClient::search(self, query).await
    }

    async fn get_details(&self, movie_id: MovieId) -> Result<MovieDetails, CatalogError> {
        CatalogClient::get_details(self, movie_id).await
    }
}

#[async_trait]
impl SuggestionService for SuggestionsClient {
    async fn get_suggestions(
        &self,
        movie_id: MovieId,
    ) -> Result<SuggestionSet, RecommendationError> {
        SuggestionsClient::get_suggestions(self, movie_id).await
    }
}

#[async_trait]
impl TrailerService for TrailerLocator {
    async fn find_trailer(&self, title: &str, year: u16) -> Option<TrailerReference> {
        TrailerLocator::find_trailer(self, title, year).await
    }
}
