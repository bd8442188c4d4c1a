//! Recommendation client: "similar movies" for one title.

use tracing::{debug, instrument, warn};

use model::{MovieId, MovieSummary, SuggestionSet};

use crate::error::RecommendationError;
use crate::http::YtsHttp;
use crate::wire::{Envelope, MovieListData};

/// Client for `movie_suggestions.json`.
#[derive(Debug, Clone)]
pub struct SuggestionsClient {
    http: YtsHttp,
}

impl SuggestionsClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http: YtsHttp::new(client, base_url),
        }
    }

    /// Fetch titles similar to `movie_id`.
    ///
    /// An empty list is a normal answer. Every other failure, including a
    /// non-ok status flag, is [`RecommendationError::Transport`].
    #[instrument(skip(self))]
    pub async fn get_suggestions(
        &self,
        movie_id: MovieId,
    ) -> Result<SuggestionSet, RecommendationError> {
        let body = self
            .http
            .get_text("movie_suggestions.json", &[("movie_id", movie_id.to_string())])
            .await?;

        let envelope: Envelope<MovieListData> = serde_json::from_str(&body).map_err(|e| {
            warn!("Undecodable suggestions for movie {}: {}", movie_id, e);
            RecommendationError::Transport(format!("invalid suggestions response: {e}"))
        })?;

        if envelope.status != "ok" {
            return Err(RecommendationError::Transport(envelope.describe()));
        }

        let movies: Vec<MovieSummary> = envelope
            .data
            .and_then(|data| data.movies)
            .unwrap_or_default()
            .into_iter()
            .map(MovieSummary::from)
            .collect();

        debug!("{} suggestions for movie {}", movies.len(), movie_id);
        Ok(SuggestionSet::new(movie_id, movies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{start_mock_yts, test_http_client};
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn movie_suggestions(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        match params.get("movie_id").map(String::as_str) {
            Some("1") => Json(json!({
                "status": "ok",
                "data": {
                    "movie_count": 2,
                    "movies": [
                        {"id": 5, "title": "Interstellar", "year": 2014, "medium_cover_image": "https://img/5.jpg"},
                        {"id": 6, "title": "Tenet", "year": 2020, "medium_cover_image": "https://img/6.jpg"}
                    ]
                }
            })),
            Some("2") => Json(json!({"status": "ok", "data": {"movie_count": 0}})),
            _ => Json(json!({"status": "error", "status_message": "movie_id missing"})),
        }
    }

    async fn build_test_client() -> (SuggestionsClient, tokio::task::JoinHandle<()>) {
        let router = Router::new().route("/movie_suggestions.json", get(movie_suggestions));
        let (base_url, handle) = start_mock_yts(router).await;
        (SuggestionsClient::new(test_http_client(), base_url), handle)
    }

    #[tokio::test]
    async fn test_suggestions_in_server_order() {
        let (client, handle) = build_test_client().await;

        let set = client.get_suggestions(1).await.expect("suggestions failed");
        assert_eq!(set.for_movie, 1);
        let titles: Vec<_> = set.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Interstellar", "Tenet"]);

        handle.abort();
    }

    #[tokio::test]
    async fn test_empty_suggestions_are_success() {
        let (client, handle) = build_test_client().await;

        let set = client.get_suggestions(2).await.expect("empty set is not an error");
        assert!(set.is_empty());
        assert_eq!(set.for_movie, 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_error_status_is_transport() {
        let (client, handle) = build_test_client().await;

        let result = client.get_suggestions(3).await;
        assert!(matches!(result, Err(RecommendationError::Transport(_))));

        handle.abort();
    }

    #[tokio::test]
    async fn test_timeout_is_transport() {
        let router = Router::new().route(
            "/movie_suggestions.json",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Json(json!({"status": "ok", "data": {}}))
            }),
        );
        let (base_url, handle) = start_mock_yts(router).await;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(100))
            .build()
            .unwrap();
        let client = SuggestionsClient::new(client, base_url);

        let result = client.get_suggestions(1).await;
        assert!(matches!(result, Err(RecommendationError::Transport(_))));

        handle.abort();
    }
}
