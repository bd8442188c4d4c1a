//! YTS API clients.
//!
//! This crate talks to the YTS v2 JSON API. It provides:
//! - [`CatalogClient`]: title search and movie details
//! - [`SuggestionsClient`]: similar titles for a movie
//!
//! Both normalise the `{"status": "ok", "data": ...}` envelope into model
//! types and map every failure onto a small error enum. Neither caches.
//!
//! ## Example Usage
//! ```ignore
//! let http = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
//! let catalog = CatalogClient::new(http.clone(), "https://yts.mx/api/v2");
//! let suggestions = SuggestionsClient::new(http, "https://yts.mx/api/v2");
//!
//! let query = SearchQuery::parse("Inception")?;
//! let movies = catalog.search(&query).await?;
//! let similar = suggestions.get_suggestions(movies[0].id).await?;
//! ```

pub mod catalog;
pub mod error;
mod http;
pub mod suggestions;
mod wire;

pub use catalog::CatalogClient;
pub use error::{CatalogError, RecommendationError};
pub use suggestions::SuggestionsClient;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve `router` on a random local port, returning its base URL
    pub async fn start_mock_yts(router: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock YTS service");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock YTS service failed");
        });

        (format!("http://{}", addr), handle)
    }

    pub fn test_http_client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client")
    }
}
