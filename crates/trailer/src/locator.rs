//! Trailer Locator - YouTube search for an embeddable trailer
//!
//! ## Algorithm
//! 1. Skip the lookup entirely when no API key is configured
//! 2. `GET {base}/search?part=snippet&type=video&q=<title year qualifier>&key=<key>`
//! 3. Take the first item that carries a `videoId`
//! 4. Build `{embed_base}/{videoId}`
//!
//! Quota exhaustion shows up as HTTP 403 (sometimes 429); it is treated
//! like any other failure and collapses to "no trailer".

use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use model::TrailerReference;

/// Appended to every search so the first hit is a trailer, not a clip
pub const SEARCH_QUALIFIER: &str = "official trailer";

/// Prefix of the embeddable player URL
pub const DEFAULT_EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// Why a lookup produced nothing. Never leaves this crate's public
/// [`TrailerLocator::find_trailer`]; exposed for [`TrailerLocator::try_find_trailer`].
#[derive(Error, Debug)]
pub enum TrailerError {
    #[error("no API key configured")]
    MissingCredential,

    /// Transport or decode failure, with the request URL (and its key)
    /// stripped
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Non-2xx answer, including quota and rate-limit rejections
    #[error("video search rejected ({status})")]
    Rejected { status: u16 },
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: Option<ItemId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    #[serde(default)]
    video_id: Option<String>,
}

impl TrailerError {
    fn request(err: reqwest::Error) -> Self {
        TrailerError::Request(err.without_url())
    }
}

/// Finds trailers on a YouTube-compatible search endpoint
#[derive(Clone)]
pub struct TrailerLocator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    embed_base_url: String,
}

impl TrailerLocator {
    /// Create a locator
    ///
    /// ## Parameters
    /// - `base_url`: API root, e.g. `https://www.googleapis.com/youtube/v3`
    /// - `api_key`: access credential; `None` disables lookups
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
        }
    }

    /// Configure the embed URL prefix (default: [`DEFAULT_EMBED_BASE_URL`])
    pub fn with_embed_base_url(mut self, embed_base_url: impl Into<String>) -> Self {
        self.embed_base_url = embed_base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether lookups will actually hit the network
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look up a trailer for `title` released in `year`.
    ///
    /// Always resolves; every failure is logged and reported as `None`.
    #[instrument(skip(self))]
    pub async fn find_trailer(&self, title: &str, year: u16) -> Option<TrailerReference> {
        match self.try_find_trailer(title, year).await {
            Ok(Some(trailer)) => {
                debug!("Found trailer {}", trailer.embed_url);
                Some(trailer)
            }
            Ok(None) => {
                debug!("No trailer found");
                None
            }
            Err(TrailerError::MissingCredential) => {
                debug!("Trailer lookup disabled: no API key");
                None
            }
            Err(e) => {
                warn!("Trailer lookup failed: {}", e);
                None
            }
        }
    }

    /// Same lookup as [`find_trailer`](Self::find_trailer), keeping the reason
    /// for an empty answer
    pub async fn try_find_trailer(
        &self,
        title: &str,
        year: u16,
    ) -> Result<Option<TrailerReference>, TrailerError> {
        let api_key = self.api_key.as_deref().ok_or(TrailerError::MissingCredential)?;
        let query = format!("{} {} {}", title, year, SEARCH_QUALIFIER);

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(TrailerError::request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrailerError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().await.map_err(TrailerError::request)?;
        let video_id = body
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .find(|id| !id.is_empty());

        Ok(video_id.map(|id| TrailerReference::new(format!("{}/{}", self.embed_base_url, id))))
    }
}

impl fmt::Debug for TrailerLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrailerLocator")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("embed_base_url", &self.embed_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;

    /// Mock video search: answers by the `q` parameter and counts calls
    async fn search(
        calls: Arc<AtomicUsize>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        calls.fetch_add(1, Ordering::SeqCst);
        if params.get("key").map(String::as_str) != Some("test-key") {
            return (StatusCode::BAD_REQUEST, "missing key").into_response();
        }
        match params.get("q").map(String::as_str) {
            Some("Inception 2010 official trailer") => Json(json!({
                "items": [
                    {"id": {"kind": "youtube#channel", "channelId": "UC1"}},
                    {"id": {"kind": "youtube#video", "videoId": "YoHD9XEInc0"}},
                    {"id": {"kind": "youtube#video", "videoId": "8hP9D6kZseM"}}
                ]
            }))
            .into_response(),
            Some("Quota 2000 official trailer") => (
                StatusCode::FORBIDDEN,
                Json(json!({"error": {"code": 403, "message": "quotaExceeded"}})),
            )
                .into_response(),
            Some("Garbage 2000 official trailer") => "not json".into_response(),
            _ => Json(json!({"items": []})).into_response(),
        }
    }

    async fn start_mock_video_search() -> (String, Arc<AtomicUsize>, tokio::task::JoinHandle<()>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let router = Router::new().route(
            "/search",
            get({
                let calls = calls.clone();
                move |query| search(calls.clone(), query)
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock video search");
        let addr = listener.local_addr().expect("Failed to get local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock video search failed");
        });

        (format!("http://{}", addr), calls, handle)
    }

    fn locator(base_url: &str, api_key: Option<&str>) -> TrailerLocator {
        TrailerLocator::new(
            reqwest::Client::new(),
            base_url,
            api_key.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_first_video_becomes_embed_url() {
        let (base_url, _calls, handle) = start_mock_video_search().await;

        let trailer = locator(&base_url, Some("test-key"))
            .find_trailer("Inception", 2010)
            .await;
        assert_eq!(
            trailer,
            Some(TrailerReference::new("https://www.youtube.com/embed/YoHD9XEInc0"))
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_custom_embed_base() {
        let (base_url, _calls, handle) = start_mock_video_search().await;

        let trailer = locator(&base_url, Some("test-key"))
            .with_embed_base_url("https://player.example/embed/")
            .find_trailer("Inception", 2010)
            .await
            .expect("trailer expected");
        assert_eq!(trailer.embed_url, "https://player.example/embed/YoHD9XEInc0");

        handle.abort();
    }

    #[tokio::test]
    async fn test_empty_result_is_none() {
        let (base_url, _calls, handle) = start_mock_video_search().await;

        let trailer = locator(&base_url, Some("test-key"))
            .find_trailer("Unknown Film", 1901)
            .await;
        assert_eq!(trailer, None);

        handle.abort();
    }

    #[tokio::test]
    async fn test_quota_rejection_is_none() {
        let (base_url, _calls, handle) = start_mock_video_search().await;
        let locator = locator(&base_url, Some("test-key"));

        assert!(matches!(
            locator.try_find_trailer("Quota", 2000).await,
            Err(TrailerError::Rejected { status: 403 })
        ));
        assert_eq!(locator.find_trailer("Quota", 2000).await, None);

        handle.abort();
    }

    #[tokio::test]
    async fn test_undecodable_body_is_none() {
        let (base_url, _calls, handle) = start_mock_video_search().await;

        let trailer = locator(&base_url, Some("test-key"))
            .find_trailer("Garbage", 2000)
            .await;
        assert_eq!(trailer, None);

        handle.abort();
    }

    #[tokio::test]
    async fn test_unreachable_service_is_none() {
        let (base_url, _calls, handle) = start_mock_video_search().await;
        handle.abort();
        let _ = handle.await;

        let trailer = locator(&base_url, Some("test-key"))
            .find_trailer("Inception", 2010)
            .await;
        assert_eq!(trailer, None);
    }

    #[tokio::test]
    async fn test_failure_messages_never_contain_key() {
        let (base_url, _calls, handle) = start_mock_video_search().await;

        // Undecodable body from a live service
        let err = locator(&base_url, Some("test-key"))
            .try_find_trailer("Garbage", 2000)
            .await
            .unwrap_err();
        assert!(matches!(err, TrailerError::Request(_)));
        assert!(!err.to_string().contains("test-key"), "leaked: {err}");

        handle.abort();
        let _ = handle.await;

        // Connection refused
        let err = locator(&base_url, Some("SECRET-KEY-123"))
            .try_find_trailer("Inception", 2010)
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("SECRET-KEY-123"), "leaked: {err}");
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"), "leaked: {err:?}");
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let (base_url, calls, handle) = start_mock_video_search().await;

        for key in [None, Some(""), Some("   ")] {
            let locator = locator(&base_url, key);
            assert!(!locator.is_enabled());
            assert_eq!(locator.find_trailer("Inception", 2010).await, None);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0, "no request without a key");

        handle.abort();
    }

    #[test]
    fn test_debug_redacts_key() {
        let locator = locator("http://localhost", Some("secret-key"));
        let rendered = format!("{:?}", locator);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
