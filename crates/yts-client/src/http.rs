//! Shared GET plumbing for the YTS endpoints.

use tracing::debug;

use crate::error::HttpError;

/// Longest slice of an error response body kept in the error message
const MAX_ERROR_BODY_CHARS: usize = 256;

/// A [`reqwest::Client`] bound to one YTS API base URL.
///
/// Timeouts and the user agent are whatever the caller configured on the
/// `reqwest::Client`; this type only builds URLs and checks statuses.
#[derive(Debug, Clone)]
pub(crate) struct YtsHttp {
    client: reqwest::Client,
    base_url: String,
}

impl YtsHttp {
    /// * `base_url` - API root, e.g. `https://yts.mx/api/v2`
    pub(crate) fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base_url}/{endpoint}` and return the body of a 2xx response.
    ///
    /// Bodies are returned as text so each client decides what a
    /// malformed payload means for it.
    pub(crate) async fn get_text(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<String, HttpError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, HttpError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map(|body| truncate_body(&body))
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}
