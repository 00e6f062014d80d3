//! HTTP/HTTPS range store.
//!
//! Each key is fetched as `<base_url>/<key>` with a `Range` header, so only the
//! requested slice of a bin crosses the network. Servers that ignore `Range`
//! and answer `200` with the whole value are tolerated; the slice is cut
//! locally in that case.

use super::{ByteRange, RangeStore};
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};

/// HTTP/HTTPS range store
pub struct HttpRangeStore {
    client: Client,
    base_url: String,
}

impl HttpRangeStore {
    /// Create a new HttpRangeStore.
    ///
    /// # Arguments
    ///
    /// * `base_url` - URL prefix under which keys are served (e.g., "https://example.com/bins/")
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::FetchFailed(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Construct the URL for a key.
    fn key_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl RangeStore for HttpRangeStore {
    async fn get_range(&self, key: &str, start: u64, end: u64) -> Result<Bytes> {
        let range = ByteRange::new(start, end);
        if range.is_empty() {
            return Ok(Bytes::new());
        }

        let url = self.key_url(key);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::RANGE, range.http_header())
            .send()
            .await
            .map_err(|e| Error::FetchFailed(format!("HTTP GET request failed: {}", e)))?;

        let status = response.status();
        match status {
            // Range starts past the end of the value
            StatusCode::RANGE_NOT_SATISFIABLE => return Ok(Bytes::new()),
            StatusCode::OK | StatusCode::PARTIAL_CONTENT => {}
            _ => {
                return Err(Error::FetchFailed(format!(
                    "{} returned status {}",
                    url, status
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::FetchFailed(format!("failed to read HTTP response: {}", e)))?;

        if status == StatusCode::OK {
            let len = bytes.len() as u64;
            return Ok(bytes.slice(range.start.min(len) as usize..range.end.min(len) as usize));
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_url() {
        let store = HttpRangeStore::new("https://example.com/bins/".to_string()).unwrap();
        assert_eq!(
            store.key_url("demo:chr1:0"),
            "https://example.com/bins/demo:chr1:0"
        );
    }

    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::response::{IntoResponse, Response};
    use axum::{Router, routing::get};

    const VALUE: &str = "ACGTACGTAC";

    /// `/<mode>/<key>`: `whole` ignores Range, `ranged` honours it, `past`
    /// rejects it, anything else is not found
    async fn serve_bin(Path((mode, _key)): Path<(String, String)>, headers: HeaderMap) -> Response {
        match mode.as_str() {
            "whole" => (AxumStatus::OK, VALUE).into_response(),
            "ranged" => {
                let range = headers
                    .get("range")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix("bytes="))
                    .and_then(|v| v.split_once('-'))
                    .and_then(|(s, e)| Some((s.parse::<usize>().ok()?, e.parse::<usize>().ok()?)));
                match range {
                    Some((s, e)) => {
                        let e = (e + 1).min(VALUE.len());
                        (AxumStatus::PARTIAL_CONTENT, VALUE[s..e].to_string()).into_response()
                    }
                    None => AxumStatus::BAD_REQUEST.into_response(),
                }
            }
            "past" => AxumStatus::RANGE_NOT_SATISFIABLE.into_response(),
            _ => AxumStatus::NOT_FOUND.into_response(),
        }
    }

    async fn spawn_bin_server() -> String {
        let app = Router::new().route("/:mode/:key", get(serve_bin));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn store(base: &str, mode: &str) -> HttpRangeStore {
        HttpRangeStore::new(format!("{}/{}", base, mode)).unwrap()
    }

    #[tokio::test]
    async fn test_partial_content_passes_through() {
        let base = spawn_bin_server().await;
        let bytes = store(&base, "ranged").get_range("demo:chr1:0", 2, 5).await.unwrap();
        assert_eq!(bytes.as_ref(), b"GTA");
    }

    #[tokio::test]
    async fn test_full_response_is_sliced_locally() {
        let base = spawn_bin_server().await;
        let store = store(&base, "whole");
        assert_eq!(store.get_range("demo:chr1:0", 2, 5).await.unwrap().as_ref(), b"GTA");
        // Clipped to the value length
        assert_eq!(store.get_range("demo:chr1:0", 6, 50).await.unwrap().as_ref(), b"GTAC");
        assert!(store.get_range("demo:chr1:0", 20, 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_range_not_satisfiable_is_empty() {
        let base = spawn_bin_server().await;
        let bytes = store(&base, "past").get_range("demo:chr1:0", 20, 50).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_fails() {
        let base = spawn_bin_server().await;
        let err = store(&base, "gone").get_range("demo:chr1:0", 0, 5).await.unwrap_err();
        assert_eq!(err.kind(), "fetch-failed");
        assert!(err.to_string().contains("404"), "{}", err);
    }

    #[tokio::test]
    async fn test_empty_range_skips_request() {
        // Unroutable host: any request would fail
        let store = HttpRangeStore::new("http://127.0.0.1:1".to_string()).unwrap();
        let bytes = store.get_range("demo:chr1:0", 10, 10).await.unwrap();
        assert!(bytes.is_empty());
    }
}
