//! S3 range store.
//!
//! Keys map to objects under an optional prefix; slices are fetched with a
//! ranged `GetObject`. Custom endpoints (MinIO, LocalStack, ...) are supported.

use super::{ByteRange, RangeStore};
use crate::{Error, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use bytes::Bytes;

/// S3 range store
pub struct S3RangeStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3RangeStore {
    /// Create a new S3RangeStore.
    ///
    /// # Arguments
    ///
    /// * `bucket` - S3 bucket name
    /// * `prefix` - Key prefix (e.g., "genomes/bins/")
    /// * `region` - Optional AWS region (uses SDK defaults if not specified)
    /// * `endpoint` - Optional custom endpoint URL (for S3-compatible services)
    pub async fn new(
        bucket: String,
        prefix: String,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        let mut config_loader = aws_config::from_env();

        if let Some(region) = region {
            config_loader = config_loader.region(aws_config::Region::new(region));
        }

        let sdk_config = config_loader.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint {
            s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(s3_config.build()),
            bucket,
            prefix,
        }
    }

    /// Construct the S3 object key for a store key.
    fn s3_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            let prefix = self.prefix.trim_end_matches('/');
            format!("{}/{}", prefix, key)
        }
    }
}

#[async_trait]
impl RangeStore for S3RangeStore {
    async fn get_range(&self, key: &str, start: u64, end: u64) -> Result<Bytes> {
        let range = ByteRange::new(start, end);
        if range.is_empty() {
            return Ok(Bytes::new());
        }

        let s3_key = self.s3_key(key);
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&s3_key)
            .range(range.http_header())
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                // Range starts past the end of the object
                if service_error.meta().code() == Some("InvalidRange") {
                    return None;
                }
                Some(Error::FetchFailed(format!(
                    "S3 get_object failed for {}: {}",
                    s3_key, service_error
                )))
            });

        let response = match response {
            Ok(response) => response,
            Err(None) => return Ok(Bytes::new()),
            Err(Some(err)) => return Err(err),
        };

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| Error::FetchFailed(format!("S3 read failed: {}", e)))?;

        Ok(body.into_bytes())
    }
}
