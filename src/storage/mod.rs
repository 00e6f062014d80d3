//! Range-addressable key-value stores backing the binned sequence layout.
//!
//! Each value is a flat run of bases stored under a key such as
//! `sorghum_bicolor:chr1:0`. A [`RangeStore`] returns a slice of one value
//! without transferring the rest, so the binned backend can serve a small
//! query out of a 100 Mb bin.
//!
//! # Implementations
//!
//! - [`LocalRangeStore`] - one flat file per key in a directory
//! - [`HttpRangeStore`] - objects behind an HTTP server supporting `Range` (feature `http`)
//! - [`S3RangeStore`] - objects in an S3 bucket (feature `s3`)
//!
//! # Example
//!
//! ```no_run
//! use seqrange::storage::{LocalRangeStore, RangeStore};
//!
//! # async fn run() -> seqrange::Result<()> {
//! let store = LocalRangeStore::new("./bins".into());
//! let bases = store.get_range("demo:chr1:0", 0, 10).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod http;
mod local;
#[cfg(feature = "s3")]
mod s3;

#[cfg(feature = "http")]
pub use http::HttpRangeStore;
pub use local::LocalRangeStore;
#[cfg(feature = "s3")]
pub use s3::S3RangeStore;

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Half-open byte range `[start, end)` within a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of an HTTP `Range` header, which is inclusive on both ends.
    ///
    /// Only meaningful for non-empty ranges.
    pub fn http_header(&self) -> String {
        format!("bytes={}-{}", self.start, self.end - 1)
    }
}

/// Store of flat values addressable by key and byte range
#[async_trait]
pub trait RangeStore: Send + Sync {
    /// Read `[start, end)` of the value under `key`.
    ///
    /// The range is clipped to the value's length. A missing key is an error
    /// ([`Error::FetchFailed`](crate::Error::FetchFailed)), not an empty result.
    async fn get_range(&self, key: &str, start: u64, end: u64) -> Result<Bytes>;
}
