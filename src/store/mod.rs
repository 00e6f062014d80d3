//! Random-access sequence retrieval.
//!
//! A [`SequenceStore`] returns the bases of `region` in the 0-based half-open
//! range `[start, end)`. Two interchangeable implementations exist:
//!
//! - [`BlockIndexedStore`] - BGZF-compressed FASTA read through its `.fai`
//!   and `.gzi` sidecars, decompressing only the blocks that hold the range
//! - [`BinnedKeyValueStore`] - chromosomes pre-split into fixed-size bins in a
//!   [`RangeStore`](crate::storage::RangeStore), one ranged read per bin
//!
//! Both clip `end` to the data that exists and fail with
//! [`Error::FetchFailed`](crate::Error::FetchFailed) for unknown regions.

mod binned;
mod fasta;

pub use binned::{BinnedKeyValueStore, DEFAULT_BIN_SIZE};
pub use fasta::BlockIndexedStore;

use crate::Result;
use async_trait::async_trait;

/// Retrieval backend for one organism
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Fetch the bases of `region` in `[start, end)`.
    async fn fetch(&self, region: &str, start: u64, end: u64) -> Result<String>;
}
