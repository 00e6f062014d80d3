use super::{ByteRange, RangeStore};
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Flat files in a directory, one per key
pub struct LocalRangeStore {
    data_dir: PathBuf,
}

impl LocalRangeStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn make_file_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(Error::FetchFailed(format!("invalid key: {}", key)));
        }
        Ok(self.data_dir.join(key))
    }
}

#[async_trait]
impl RangeStore for LocalRangeStore {
    async fn get_range(&self, key: &str, start: u64, end: u64) -> Result<Bytes> {
        let path = self.make_file_path(key)?;
        let mut file = fs::File::open(&path)
            .await
            .map_err(|_| Error::FetchFailed(format!("no such key: {}", key)))?;

        let size = file
            .metadata()
            .await
            .map_err(|e| Error::FetchFailed(format!("failed to stat {}: {}", key, e)))?
            .len();

        let range = ByteRange::new(start.min(size), end.min(size));
        if range.is_empty() {
            return Ok(Bytes::new());
        }

        file.seek(std::io::SeekFrom::Start(range.start))
            .await
            .map_err(|e| Error::FetchFailed(format!("failed to seek in {}: {}", key, e)))?;

        let mut buf = vec![0u8; range.len() as usize];
        file.read_exact(&mut buf)
            .await
            .map_err(|e| Error::FetchFailed(format!("failed to read {}: {}", key, e)))?;

        Ok(Bytes::from(buf))
    }
}
