use super::SequenceStore;
use crate::{Error, Result};
use async_trait::async_trait;
use noodles::bgzf::{self, gzi};
use noodles::core::{Position, Region};
use noodles::fasta::{self, fai};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Idle readers kept per store
const MAX_IDLE_READERS: usize = 8;

type Reader = fasta::io::IndexedReader<bgzf::IndexedReader<File>>;

/// BGZF-compressed FASTA with `.fai` and `.gzi` sidecars
///
/// Both indexes are parsed once when the store is opened. Fetches run on the
/// blocking pool, each with a reader of its own; readers are returned to a
/// small pool afterwards, so a store serves any number of concurrent queries
/// without rebuilding a reader per request.
pub struct BlockIndexedStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    fai: fai::Index,
    gzi: gzi::Index,
    lengths: HashMap<String, u64>,
    readers: Mutex<Vec<Reader>>,
}

impl BlockIndexedStore {
    /// Open `path` with its `<path>.fai` and `<path>.gzi` sidecars.
    pub async fn open(path: PathBuf) -> io::Result<Self> {
        let fai_path = push_ext(&path, "fai");
        let gzi_path = push_ext(&path, "gzi");

        // Index parsing is synchronous
        let (fai, gzi) = tokio::task::spawn_blocking(move || -> io::Result<_> {
            let fai = fai::read(&fai_path)?;
            let gzi = gzi::read(&gzi_path)?;
            Ok((fai, gzi))
        })
        .await
        .map_err(io::Error::other)??;

        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("sequence file not found: {}", path.display()),
            ));
        }

        let lengths = fai
            .as_ref()
            .iter()
            .map(|r| (String::from_utf8_lossy(r.name()).into_owned(), r.length()))
            .collect();

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                fai,
                gzi,
                lengths,
                readers: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Length in bases of `region`, if the index knows it.
    pub fn contig_length(&self, region: &str) -> Option<u64> {
        self.inner.lengths.get(region).copied()
    }

    #[cfg(test)]
    fn idle_readers(&self) -> usize {
        self.inner.readers.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl SequenceStore for BlockIndexedStore {
    async fn fetch(&self, region: &str, start: u64, end: u64) -> Result<String> {
        let length = self
            .contig_length(region)
            .ok_or_else(|| Error::FetchFailed(format!("sequence not found: {}", region)))?;

        // Overlong requests are clipped to the contig, like a slice
        let end = end.min(length);
        if start >= end {
            return Ok(String::new());
        }

        let inner = self.inner.clone();
        let name = region.to_string();

        let bases = tokio::task::spawn_blocking(move || inner.read_bases(name, start, end))
            .await
            .map_err(|e| Error::FetchFailed(format!("sequence read task failed: {}", e)))?
            .map_err(|e| {
                Error::FetchFailed(format!("failed to read {}:{}-{}: {}", region, start, end, e))
            })?;

        String::from_utf8(bases)
            .map_err(|e| Error::FetchFailed(format!("sequence is not valid text: {}", e)))
    }
}

impl Inner {
    fn checkout(&self) -> io::Result<Reader> {
        if let Some(reader) = self.readers.lock().ok().and_then(|mut r| r.pop()) {
            return Ok(reader);
        }

        let file = File::open(&self.path)?;
        Ok(fasta::io::IndexedReader::new(
            bgzf::IndexedReader::new(file, self.gzi.clone()),
            self.fai.clone(),
        ))
    }

    fn checkin(&self, reader: Reader) {
        if let Ok(mut readers) = self.readers.lock() {
            if readers.len() < MAX_IDLE_READERS {
                readers.push(reader);
            }
        }
    }

    /// Read `[start, end)` of `name`; the range must already be clipped and non-empty.
    fn read_bases(&self, name: String, start: u64, end: u64) -> io::Result<Vec<u8>> {
        // noodles uses 1-based closed intervals
        let start = Position::try_from(start as usize + 1).map_err(io::Error::other)?;
        let end = Position::try_from(end as usize).map_err(io::Error::other)?;
        let region = Region::new(name, start..=end);

        let mut reader = self.checkout()?;
        let record = reader.query(&region)?;
        // A reader that failed mid-query is dropped rather than reused
        self.checkin(reader);

        Ok(record.sequence().as_ref().to_vec())
    }
}

fn push_ext(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}
