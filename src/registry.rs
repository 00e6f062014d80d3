//! Per-organism backend registry.
//!
//! The registry maps an organism identifier to the [`SequenceStore`] serving
//! it. Entries are built lazily by a [`BackendLoader`] on the first request
//! for that organism and then kept for the registry's lifetime; nothing is
//! evicted. Concurrent first requests for the same organism wait on a single
//! load, so at most one backend is ever constructed per organism. A failed
//! load is not cached, so installing the data later and retrying works.
//!
//! [`SequenceIndexRegistry::invalidate`] and
//! [`SequenceIndexRegistry::invalidate_all`] drop cached entries; the next
//! request reloads them.

use crate::storage::RangeStore;
use crate::store::{BinnedKeyValueStore, BlockIndexedStore, SequenceStore};
use crate::{Error, Result};
use async_trait::async_trait;
use moka::future::Cache;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File-name suffix of whole-genome BGZF FASTA files
pub const FASTA_SUFFIX: &str = ".dna.toplevel.fa.gz";

/// Builds the backend for an organism
#[async_trait]
pub trait BackendLoader: Send + Sync {
    /// Construct a backend, or fail with [`Error::SystemNotFound`].
    async fn load(&self, organism: &str) -> Result<Arc<dyn SequenceStore>>;
}

/// Discovers `<data_dir>/<organism>/dna/*.dna.toplevel.fa.gz`
pub struct FastaDirLoader {
    data_dir: PathBuf,
}

impl FastaDirLoader {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory searched for `organism`, or `None` for identifiers that would
    /// leave the data directory.
    fn organism_dir(&self, organism: &str) -> Option<PathBuf> {
        if organism.is_empty()
            || organism == "."
            || organism.contains('/')
            || organism.contains('\\')
            || organism.contains("..")
        {
            return None;
        }
        Some(self.data_dir.join(organism).join("dna"))
    }

    /// Find the first file in `dir` ending with [`FASTA_SUFFIX`].
    async fn find_toplevel_fasta(dir: &Path) -> std::io::Result<Option<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().ends_with(FASTA_SUFFIX) {
                found.push(entry.path());
            }
        }
        // read_dir order is platform-dependent
        found.sort();
        Ok(found.into_iter().next())
    }
}

#[async_trait]
impl BackendLoader for FastaDirLoader {
    async fn load(&self, organism: &str) -> Result<Arc<dyn SequenceStore>> {
        let not_found = || Error::SystemNotFound(organism.to_string());

        let dir = self.organism_dir(organism).ok_or_else(not_found)?;

        let path = match Self::find_toplevel_fasta(&dir).await {
            Ok(Some(path)) => path,
            Ok(None) => {
                tracing::warn!("no *{} file in {:?}", FASTA_SUFFIX, dir);
                return Err(not_found());
            }
            Err(e) => {
                tracing::warn!("error reading directory {:?}: {}", dir, e);
                return Err(not_found());
            }
        };

        let store = BlockIndexedStore::open(path.clone()).await.map_err(|e| {
            tracing::warn!("failed to open sequence index {:?}: {}", path, e);
            not_found()
        })?;

        tracing::info!("opened sequence index for {}: {:?}", organism, path);
        Ok(Arc::new(store))
    }
}

/// Serves every organism from one shared range store
pub struct BinnedLoader {
    store: Arc<dyn RangeStore>,
    bin_size: u64,
}

impl BinnedLoader {
    pub fn new(store: Arc<dyn RangeStore>, bin_size: u64) -> Self {
        Self { store, bin_size }
    }
}

#[async_trait]
impl BackendLoader for BinnedLoader {
    async fn load(&self, organism: &str) -> Result<Arc<dyn SequenceStore>> {
        tracing::info!("binned backend for {} (bin size {})", organism, self.bin_size);
        Ok(Arc::new(BinnedKeyValueStore::new(
            organism.to_string(),
            self.store.clone(),
            self.bin_size,
        )))
    }
}

/// Organism to backend cache with coalesced construction
#[derive(Clone)]
pub struct SequenceIndexRegistry {
    loader: Arc<dyn BackendLoader>,
    cache: Cache<String, Arc<dyn SequenceStore>>,
}

impl SequenceIndexRegistry {
    pub fn new(loader: Arc<dyn BackendLoader>) -> Self {
        // No capacity or TTL: entries live until invalidated
        let cache = Cache::builder().build();
        Self { loader, cache }
    }

    /// Backend for `organism`, loading it on first use.
    pub async fn resolve(&self, organism: &str) -> Result<Arc<dyn SequenceStore>> {
        self.cache
            .try_get_with_by_ref(organism, self.loader.load(organism))
            .await
            .map_err(|e: Arc<Error>| (*e).clone())
    }

    pub fn contains(&self, organism: &str) -> bool {
        self.cache.contains_key(organism)
    }

    /// Drop the cached backend for `organism`.
    pub async fn invalidate(&self, organism: &str) {
        self.cache.invalidate(organism).await;
    }

    /// Drop every cached backend.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}
