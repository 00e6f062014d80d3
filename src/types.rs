use serde::{Deserialize, Serialize};

/// Strand orientation of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    pub fn is_reverse(&self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

/// Validated query range, 0-based half-open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicLocation {
    pub region: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}

impl GenomicLocation {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Successful query response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceResult {
    pub molecule: String,
    pub query: String,
    pub id: String,
    pub seq: String,
}

impl SequenceResult {
    pub fn dna(location: &str, seq: String) -> Self {
        Self {
            molecule: "dna".to_string(),
            query: location.to_string(),
            id: location.to_string(),
            seq,
        }
    }
}

/// Retrieval backend used for every organism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// BGZF-compressed FASTA with .fai/.gzi sidecars
    #[default]
    Fasta,
    /// Fixed-size bins in a range-addressable store
    Binned,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub backend: Backend,
}
