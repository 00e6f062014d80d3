use crate::location::DEFAULT_MAX_LENGTH;
use crate::store::DEFAULT_BIN_SIZE;
use crate::types::Backend;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(name = "seqrange")]
#[command(about = "Indexed genomic sequence range server")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "SEQRANGE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SEQRANGE_PORT", default_value = "8888")]
    pub port: u16,

    /// Directory holding <organism>/dna/*.dna.toplevel.fa.gz
    #[arg(long, env = "SEQRANGE_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Retrieval backend
    #[arg(long, env = "SEQRANGE_BACKEND", value_enum, default_value = "fasta")]
    pub backend: Backend,

    /// Range store for the binned backend: a directory, http(s):// URL or s3://bucket/prefix
    #[arg(long, env = "SEQRANGE_RANGE_STORE")]
    pub range_store: Option<String>,

    /// Bin width of the binned backend, in bases
    #[arg(long, env = "SEQRANGE_BIN_SIZE", default_value_t = DEFAULT_BIN_SIZE)]
    pub bin_size: u64,

    /// Longest sequence a single query may request
    #[arg(long, env = "SEQRANGE_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: u64,

    /// Enable CORS for all origins
    #[arg(long, env = "SEQRANGE_CORS", default_value = "true")]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// Where the binned backend reads its bins from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeStoreLocation {
    Local(PathBuf),
    Http(String),
    S3 { bucket: String, prefix: String },
}

impl Config {
    /// Range store location, defaulting to the data directory.
    pub fn range_store_location(&self) -> anyhow::Result<RangeStoreLocation> {
        let Some(location) = self.range_store.as_deref() else {
            return Ok(RangeStoreLocation::Local(self.data_dir.clone()));
        };

        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                Ok(RangeStoreLocation::Http(location.to_string()))
            }
            Ok(url) if url.scheme() == "s3" => {
                let bucket = url
                    .host_str()
                    .filter(|b| !b.is_empty())
                    .ok_or_else(|| anyhow::anyhow!("missing bucket in {}", location))?
                    .to_string();
                let prefix = url.path().trim_start_matches('/').to_string();
                Ok(RangeStoreLocation::S3 { bucket, prefix })
            }
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(RangeStoreLocation::Local)
                .map_err(|_| anyhow::anyhow!("invalid file URL: {}", location)),
            Ok(url) if url.scheme().len() > 1 => {
                anyhow::bail!("unsupported range store scheme: {}", url.scheme())
            }
            // Plain paths, including Windows drive letters
            _ => Ok(RangeStoreLocation::Local(PathBuf::from(location))),
        }
    }
}
