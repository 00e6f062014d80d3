use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seqrange::{
    Config, QueryService,
    config::RangeStoreLocation,
    handlers::{AppState, create_app},
    registry::{BackendLoader, BinnedLoader, FastaDirLoader, SequenceIndexRegistry},
    storage::{LocalRangeStore, RangeStore},
    types::Backend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    anyhow::ensure!(config.bin_size > 0, "--bin-size must be greater than zero");

    let loader: Arc<dyn BackendLoader> = match config.backend {
        Backend::Fasta => Arc::new(FastaDirLoader::new(config.data_dir.clone())),
        Backend::Binned => {
            let location = config.range_store_location()?;
            tracing::info!("Range store: {:?}", location);
            Arc::new(BinnedLoader::new(range_store(location).await?, config.bin_size))
        }
    };

    let registry = SequenceIndexRegistry::new(loader);
    let state = AppState {
        service: QueryService::new(registry, config.max_length),
        backend: config.backend,
    };

    let app = create_app(state, config.cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting seqrange server on {}", addr);
    tracing::info!("Data directory: {:?}", config.data_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn range_store(location: RangeStoreLocation) -> anyhow::Result<Arc<dyn RangeStore>> {
    match location {
        RangeStoreLocation::Local(dir) => Ok(Arc::new(LocalRangeStore::new(dir))),
        #[cfg(feature = "http")]
        RangeStoreLocation::Http(url) => {
            Ok(Arc::new(seqrange::storage::HttpRangeStore::new(url)?))
        }
        #[cfg(feature = "s3")]
        RangeStoreLocation::S3 { bucket, prefix } => Ok(Arc::new(
            seqrange::storage::S3RangeStore::new(bucket, prefix, None, None).await,
        )),
        #[allow(unreachable_patterns)]
        other => anyhow::bail!("range store {:?} needs a feature this build lacks", other),
    }
}
