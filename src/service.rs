use crate::location::parse_location;
use crate::registry::SequenceIndexRegistry;
use crate::sequence::reverse_complement;
use crate::types::SequenceResult;
use crate::{Error, Result};

/// Answers `(organism, location)` queries
///
/// Parses and validates the location, resolves the organism's backend,
/// fetches the range and reverse-complements reverse-strand results.
#[derive(Clone)]
pub struct QueryService {
    registry: SequenceIndexRegistry,
    max_length: u64,
}

impl QueryService {
    pub fn new(registry: SequenceIndexRegistry, max_length: u64) -> Self {
        Self {
            registry,
            max_length,
        }
    }

    pub fn registry(&self) -> &SequenceIndexRegistry {
        &self.registry
    }

    pub async fn handle(&self, organism: &str, location: &str) -> Result<SequenceResult> {
        self.query(organism, location).await.inspect_err(|e| {
            // Bad input is the caller's problem; anything else points at the data
            if e.is_input_error() {
                tracing::debug!("{} {}: {}", organism, location, e);
            } else {
                tracing::error!("{} {}: {}", organism, location, e);
            }
        })
    }

    async fn query(&self, organism: &str, location: &str) -> Result<SequenceResult> {
        let loc = parse_location(location, self.max_length)?;
        tracing::debug!(
            "{} {}:{}-{} ({:?})",
            organism,
            loc.region,
            loc.start,
            loc.end,
            loc.strand
        );

        let store = self.registry.resolve(organism).await?;
        let seq = store.fetch(&loc.region, loc.start, loc.end).await?;

        if seq.is_empty() {
            return Err(Error::SequenceEmpty(location.to_string()));
        }

        let seq = if loc.strand.is_reverse() {
            reverse_complement(&seq)
        } else {
            seq
        };

        Ok(SequenceResult::dna(location, seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::DEFAULT_MAX_LENGTH;
    use crate::registry::BackendLoader;
    use crate::store::SequenceStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Chr1(&'static str);

    #[async_trait]
    impl SequenceStore for Chr1 {
        async fn fetch(&self, region: &str, start: u64, end: u64) -> Result<String> {
            if region != "chr1" {
                return Err(Error::FetchFailed(format!("sequence not found: {}", region)));
            }
            let len = self.0.len() as u64;
            Ok(self.0[start.min(len) as usize..end.min(len) as usize].to_string())
        }
    }

    struct DemoLoader;

    #[async_trait]
    impl BackendLoader for DemoLoader {
        async fn load(&self, organism: &str) -> Result<Arc<dyn SequenceStore>> {
            match organism {
                "demo" => Ok(Arc::new(Chr1("ACGTACGTAC"))),
                _ => Err(Error::SystemNotFound(organism.to_string())),
            }
        }
    }

    fn service() -> QueryService {
        QueryService::new(
            SequenceIndexRegistry::new(Arc::new(DemoLoader)),
            DEFAULT_MAX_LENGTH,
        )
    }

    #[tokio::test]
    async fn test_forward() {
        let result = service().handle("demo", "chr1:1..4:1").await.unwrap();
        assert_eq!(result, SequenceResult::dna("chr1:1..4:1", "ACGT".to_string()));
    }

    #[tokio::test]
    async fn test_reverse_strand() {
        let result = service().handle("demo", "chr1:1..10:-1").await.unwrap();
        assert_eq!(result.seq, "GTACGTACGT");
        assert_eq!(result.query, "chr1:1..10:-1");
        assert_eq!(result.id, "chr1:1..10:-1");
        assert_eq!(result.molecule, "dna");
    }

    #[tokio::test]
    async fn test_error_kinds() {
        let svc = service();
        let cases = [
            ("demo", "chr1:1-10:1", "malformed-location", true),
            ("demo", "chr1:200..100:1", "inverted-range", true),
            ("demo", "chr1:1..100000001:1", "range-too-large", true),
            ("nope", "chr1:1..10:1", "system-not-found", false),
            ("demo", "chrUn:1..10:1", "fetch-failed", false),
            ("demo", "chr1:50..60:1", "sequence-empty", false),
        ];
        for (organism, location, kind, input) in cases {
            let err = svc.handle(organism, location).await.unwrap_err();
            assert_eq!(err.kind(), kind, "{} {}", organism, location);
            assert_eq!(err.is_input_error(), input, "{} {}", organism, location);
        }
    }

    #[tokio::test]
    async fn test_input_errors_skip_resolution() {
        let svc = service();
        svc.handle("demo", "garbage").await.unwrap_err();
        assert!(!svc.registry().contains("demo"));
    }
}
