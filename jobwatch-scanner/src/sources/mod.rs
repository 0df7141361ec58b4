//! Source layer
//!
//! Adapters fetch one job board each and normalize its postings into the
//! canonical `Job`. Every adapter shares the same failure policy: a source
//! that cannot be fetched or parsed contributes no jobs and never aborts
//! the scan of the other sources.

mod departments;
mod graphql;
mod registry;

pub use departments::DepartmentsAdapter;
pub use graphql::JobBoardAdapter;
pub use registry::SourceRegistry;

use anyhow::Result;
use async_trait::async_trait;
use jobwatch_core::{Job, SourceConfig};
use tracing::warn;

/// Fetches and normalizes postings from one kind of job board
///
/// Adapters hold no state between scans.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fetches the source and normalizes every posting
    ///
    /// # Arguments
    /// * `source` - Endpoint and organization label of the board
    async fn try_fetch(&self, source: &SourceConfig) -> Result<Vec<Job>>;

    /// Fetches the source, logging any failure and returning no jobs
    async fn fetch(&self, source: &SourceConfig) -> Vec<Job> {
        match self.try_fetch(source).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!(
                    "Failed to fetch jobs for {} ({} source at {}): {:#}",
                    source.organization, source.kind, source.endpoint, e
                );
                Vec::new()
            }
        }
    }
}

/// Returns the trimmed value when it is present and not blank
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobwatch_core::SourceKind;

    struct FailingAdapter;

    #[async_trait]
    impl SourceAdapter for FailingAdapter {
        async fn try_fetch(&self, _source: &SourceConfig) -> Result<Vec<Job>> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_fetch_swallows_errors() {
        let source = SourceConfig::new(SourceKind::Departments, "http://localhost:1", "Acme");
        assert!(FailingAdapter.fetch(&source).await.is_empty());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  NYC ")), Some("NYC"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
