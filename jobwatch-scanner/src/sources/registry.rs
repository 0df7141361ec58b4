//! Source registry
//!
//! Ordered list of configured boards, each paired with the adapter for its
//! kind. Adapter selection happens once, when the registry is built.

use jobwatch_client::BoardClient;
use jobwatch_core::{SourceConfig, SourceKind};
use std::sync::Arc;

use super::{DepartmentsAdapter, JobBoardAdapter, SourceAdapter};

/// A configured board and the adapter that reads it
#[derive(Clone)]
pub struct RegisteredSource {
    pub config: SourceConfig,
    pub adapter: Arc<dyn SourceAdapter>,
}

#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<RegisteredSource>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry using the standard adapter for each source kind
    ///
    /// All adapters share one HTTP client.
    pub fn from_configs(configs: Vec<SourceConfig>, client: BoardClient) -> Self {
        let departments: Arc<dyn SourceAdapter> = Arc::new(DepartmentsAdapter::new(client.clone()));
        let graphql: Arc<dyn SourceAdapter> = Arc::new(JobBoardAdapter::new(client));

        configs.into_iter().fold(Self::new(), |registry, config| {
            let adapter = match config.kind {
                SourceKind::Departments => Arc::clone(&departments),
                SourceKind::Graphql => Arc::clone(&graphql),
            };
            registry.with_source(config, adapter)
        })
    }

    /// Appends a source, keeping registration order
    pub fn with_source(mut self, config: SourceConfig, adapter: Arc<dyn SourceAdapter>) -> Self {
        self.sources.push(RegisteredSource { config, adapter });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_registry_keeps_order() {
        let client = BoardClient::new(Duration::from_secs(5)).unwrap();
        let registry = SourceRegistry::from_configs(
            vec![
                SourceConfig::new(SourceKind::Graphql, "https://a.example/graphql", "A"),
                SourceConfig::new(SourceKind::Departments, "https://b.example/boards/b", "B"),
                SourceConfig::new(SourceKind::Graphql, "https://c.example/graphql", "C"),
            ],
            client,
        );

        let orgs: Vec<_> = registry.iter().map(|s| s.config.organization.as_str()).collect();
        assert_eq!(orgs, vec!["A", "B", "C"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(SourceRegistry::new().is_empty());
    }
}
