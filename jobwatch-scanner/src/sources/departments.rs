//! Department tree adapter
//!
//! Flattens every department and its descendants into one job list. The
//! records already carry the canonical fields; the adapter only stamps the
//! organization label and fills defaults.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jobwatch_client::BoardClient;
use jobwatch_client::greenhouse::BoardJob;
use jobwatch_core::{Job, SourceConfig};
use tracing::{debug, info};

use super::{SourceAdapter, non_blank};

pub struct DepartmentsAdapter {
    client: BoardClient,
}

impl DepartmentsAdapter {
    pub fn new(client: BoardClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceAdapter for DepartmentsAdapter {
    async fn try_fetch(&self, source: &SourceConfig) -> Result<Vec<Job>> {
        let departments = self
            .client
            .fetch_departments(&source.endpoint)
            .await
            .with_context(|| format!("Failed to fetch departments from {}", source.endpoint))?;

        let jobs: Vec<Job> = departments
            .iter()
            .flat_map(|dept| dept.flatten_jobs())
            .filter_map(|raw| normalize(raw, &source.organization))
            .collect();

        info!(
            "Fetched {} job(s) from {} department(s) of {}",
            jobs.len(),
            departments.len(),
            source.organization
        );

        Ok(jobs)
    }
}

fn normalize(raw: &BoardJob, organization: &str) -> Option<Job> {
    let (Some(title), Some(url)) = (
        non_blank(raw.title.as_deref()),
        non_blank(raw.absolute_url.as_deref()),
    ) else {
        debug!("Skipping job {:?} without title or URL", raw.id);
        return None;
    };

    let mut job = Job::new(title, url, organization);
    if let Some(location) = non_blank(raw.location.as_ref().and_then(|l| l.name.as_deref())) {
        job = job.with_location(location);
    }
    if let Some(updated_at) = non_blank(raw.updated_at.as_deref()) {
        job = job.with_updated_at(updated_at);
    }
    job.content = raw.content.clone();

    Some(job)
}
