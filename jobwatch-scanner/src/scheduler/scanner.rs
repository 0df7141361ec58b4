//! Scan cycle
//!
//! One cycle fetches every source, keeps jobs whose title matches the
//! keywords and whose URL is not in the seen-job store, delivers the
//! remaining batch as one digest, and only then records the batch as seen.
//! A failed delivery leaves the store untouched, so the same jobs are
//! offered again on the next cycle.

use anyhow::{Context, Result};
use jobwatch_core::{Job, KeywordFilter};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::repository::SeenJobRepository;
use crate::service::Notifier;
use crate::sources::SourceRegistry;

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing new; no notification, no store writes
    NoNewJobs,
    /// Batch delivered and recorded as seen
    Delivered { committed: usize },
    /// Delivery failed; nothing recorded
    DeliveryFailed,
}

/// Summary of one scan cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    /// Jobs returned by all sources
    pub fetched: usize,
    /// Jobs whose title matched the keywords
    pub matched: usize,
    /// The batch offered to the notifier
    pub new_jobs: Vec<Job>,
    pub outcome: CycleOutcome,
}

pub struct Scanner {
    sources: SourceRegistry,
    filter: KeywordFilter,
    store: Arc<dyn SeenJobRepository>,
    notifier: Arc<dyn Notifier>,
}

impl Scanner {
    pub fn new(
        sources: SourceRegistry,
        filter: KeywordFilter,
        store: Arc<dyn SeenJobRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            sources,
            filter,
            store,
            notifier,
        }
    }

    /// Runs one scan cycle
    ///
    /// Source and delivery failures are contained. Only a seen-job store
    /// failure is returned as an error.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let cycle_id = Uuid::new_v4();
        self.scan(cycle_id)
            .instrument(info_span!("scan_cycle", %cycle_id))
            .await
    }

    async fn scan(&self, cycle_id: Uuid) -> Result<CycleReport> {
        info!(
            "Starting job scan at {} ({} source(s))",
            chrono::Utc::now().to_rfc3339(),
            self.sources.len()
        );

        if self.sources.is_empty() {
            warn!("No sources configured");
        }

        let jobs = self.collect().await;
        let fetched = jobs.len();

        let (matched, new_jobs) = self.select_new(jobs).await?;

        let outcome = if new_jobs.is_empty() {
            info!("No new matching jobs found");
            CycleOutcome::NoNewJobs
        } else if self.deliver(&new_jobs).await {
            let committed = self.commit(&new_jobs).await?;
            info!("Found and reported {} new job(s)", committed);
            CycleOutcome::Delivered { committed }
        } else {
            warn!(
                "Delivery failed; {} job(s) left unmarked for the next scan",
                new_jobs.len()
            );
            CycleOutcome::DeliveryFailed
        };

        Ok(CycleReport {
            cycle_id,
            fetched,
            matched,
            new_jobs,
            outcome,
        })
    }

    /// Fetches every source in registry order
    async fn collect(&self) -> Vec<Job> {
        let mut all_jobs = Vec::new();

        for source in self.sources.iter() {
            let jobs = source.adapter.fetch(&source.config).await;
            debug!(
                "{} ({}) returned {} job(s)",
                source.config.organization,
                source.config.kind,
                jobs.len()
            );
            all_jobs.extend(jobs);
        }

        all_jobs
    }

    /// Keeps matching jobs that were not notified before
    ///
    /// Returns the number of keyword matches and the new batch, in fetch
    /// order. A URL listed twice in one cycle appears once in the batch.
    async fn select_new(&self, jobs: Vec<Job>) -> Result<(usize, Vec<Job>)> {
        let mut matched = 0;
        let mut batch_urls = HashSet::new();
        let mut new_jobs = Vec::new();

        for job in jobs {
            if !self.filter.matches(&job.title) {
                continue;
            }
            matched += 1;

            if batch_urls.contains(job.key()) {
                continue;
            }

            let seen = self
                .store
                .contains(job.key())
                .await
                .with_context(|| format!("Failed to check seen state of {}", job.key()))?;
            if seen {
                continue;
            }

            batch_urls.insert(job.key().to_string());
            new_jobs.push(job);
        }

        Ok((matched, new_jobs))
    }

    async fn deliver(&self, batch: &[Job]) -> bool {
        info!("Delivering digest for {} new job(s)", batch.len());
        self.notifier.deliver(batch).await
    }

    /// Records the whole delivered batch as seen
    async fn commit(&self, batch: &[Job]) -> Result<usize> {
        let urls: Vec<String> = batch.iter().map(|job| job.key().to_string()).collect();
        self.store
            .add_all(&urls)
            .await
            .context("Failed to record delivered jobs as seen")?;
        Ok(urls.len())
    }
}
