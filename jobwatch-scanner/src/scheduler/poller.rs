//! Scan poller
//!
//! Runs scan cycles on a fixed interval until shutdown. Cycles run one
//! after another, so two cycles of the same process never overlap.

use std::future::Future;
use std::sync::Arc;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{error, info};

use super::scanner::{CycleOutcome, Scanner};

pub struct ScanPoller {
    scanner: Arc<Scanner>,
    interval: Duration,
}

impl ScanPoller {
    pub fn new(scanner: Arc<Scanner>, interval: Duration) -> Self {
        Self { scanner, interval }
    }

    /// Starts the polling loop, stopping on Ctrl-C
    pub async fn run(&self) -> usize {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Runs cycles until `shutdown` completes
    ///
    /// A failed cycle is logged and the loop continues. Returns the number of
    /// cycles started.
    pub async fn run_until<F>(&self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        info!("Starting scan poller (interval: {:?})", self.interval);

        tokio::pin!(shutdown);
        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cycles = 0;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping scan poller");
                    break;
                }
                _ = interval.tick() => {}
            }

            cycles += 1;
            match self.scanner.run_cycle().await {
                Ok(report) => {
                    info!(
                        "Cycle {} finished: {} fetched, {} matched, {} new",
                        report.cycle_id,
                        report.fetched,
                        report.matched,
                        report.new_jobs.len()
                    );
                    if let CycleOutcome::Delivered { committed } = report.outcome {
                        info!("Cycle {} reported {} job(s)", report.cycle_id, committed);
                    }
                }
                Err(e) => {
                    error!("Error during scan cycle: {:#}", e);
                }
            }
        }

        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemorySeenJobs;
    use crate::scheduler::scanner::tests::{RecordingNotifier, StaticAdapter, source};
    use crate::sources::SourceRegistry;
    use jobwatch_core::{Job, KeywordFilter};

    #[tokio::test(start_paused = true)]
    async fn test_repeated_cycles_notify_once() {
        let registry = SourceRegistry::new().with_source(
            source("anthropic"),
            Arc::new(StaticAdapter(vec![Job::new(
                "Research Engineer",
                "https://x/1",
                "Anthropic",
            )])),
        );
        let store = Arc::new(InMemorySeenJobs::new());
        let notifier = Arc::new(RecordingNotifier::new(true));
        let scanner = Scanner::new(
            registry,
            KeywordFilter::new(["engineer"]),
            store.clone(),
            notifier.clone(),
        );

        let poller = ScanPoller::new(Arc::new(scanner), Duration::from_secs(60));
        let cycles = poller
            .run_until(time::sleep(Duration::from_secs(60 * 4 + 30)))
            .await;

        assert_eq!(cycles, 5);
        assert_eq!(notifier.batches().len(), 1);
        assert_eq!(store.urls(), vec!["https://x/1"]);
    }
}
