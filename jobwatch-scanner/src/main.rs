//! Jobwatch Scanner
//!
//! Polls job-board APIs, keeps postings whose titles match the configured
//! keywords, and emails a digest of postings that were not notified before.
//!
//! Architecture:
//! - Configuration: run mode from flags, credentials from the environment
//! - Sources: one adapter per board API shape, normalizing into `Job`
//! - Repositories: the seen-job set (Redis, or in memory for tests)
//! - Services: digest delivery (email, or printed for dry runs)
//! - Scheduler: the scan cycle and the watch-mode polling loop
//!
//! Jobs are recorded as seen only after their digest was delivered, so a
//! failed delivery is retried on the next scan.

mod config;
mod repository;
mod scheduler;
mod service;
mod sources;

use anyhow::{Context, Result};
use clap::Parser;
use jobwatch_client::BoardClient;
use jobwatch_core::KeywordFilter;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ScannerConfig};
use crate::repository::{InMemorySeenJobs, RedisSeenJobs, SeenJobRepository};
use crate::scheduler::{CycleOutcome, ScanPoller, Scanner};
use crate::service::{DryRunNotifier, EmailNotifier, Notifier};
use crate::sources::SourceRegistry;

/// Log directives used when RUST_LOG is unset; the binary's target is `jobwatch`
const DEFAULT_LOG_FILTER: &str = "jobwatch=info,jobwatch_client=info";

#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(about = "Job board scanner", long_about = None)]
struct Cli {
    /// Run in test mode (no Redis, no emails)
    #[arg(long)]
    test: bool,

    /// Skip sending emails but use Redis
    #[arg(long)]
    no_email: bool,

    /// Keywords to filter job titles (case insensitive)
    #[arg(long, num_args = 1.., default_value = "engineer")]
    title_keywords: Vec<String>,

    /// JSON file listing the job boards to scan
    #[arg(long, env = "JOBWATCH_SOURCES")]
    sources: Option<PathBuf>,

    /// Keep running and scan every N seconds
    #[arg(long, env = "JOBWATCH_INTERVAL")]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = load_config(cli)?;
    info!(
        "Loaded configuration: {} source(s), redis={}, emails={}, keywords={:?}",
        config.sources.len(),
        config.scanner.use_redis,
        config.scanner.send_emails,
        config.scanner.title_keywords
    );

    let scanner = build_scanner(&config).await?;

    match config.interval {
        Some(interval) => {
            let poller = ScanPoller::new(Arc::new(scanner), interval);
            let cycles = poller.run().await;
            info!("Scan poller stopped after {} cycle(s)", cycles);
        }
        None => {
            let report = scanner.run_cycle().await?;
            info!(
                "Scan {} finished: {} fetched, {} matched, {} new",
                report.cycle_id,
                report.fetched,
                report.matched,
                report.new_jobs.len()
            );
            if report.outcome == CycleOutcome::DeliveryFailed {
                info!("{} job(s) will be retried on the next run", report.new_jobs.len());
            }
        }
    }

    Ok(())
}

/// Builds and validates configuration from flags and environment
fn load_config(cli: Cli) -> Result<Config> {
    let scanner = ScannerConfig::from_flags(cli.test, cli.no_email, cli.title_keywords);

    let sources = match &cli.sources {
        Some(path) => config::load_sources(path)?,
        None => config::default_sources(),
    };

    let config = Config::from_env(scanner, sources)
        .with_interval(cli.interval.map(Duration::from_secs));
    config.validate()?;

    Ok(config)
}

/// Wires sources, store and notifier for the configured run mode
async fn build_scanner(config: &Config) -> Result<Scanner> {
    let client = BoardClient::new(config.http_timeout).context("Failed to build HTTP client")?;
    let registry = SourceRegistry::from_configs(config.sources.clone(), client);

    let store: Arc<dyn SeenJobRepository> = if config.scanner.use_redis {
        let redis_url = config
            .redis_url
            .as_deref()
            .context("REDISCLOUD_URL is not set")?;
        Arc::new(RedisSeenJobs::connect(redis_url, config.seen_jobs_key.clone()).await?)
    } else {
        info!("Using in-memory seen-job store for testing");
        Arc::new(InMemorySeenJobs::new())
    };

    let notifier: Arc<dyn Notifier> = if config.scanner.send_emails {
        Arc::new(EmailNotifier::new(&config.email)?)
    } else {
        Arc::new(DryRunNotifier::new())
    };

    Ok(Scanner::new(
        registry,
        KeywordFilter::new(&config.scanner.title_keywords),
        store,
        notifier,
    ))
}
