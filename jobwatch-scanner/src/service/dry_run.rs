//! Dry-run notifier
//!
//! Prints the digest instead of sending it. Reports success so that dry
//! runs still exercise the commit step.

use async_trait::async_trait;
use colored::Colorize;
use jobwatch_core::{Digest, Job};
use tracing::info;

use super::Notifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunNotifier;

impl DryRunNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for DryRunNotifier {
    async fn deliver(&self, jobs: &[Job]) -> bool {
        let digest = Digest::render(jobs);

        info!("Dry run: not sending digest for {} job(s)", jobs.len());
        println!("\n{}", "Email would have contained:".bold());
        println!("{} {}", "Subject:".bold(), digest.subject.cyan());
        println!("{}", digest.body);

        true
    }
}
