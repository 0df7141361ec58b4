//! Service layer
//!
//! Notifiers turn a batch of new jobs into one digest and deliver it. The
//! scan pipeline only commits the batch as seen when delivery reports
//! success, so a notifier must report failures instead of raising them.

mod dry_run;
mod email;

pub use dry_run::DryRunNotifier;
pub use email::EmailNotifier;

use async_trait::async_trait;
use jobwatch_core::Job;

/// Service trait for delivering new-job digests
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one digest covering every job in `jobs`
    ///
    /// # Returns
    /// `true` when the digest was delivered (or intentionally only displayed)
    async fn deliver(&self, jobs: &[Job]) -> bool;
}
