//! Repository layer
//!
//! The seen-job store records the URL of every job that has been notified.
//! It only needs set membership and insertion, so the durable Redis set and
//! the in-memory stand-in are interchangeable behind one trait.

mod memory;
mod redis_set;

pub use memory::InMemorySeenJobs;
pub use redis_set::{DEFAULT_SEEN_JOBS_KEY, RedisSeenJobs};

use anyhow::Result;
use async_trait::async_trait;

/// Repository trait for the set of already-notified job URLs
///
/// Entries are never removed.
#[async_trait]
pub trait SeenJobRepository: Send + Sync {
    /// Checks whether a job URL was already notified
    async fn contains(&self, url: &str) -> Result<bool>;

    /// Records a job URL as notified
    async fn add(&self, url: &str) -> Result<()>;

    /// Records several job URLs as notified
    ///
    /// Backends that can insert the whole batch in one command should
    /// override this.
    async fn add_all(&self, urls: &[String]) -> Result<()> {
        for url in urls {
            self.add(url).await?;
        }
        Ok(())
    }
}
