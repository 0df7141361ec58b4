//! In-memory seen-job store
//!
//! Used by `--test` runs and by tests. Lives only as long as the process.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use super::SeenJobRepository;

#[derive(Debug, Default)]
pub struct InMemorySeenJobs {
    seen: Mutex<HashSet<String>>,
}

impl InMemorySeenJobs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panic while holding the lock cannot leave the set half-updated
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
impl InMemorySeenJobs {
    /// Creates a store that already holds `urls`
    pub fn with_seen<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seen: Mutex::new(urls.into_iter().map(Into::into).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Recorded URLs in sorted order
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.lock().iter().cloned().collect();
        urls.sort();
        urls
    }
}

#[async_trait]
impl SeenJobRepository for InMemorySeenJobs {
    async fn contains(&self, url: &str) -> Result<bool> {
        Ok(self.lock().contains(url))
    }

    async fn add(&self, url: &str) -> Result<()> {
        self.lock().insert(url.to_string());
        Ok(())
    }

    /// Inserts the whole batch under one lock
    async fn add_all(&self, urls: &[String]) -> Result<()> {
        self.lock().extend(urls.iter().cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_add_then_contains() {
        let store = InMemorySeenJobs::new();
        assert!(store.is_empty());
        assert!(!store.contains("https://x/1").await.unwrap());

        store.add("https://x/1").await.unwrap();
        store.add("https://x/1").await.unwrap();

        assert!(store.contains("https://x/1").await.unwrap());
        assert!(!store.contains("https://x/2").await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_add_all() {
        let store = InMemorySeenJobs::with_seen(["https://x/0"]);
        store
            .add_all(&["https://x/2".to_string(), "https://x/1".to_string()])
            .await
            .unwrap();

        assert_eq!(store.urls(), vec!["https://x/0", "https://x/1", "https://x/2"]);
    }

    #[tokio::test]
    async fn test_add_all_is_visible_as_one_batch() {
        let store = Arc::new(InMemorySeenJobs::new());
        let urls: Vec<String> = (0..50).map(|i| format!("https://x/{}", i)).collect();

        let writer = {
            let store = Arc::clone(&store);
            let urls = urls.clone();
            tokio::spawn(async move { store.add_all(&urls).await })
        };
        let reader = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let len = store.len();
                assert!(len == 0 || len == 50, "observed partial batch of {}", len);
            })
        };

        writer.await.unwrap().unwrap();
        reader.await.unwrap();
        assert_eq!(store.len(), 50);
        assert!(store.contains("https://x/49").await.unwrap());
    }
}
