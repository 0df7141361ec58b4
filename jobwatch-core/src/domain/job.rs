//! Job domain types

use serde::{Deserialize, Serialize};

/// Location name used when a posting does not specify one
pub const DEFAULT_LOCATION: &str = "Remote";

/// Canonical job posting
///
/// Every source adapter normalizes its API's records into this shape.
/// `absolute_url` is the identity of a posting: it is stable across scans
/// and is the key recorded in the seen-job store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub content: Option<String>,
    pub location: Location,
    pub updated_at: String,
    pub absolute_url: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION)
    }
}

impl Job {
    /// Creates a job with only the required fields set
    ///
    /// Location defaults to "Remote" and the timestamp to the current time.
    pub fn new(
        title: impl Into<String>,
        absolute_url: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: None,
            location: Location::default(),
            updated_at: chrono::Utc::now().to_rfc3339(),
            absolute_url: absolute_url.into(),
            company: company.into(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_location(mut self, name: impl Into<String>) -> Self {
        self.location = Location::new(name);
        self
    }

    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = updated_at.into();
        self
    }

    /// Key under which this job is recorded as seen
    pub fn key(&self) -> &str {
        &self.absolute_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_defaults() {
        let job = Job::new("Research Engineer", "https://x/1", "Anthropic");
        assert_eq!(job.location.name, "Remote");
        assert!(job.content.is_none());
        assert!(chrono::DateTime::parse_from_rfc3339(&job.updated_at).is_ok());
        assert_eq!(job.key(), "https://x/1");
    }

    #[test]
    fn test_job_serializes_location_as_object() {
        let job = Job::new("Recruiter", "https://x/2", "Anthropic").with_location("London");
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["location"]["name"], "London");
        assert_eq!(value["company"], "Anthropic");
    }
}
