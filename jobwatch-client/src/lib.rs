//! Jobwatch HTTP Client
//!
//! A small, type-safe HTTP client for the public job-board APIs the scanner
//! polls. Each board family has its own module with its wire types:
//! - `greenhouse`: department tree listing
//! - `ashby`: GraphQL job board with a team side table
//!
//! # Example
//!
//! ```no_run
//! use jobwatch_client::BoardClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> jobwatch_client::Result<()> {
//!     let client = BoardClient::new(Duration::from_secs(30))?;
//!     let departments = client
//!         .fetch_departments("https://boards-api.greenhouse.io/v1/boards/anthropic")
//!         .await?;
//!     println!("{} departments", departments.len());
//!     Ok(())
//! }
//! ```

pub mod ashby;
pub mod error;
pub mod greenhouse;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client shared by every board adapter
///
/// Cheap to clone; the underlying reqwest client pools connections.
#[derive(Debug, Clone)]
pub struct BoardClient {
    client: Client,
}

impl BoardClient {
    /// Create a client whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jobwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

fn trim_endpoint(endpoint: &str) -> &str {
    endpoint.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(BoardClient::new(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_trim_endpoint() {
        assert_eq!(
            trim_endpoint("https://boards-api.greenhouse.io/v1/boards/anthropic/"),
            "https://boards-api.greenhouse.io/v1/boards/anthropic"
        );
        assert_eq!(trim_endpoint("http://localhost:8080"), "http://localhost:8080");
    }
}
