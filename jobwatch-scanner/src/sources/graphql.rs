//! GraphQL job board adapter
//!
//! The board returns postings that reference teams by id and carry no
//! description, URL or timestamp, so each posting is rebuilt into a `Job`:
//! content is synthesized from team, compensation and employment type, and
//! the URL is templated from the board name and posting id.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jobwatch_client::BoardClient;
use jobwatch_client::ashby::{JOB_BOARD_BASE_URL, JobPosting};
use jobwatch_core::domain::job::DEFAULT_LOCATION;
use jobwatch_core::{Job, SourceConfig};
use std::collections::HashMap;
use tracing::{debug, info};

use super::{SourceAdapter, non_blank};

const NOT_SPECIFIED: &str = "Not specified";
const UNKNOWN_TEAM: &str = "Unknown team";

pub struct JobBoardAdapter {
    client: BoardClient,
    /// Base of the public posting URLs
    job_base_url: String,
}

impl JobBoardAdapter {
    pub fn new(client: BoardClient) -> Self {
        Self::with_job_base_url(client, JOB_BOARD_BASE_URL)
    }

    pub fn with_job_base_url(client: BoardClient, job_base_url: impl Into<String>) -> Self {
        Self {
            client,
            job_base_url: job_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn posting_url(&self, board: &str, posting_id: &str) -> String {
        format!("{}/{}/{}", self.job_base_url, board, posting_id)
    }

    fn normalize(
        &self,
        posting: &JobPosting,
        teams: &HashMap<&str, &str>,
        board: &str,
        organization: &str,
    ) -> Option<Job> {
        let (Some(title), Some(id)) = (
            non_blank(posting.title.as_deref()),
            non_blank(Some(posting.id.as_str())),
        ) else {
            debug!("Skipping posting {:?} without title or id", posting.id);
            return None;
        };

        let team = posting
            .team_id
            .as_deref()
            .and_then(|id| teams.get(id).copied())
            .unwrap_or(UNKNOWN_TEAM);
        let compensation =
            non_blank(posting.compensation_tier_summary.as_deref()).unwrap_or(NOT_SPECIFIED);
        let employment = non_blank(posting.employment_type.as_deref()).unwrap_or(NOT_SPECIFIED);

        let content = format!(
            "Team: {}\nCompensation: {}\nEmployment type: {}",
            team, compensation, employment
        );

        Some(
            Job::new(title, self.posting_url(board, id), organization)
                .with_location(location_name(posting))
                .with_content(content),
        )
    }
}

/// Primary location, "Remote" when absent, with a count of secondary locations
fn location_name(posting: &JobPosting) -> String {
    let primary = non_blank(posting.location_name.as_deref()).unwrap_or(DEFAULT_LOCATION);
    let others = posting.secondary_locations.as_ref().map_or(0, Vec::len);

    if others > 0 {
        format!("{} + {} other locations", primary, others)
    } else {
        primary.to_string()
    }
}

#[async_trait]
impl SourceAdapter for JobBoardAdapter {
    async fn try_fetch(&self, source: &SourceConfig) -> Result<Vec<Job>> {
        let board = source.board_name();
        let job_board = self
            .client
            .fetch_job_board(&source.endpoint, &board)
            .await
            .with_context(|| format!("Failed to query job board '{}' at {}", board, source.endpoint))?;

        let teams = job_board.team_names();
        let jobs: Vec<Job> = job_board
            .job_postings
            .iter()
            .filter_map(|posting| self.normalize(posting, &teams, &board, &source.organization))
            .collect();

        info!(
            "Fetched {} job(s) across {} team(s) of {}",
            jobs.len(),
            teams.len(),
            source.organization
        );

        Ok(jobs)
    }
}
