//! GraphQL job board endpoint (Ashby hosted job boards)
//!
//! A single `ApiJobBoardWithTeams` query returns every posting of a board
//! plus the board's teams, which postings reference by id.

use crate::error::{ClientError, Result};
use crate::{BoardClient, trim_endpoint};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

/// Public URL under which hosted job boards serve postings
pub const JOB_BOARD_BASE_URL: &str = "https://jobs.ashbyhq.com";

const OPERATION_NAME: &str = "ApiJobBoardWithTeams";

const JOB_BOARD_QUERY: &str = r#"query ApiJobBoardWithTeams($organizationHostedJobsPageName: String!) {
  jobBoard: jobBoardWithTeams(organizationHostedJobsPageName: $organizationHostedJobsPageName) {
    teams {
      id
      name
      parentTeamId
    }
    jobPostings {
      id
      title
      teamId
      locationId
      locationName
      employmentType
      secondaryLocations {
        locationId
        locationName
      }
      compensationTierSummary
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobBoardData {
    job_board: Option<JobBoard>,
}

/// Postings of one board with its team side table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoard {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub job_postings: Vec<JobPosting>,
}

impl JobBoard {
    /// Team id to team name
    pub fn team_names(&self) -> HashMap<&str, &str> {
        self.teams
            .iter()
            .map(|t| (t.id.as_str(), t.name.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_team_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub secondary_locations: Option<Vec<SecondaryLocation>>,
    #[serde(default)]
    pub compensation_tier_summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryLocation {
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
}

impl BoardClient {
    /// Run the job board query against a GraphQL endpoint
    ///
    /// # Arguments
    /// * `endpoint` - GraphQL URL (e.g. "https://jobs.ashbyhq.com/api/non-user-graphql")
    /// * `board` - Hosted job board name (e.g. "openai")
    pub async fn fetch_job_board(&self, endpoint: &str, board: &str) -> Result<JobBoard> {
        let url = trim_endpoint(endpoint);
        debug!("POST {} ({} for board {})", url, OPERATION_NAME, board);

        let payload = json!({
            "operationName": OPERATION_NAME,
            "variables": { "organizationHostedJobsPageName": board },
            "query": JOB_BOARD_QUERY,
        });

        let response = self
            .client
            .post(url)
            .query(&[("op", OPERATION_NAME)])
            .json(&payload)
            .send()
            .await?;
        let body: GraphQlResponse<JobBoardData> = self.handle_response(response).await?;

        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ClientError::GraphQl(message));
        }

        body.data
            .and_then(|d| d.job_board)
            .ok_or_else(|| ClientError::MissingData(format!("no job board named '{}'", board)))
    }
}
