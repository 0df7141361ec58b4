//! Department tree endpoint (Greenhouse boards API)
//!
//! `GET {endpoint}/departments` returns every department of a board with its
//! open jobs. Departments may nest child departments, which carry their own
//! jobs.

use crate::error::Result;
use crate::{BoardClient, trim_endpoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentsResponse {
    #[serde(default)]
    pub departments: Vec<Department>,
}

/// A department node
///
/// `jobs` and `children` are frequently `null` in real responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub jobs: Option<Vec<BoardJob>>,
    #[serde(default)]
    pub children: Option<Vec<Department>>,
}

impl Department {
    /// All jobs of this department and its descendants, depth first
    pub fn flatten_jobs(&self) -> Vec<&BoardJob> {
        let mut jobs = Vec::new();
        self.collect_jobs(&mut jobs);
        jobs
    }

    fn collect_jobs<'a>(&'a self, out: &mut Vec<&'a BoardJob>) {
        if let Some(jobs) = &self.jobs {
            out.extend(jobs.iter());
        }
        if let Some(children) = &self.children {
            for child in children {
                child.collect_jobs(out);
            }
        }
    }
}

/// A job record as listed under a department
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardJob {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub location: Option<BoardLocation>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub absolute_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardLocation {
    #[serde(default)]
    pub name: Option<String>,
}

impl BoardClient {
    /// Fetch the department tree of a board
    ///
    /// # Arguments
    /// * `endpoint` - Board base URL (e.g. "https://boards-api.greenhouse.io/v1/boards/anthropic")
    pub async fn fetch_departments(&self, endpoint: &str) -> Result<Vec<Department>> {
        let url = format!("{}/departments", trim_endpoint(endpoint));
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let body: DepartmentsResponse = self.handle_response(response).await?;

        Ok(body.departments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn job(id: u64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "location": {"name": "San Francisco, CA"},
            "updated_at": "2024-05-01T10:00:00-04:00",
            "absolute_url": format!("https://boards.greenhouse.io/acme/jobs/{}", id),
        })
    }

    #[test]
    fn test_flatten_nested_departments() {
        let dept: Department = serde_json::from_value(json!({
            "id": 1,
            "name": "Engineering",
            "jobs": [job(1, "Backend Engineer")],
            "children": [
                {"id": 2, "name": "Infra", "jobs": [job(2, "SRE")], "children": [
                    {"id": 3, "name": "Storage", "jobs": [job(3, "Storage Engineer")], "children": null}
                ]},
                {"id": 4, "name": "Empty", "jobs": null}
            ]
        }))
        .unwrap();

        let titles: Vec<_> = dept
            .flatten_jobs()
            .iter()
            .filter_map(|j| j.title.as_deref())
            .collect();
        assert_eq!(titles, vec!["Backend Engineer", "SRE", "Storage Engineer"]);
    }

    #[tokio::test]
    async fn test_fetch_departments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/boards/acme/departments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "departments": [
                    {"id": 1, "name": "Engineering", "jobs": [job(10, "Engineer")], "children": []},
                    {"id": 2, "name": "No Department", "jobs": []}
                ]
            })))
            .mount(&server)
            .await;

        let client = BoardClient::new(Duration::from_secs(5)).unwrap();
        let endpoint = format!("{}/v1/boards/acme/", server.uri());
        let departments = client.fetch_departments(&endpoint).await.unwrap();

        assert_eq!(departments.len(), 2);
        assert_eq!(departments[0].name.as_deref(), Some("Engineering"));
        assert_eq!(departments[0].flatten_jobs().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_departments_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/departments"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = BoardClient::new(Duration::from_secs(5)).unwrap();
        let err = client.fetch_departments(&server.uri()).await.unwrap_err();

        assert!(err.is_server_error());
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_fetch_departments_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/departments"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = BoardClient::new(Duration::from_secs(5)).unwrap();
        let err = client.fetch_departments(&server.uri()).await.unwrap_err();

        assert!(matches!(err, ClientError::ParseError(_)));
    }
}
