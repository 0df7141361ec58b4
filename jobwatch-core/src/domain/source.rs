//! Source configuration types

use serde::{Deserialize, Serialize};

/// Shape of a job-board API, used to pick the adapter for a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Department tree listing (Greenhouse boards API)
    Departments,
    /// Single GraphQL query with a team side table (Ashby job boards)
    Graphql,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Departments => write!(f, "departments"),
            Self::Graphql => write!(f, "graphql"),
        }
    }
}

/// A configured job board
///
/// Immutable once loaded. `organization` is the display name stamped on
/// every job from this source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub endpoint: String,
    pub organization: String,
    /// Hosted board name, for APIs that address boards by slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
}

impl SourceConfig {
    pub fn new(kind: SourceKind, endpoint: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            kind,
            endpoint: endpoint.into(),
            organization: organization.into(),
            board: None,
        }
    }

    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    /// Board slug, falling back to the organization name lower-cased with
    /// whitespace removed
    pub fn board_name(&self) -> String {
        match &self.board {
            Some(board) if !board.trim().is_empty() => board.trim().to_string(),
            _ => self
                .organization
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase(),
        }
    }
}
