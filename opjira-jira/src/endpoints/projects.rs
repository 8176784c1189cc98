//! # Jira Project Endpoints
//!
//! Jira API endpoint implementations for project lookups.

use opjira_core::{Error, Result};

use crate::client::JiraClient;
use crate::models::JiraProject;

impl JiraClient {
  /// Get a Jira project by key or id
  pub async fn get_project(&self, project_id: &str) -> Result<JiraProject> {
    let project_id = project_id.trim();
    if !is_project_identifier(project_id) {
      return Err(Error::InvalidArguments(format!("Invalid Jira project identifier: '{project_id}'")));
    }

    let request = self.get(&format!("/project/{project_id}"));
    self
      .fetch_json(request, &format!("Project {project_id} not found"))
      .await
  }
}

/// Project keys and numeric ids only, so the id stays a single path segment
fn is_project_identifier(project_id: &str) -> bool {
  !project_id.is_empty()
    && project_id
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
