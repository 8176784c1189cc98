use std::fmt;

use serde::Deserialize;

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub email: String,
  pub api_token: String,
}

impl fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("JiraAuth")
      .field("email", &self.email)
      .field("api_token", &"<redacted>")
      .finish()
  }
}

/// Represents a Jira user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  #[serde(default)]
  pub account_id: Option<String>,
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub email_address: Option<String>,
}

/// Represents a Jira project.
///
/// Every attribute is optional; Jira omits or nulls fields depending on the
/// project type and the caller's permissions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraProject {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub key: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub lead: Option<JiraUser>,
  /// Canonical REST URL of the project
  #[serde(default, rename = "self")]
  pub self_url: Option<String>,
  #[serde(default)]
  pub project_type_key: Option<String>,
  #[serde(default)]
  pub archived: Option<bool>,
  #[serde(default)]
  pub is_private: Option<bool>,
  #[serde(default)]
  pub simplified: Option<bool>,
}
