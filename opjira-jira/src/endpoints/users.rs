use opjira_core::Result;

use crate::client::JiraClient;
use crate::models::JiraUser;

impl JiraClient {
  /// Get the user the client is authenticated as
  pub async fn get_myself(&self) -> Result<JiraUser> {
    self.fetch_json(self.get("/myself"), "Current user not found").await
  }
}
