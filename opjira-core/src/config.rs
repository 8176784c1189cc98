//! # Configuration
//!
//! Environment variable names and defaults. opjira has no configuration file;
//! command-line flags take precedence and fall back to these variables.

use crate::error::{Error, Result};
use crate::url::normalize_base_url;

/// Environment variable storing the Jira host
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Environment variable storing the Jira account email
pub const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";

/// Environment variable overriding the path to the `op` executable
pub const ENV_OP_PATH: &str = "OPJIRA_OP_PATH";

/// Name of the 1Password item holding the Jira API key
pub const DEFAULT_JIRA_CREDENTIAL_NAME: &str = "jira_api_key";

/// Read an environment variable, treating empty values as unset
pub fn env_value(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Resolve the Jira base URL from `$JIRA_HOST`
pub fn resolve_jira_base_url() -> Result<String> {
  match env_value(ENV_JIRA_HOST) {
    Some(host) => normalize_base_url(&host),
    None => Err(Error::InvalidArguments(format!(
      "Jira host environment variable '{ENV_JIRA_HOST}' not set"
    ))),
  }
}
