//! Constants for the opjira Jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("opjira/", env!("CARGO_PKG_VERSION"));

/// Path prefix of the Jira REST API
pub const API_PREFIX: &str = "/rest/api/2";
