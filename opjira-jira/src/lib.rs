//! # Jira API Client
//!
//! Provides Jira REST API access for opjira: building an authenticated client
//! from a 1Password-stored API key and reading project metadata.

pub mod auth;
mod client;
pub mod consts;
mod endpoints;
pub mod models;
pub mod project;

// Re-export the client
pub use auth::{JiraSettings, connect, get_jira_api_key};
pub use client::{JiraClient, create_jira_client};
// Re-export models
pub use models::{JiraAuth, JiraProject, JiraUser};
pub use project::{ProjectRecord, fetch_project};
