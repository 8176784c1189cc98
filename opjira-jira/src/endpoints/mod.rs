//! # Jira API Endpoints
//!
//! Endpoint implementations for the Jira resources opjira reads: projects and
//! the authenticated user.

pub mod projects;
pub mod users;
