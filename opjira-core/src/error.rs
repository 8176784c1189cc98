//! # Errors
//!
//! A single error type shared by every opjira crate. Each variant carries a
//! human-readable message; the wrapping variants (`Connection`, `Retrieval`,
//! `ApiKey`) keep the text of the underlying cause.

use thiserror::Error;

/// Errors produced while resolving credentials or talking to Jira
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("{0}")]
  InvalidArguments(String),

  #[error("{0}")]
  MissingDependency(String),

  #[error("Not signed in to 1Password CLI. Please run 'op signin' first.")]
  NotSignedIn,

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  MalformedOutput(String),

  #[error("{0}")]
  MissingField(String),

  #[error("1Password CLI error: {0}")]
  Cli(String),

  #[error("{0}")]
  Upstream(String),

  #[error("Failed to retrieve Jira API key: {cause}")]
  ApiKey { cause: Box<Error> },

  #[error("Failed to connect to Jira: {cause}")]
  Connection { cause: Box<Error> },

  #[error("Failed to retrieve Jira {resource}: {cause}")]
  Retrieval { resource: String, cause: Box<Error> },
}

/// Result alias used across the workspace
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Wrap an error as an API-key lookup failure
  pub fn api_key(cause: Error) -> Self {
    Self::ApiKey { cause: Box::new(cause) }
  }

  /// Wrap an error as a connection failure
  pub fn connection(cause: Error) -> Self {
    Self::Connection { cause: Box::new(cause) }
  }

  /// Wrap an error as a retrieval failure for the named resource
  pub fn retrieval(resource: impl Into<String>, cause: Error) -> Self {
    Self::Retrieval {
      resource: resource.into(),
      cause: Box::new(cause),
    }
  }

  /// The innermost error, looking through the wrapping variants
  pub fn root(&self) -> &Error {
    match self {
      Self::ApiKey { cause } | Self::Connection { cause } | Self::Retrieval { cause, .. } => cause.root(),
      other => other,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_wrapped_messages_keep_cause() {
    let err = Error::connection(Error::NotSignedIn);
    assert_eq!(
      err.to_string(),
      "Failed to connect to Jira: Not signed in to 1Password CLI. Please run 'op signin' first."
    );

    let err = Error::retrieval("project 'PROJ'", Error::Upstream("connection refused".to_string()));
    assert_eq!(err.to_string(), "Failed to retrieve Jira project 'PROJ': connection refused");
  }

  #[test]
  fn test_root_looks_through_wrappers() {
    let err = Error::retrieval("project 'PROJ'", Error::connection(Error::api_key(Error::NotSignedIn)));
    assert_eq!(err.root(), &Error::NotSignedIn);

    let err = Error::NotFound("gone".to_string());
    assert_eq!(err.root(), &err);
  }

  #[test]
  fn test_plain_variants_display_message_verbatim() {
    let err = Error::NotFound("No credentials found for username: u1".to_string());
    assert_eq!(err.to_string(), "No credentials found for username: u1");

    let err = Error::Cli("[ERROR] something broke".to_string());
    assert!(err.to_string().starts_with("1Password CLI error:"));
  }
}
