//! Authentication helpers for the Jira client.
//!
//! These helpers centralize API-key lookup in 1Password and client
//! construction so that every command talks to Jira through the same flow.

use opjira_core::config::DEFAULT_JIRA_CREDENTIAL_NAME;
use opjira_core::url::normalize_base_url;
use opjira_core::{CredentialQuery, CredentialResolver, Error, OpRunner, Result};
use tracing::{debug, info};

use crate::client::{JiraClient, create_jira_client};

/// Connection parameters for a Jira server
#[derive(Clone, PartialEq, Eq)]
pub struct JiraSettings {
  /// Server address; a missing scheme defaults to https
  pub server: String,
  /// Account email used for basic auth
  pub email: String,
  /// API key; looked up in 1Password when absent
  pub api_key: Option<String>,
  /// Name of the 1Password item holding the API key
  pub credential_name: String,
  /// Vault to search, all vaults when absent
  pub vault: Option<String>,
}

impl std::fmt::Debug for JiraSettings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraSettings")
      .field("server", &self.server)
      .field("email", &self.email)
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .field("credential_name", &self.credential_name)
      .field("vault", &self.vault)
      .finish()
  }
}

impl JiraSettings {
  pub fn new(server: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      server: server.into(),
      email: email.into(),
      api_key: None,
      credential_name: DEFAULT_JIRA_CREDENTIAL_NAME.to_string(),
      vault: None,
    }
  }

  /// Use a pre-supplied API key instead of 1Password
  pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
    self.api_key = api_key.filter(|key| !key.is_empty());
    self
  }

  pub fn with_credential_name(mut self, credential_name: impl Into<String>) -> Self {
    self.credential_name = credential_name.into();
    self
  }

  pub fn with_vault(mut self, vault: Option<String>) -> Self {
    self.vault = vault.filter(|vault| !vault.is_empty());
    self
  }
}

/// Retrieve the Jira API key stored in the named 1Password item.
///
/// The key is the item's `credential` field.
pub fn get_jira_api_key<R: OpRunner>(
  resolver: &CredentialResolver<R>,
  credential_name: &str,
  vault: Option<&str>,
) -> Result<String> {
  let query = CredentialQuery::by_name(credential_name, vault).map_err(Error::api_key)?;
  let credentials = resolver.resolve(&query).map_err(Error::api_key)?;
  debug!("Resolved Jira API key from 1Password item '{credential_name}'");

  Ok(credentials.credential)
}

/// Build an authenticated Jira client.
///
/// Any failure, including API-key lookup, is reported as
/// [`Error::Connection`].
pub fn connect<R: OpRunner>(settings: &JiraSettings, resolver: &CredentialResolver<R>) -> Result<JiraClient> {
  try_connect(settings, resolver).map_err(Error::connection)
}

fn try_connect<R: OpRunner>(settings: &JiraSettings, resolver: &CredentialResolver<R>) -> Result<JiraClient> {
  let base_url = normalize_base_url(&settings.server)?;

  let email = settings.email.trim();
  if email.is_empty() {
    return Err(Error::InvalidArguments("Jira account email cannot be empty".to_string()));
  }

  let api_key = match &settings.api_key {
    Some(api_key) => api_key.clone(),
    None => get_jira_api_key(resolver, &settings.credential_name, settings.vault.as_deref())?,
  };

  let client = create_jira_client(&base_url, email, &api_key)?;
  info!("Connected to Jira at {base_url} as {email}");
  Ok(client)
}
