//! # Credential Resolution
//!
//! Looks up credentials stored in 1Password by shelling out to the local `op`
//! CLI. An item is found either by its name or by the username stored in it,
//! optionally scoped to a single vault, and reduced to a [`Credentials`]
//! record holding its `username` and `credential` fields.

pub mod op;

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use self::op::{OpCli, OpItem, OpOutput, OpRunner};
use crate::error::{Error, Result};

/// Field label holding the account name
pub const USERNAME_LABEL: &str = "username";

/// Field label holding the secret
pub const CREDENTIAL_LABEL: &str = "credential";

/// Represents credentials for a service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub credential: String,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("credential", &"<redacted>")
      .finish()
  }
}

/// How an item is located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKey {
  /// Literal item name, looked up with `op item get`
  Name(String),
  /// Stored username, looked up with `op item search`
  Username(String),
}

impl SearchKey {
  /// Human-readable kind of key, used in error messages
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Name(_) => "credential name",
      Self::Username(_) => "username",
    }
  }

  /// The value being searched for
  pub fn value(&self) -> &str {
    match self {
      Self::Name(value) | Self::Username(value) => value,
    }
  }
}

impl fmt::Display for SearchKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.kind(), self.value())
  }
}

/// A validated credential lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialQuery {
  key: SearchKey,
  vault: Option<String>,
}

impl CredentialQuery {
  /// Build a query from optional name and username.
  ///
  /// Exactly one of `name` and `username` must be given; empty strings count
  /// as missing.
  pub fn new(name: Option<&str>, username: Option<&str>, vault: Option<&str>) -> Result<Self> {
    let name = name.filter(|value| !value.is_empty());
    let username = username.filter(|value| !value.is_empty());

    let key = match (name, username) {
      (Some(name), None) => SearchKey::Name(name.to_string()),
      (None, Some(username)) => SearchKey::Username(username.to_string()),
      (None, None) => {
        return Err(Error::InvalidArguments(
          "Either username or credential name must be provided".to_string(),
        ));
      }
      (Some(_), Some(_)) => {
        return Err(Error::InvalidArguments(
          "Provide either username or credential name, not both".to_string(),
        ));
      }
    };

    Ok(Self::from_key(key, vault))
  }

  /// Look up an item by its name
  pub fn by_name(name: &str, vault: Option<&str>) -> Result<Self> {
    Self::new(Some(name), None, vault)
  }

  /// Look up an item by the username stored in it
  pub fn by_username(username: &str, vault: Option<&str>) -> Result<Self> {
    Self::new(None, Some(username), vault)
  }

  fn from_key(key: SearchKey, vault: Option<&str>) -> Self {
    Self {
      key,
      vault: vault.filter(|value| !value.is_empty()).map(str::to_string),
    }
  }

  pub fn key(&self) -> &SearchKey {
    &self.key
  }

  pub fn vault(&self) -> Option<&str> {
    self.vault.as_deref()
  }

  /// Arguments for the `op` lookup command
  fn op_args(&self) -> Vec<String> {
    let mut args: Vec<String> = match &self.key {
      SearchKey::Name(name) => vec!["item".into(), "get".into(), name.clone()],
      SearchKey::Username(username) => vec!["item".into(), "search".into(), format!("username:{username}")],
    };
    args.extend(["--format".to_string(), "json".to_string()]);
    if let Some(vault) = &self.vault {
      args.extend(["--vault".to_string(), vault.clone()]);
    }
    args
  }
}

/// Resolves credentials through an [`OpRunner`]
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver<R = OpCli> {
  runner: R,
}

impl CredentialResolver<OpCli> {
  /// Resolver backed by the `op` binary named by the environment
  pub fn from_env() -> Self {
    Self::new(OpCli::from_env())
  }
}

impl<R: OpRunner> CredentialResolver<R> {
  pub fn new(runner: R) -> Self {
    Self { runner }
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  /// Fetch the credentials matching `query`
  pub fn resolve(&self, query: &CredentialQuery) -> Result<Credentials> {
    self.ensure_cli_available()?;

    let args = query.op_args();
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    debug!("Looking up 1Password item by {}", query.key());

    let output = self
      .runner
      .run(&arg_refs)
      .map_err(|e| Error::Cli(format!("failed to run op: {e}")))?;
    if !output.success {
      return Err(classify_failure(&output, query.key()));
    }

    let items = parse_items(&output.stdout)?;
    if items.len() > 1 {
      debug!("{} items matched {}; using the first", items.len(), query.key());
    }
    let Some(item) = items.into_iter().next() else {
      return Err(Error::NotFound(format!("No credentials found for {}", query.key())));
    };

    extract_credentials(&item)
  }

  /// Probe `op --version`
  fn ensure_cli_available(&self) -> Result<()> {
    let missing = || Error::MissingDependency("1Password CLI (op) is not installed or not in PATH".to_string());

    match self.runner.run(&["--version"]) {
      Ok(output) if output.success => {
        debug!("Found 1Password CLI version {}", output.stdout.trim());
        Ok(())
      }
      Ok(output) => {
        warn!("1Password CLI version probe failed: {}", output.stderr.trim());
        Err(missing())
      }
      Err(e) => {
        debug!("Unable to spawn 1Password CLI: {e}");
        Err(missing())
      }
    }
  }
}

/// Resolve credentials with the default `op` binary.
///
/// Validation of the search key happens before any process is spawned.
pub fn get_credential(name: Option<&str>, username: Option<&str>, vault: Option<&str>) -> Result<Credentials> {
  let query = CredentialQuery::new(name, username, vault)?;
  CredentialResolver::from_env().resolve(&query)
}

/// Map a failed lookup to the matching error
fn classify_failure(output: &OpOutput, key: &SearchKey) -> Error {
  let stderr = output.stderr.trim();
  let lowered = stderr.to_ascii_lowercase();

  if lowered.contains("not signed in") || lowered.contains("not currently signed in") {
    Error::NotSignedIn
  } else if lowered.contains("isn't an item") || lowered.contains("no item found") {
    Error::NotFound(format!("No credentials found for {key}"))
  } else {
    Error::Cli(stderr.to_string())
  }
}

/// Parse `op` JSON output into a list of items, wrapping a single object
fn parse_items(stdout: &str) -> Result<Vec<OpItem>> {
  let malformed = || Error::MalformedOutput("Failed to parse 1Password CLI output".to_string());

  let parsed: Value = serde_json::from_str(stdout).map_err(|_| malformed())?;
  let values = match parsed {
    Value::Array(values) => values,
    object @ Value::Object(_) => vec![object],
    _ => return Err(malformed()),
  };

  values
    .into_iter()
    .map(|value| serde_json::from_value::<OpItem>(value).map_err(|_| malformed()))
    .collect()
}

/// Pull the username and credential fields out of an item
fn extract_credentials(item: &OpItem) -> Result<Credentials> {
  let mut username = String::new();
  let mut credential = String::new();

  for field in &item.fields {
    let value = field.value.clone().unwrap_or_default();
    if field.has_label(USERNAME_LABEL) {
      username = value;
    } else if field.has_label(CREDENTIAL_LABEL) {
      credential = value;
    }
  }

  if username.is_empty() || credential.is_empty() {
    return Err(Error::MissingField(
      "Username or credential not found in the credential item".to_string(),
    ));
  }

  Ok(Credentials { username, credential })
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::collections::VecDeque;
  use std::io;

  use super::*;

  /// Scripted stand-in for the `op` binary
  #[derive(Default)]
  struct FakeOp {
    responses: RefCell<VecDeque<io::Result<OpOutput>>>,
    calls: RefCell<Vec<Vec<String>>>,
  }

  impl FakeOp {
    fn new(responses: Vec<io::Result<OpOutput>>) -> Self {
      Self {
        responses: RefCell::new(responses.into()),
        calls: RefCell::default(),
      }
    }

    /// Version probe succeeds, lookup prints `stdout`
    fn returning(stdout: &str) -> Self {
      Self::new(vec![Ok(OpOutput::ok("2.30.0\n")), Ok(OpOutput::ok(stdout))])
    }

    fn calls(&self) -> Vec<Vec<String>> {
      self.calls.borrow().clone()
    }
  }

  impl OpRunner for FakeOp {
    fn run(&self, args: &[&str]) -> io::Result<OpOutput> {
      self
        .calls
        .borrow_mut()
        .push(args.iter().map(|arg| arg.to_string()).collect());
      self
        .responses
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Ok(OpOutput::failed("unexpected call")))
    }
  }

  #[test]
  fn test_neither_key_is_invalid_before_any_call() {
    let fake = FakeOp::returning("[]");
    let resolver = CredentialResolver::new(&fake);

    for (name, username) in [(None, None), (Some(""), Some(""))] {
      let result = CredentialQuery::new(name, username, Some("Work")).and_then(|query| resolver.resolve(&query));
      assert!(matches!(result, Err(Error::InvalidArguments(_))));
    }
    assert!(fake.calls().is_empty());
  }

  #[test]
  fn test_both_keys_are_invalid() {
    let err = CredentialQuery::new(Some("jira_api_key"), Some("me@example.com"), None).unwrap_err();
    assert!(matches!(err, Error::InvalidArguments(_)));
  }

  #[test]
  fn test_single_object_response_is_resolved() {
    let fake = FakeOp::returning(
      r#"{"title": "jira", "fields": [
        {"label": "username", "value": "u1"},
        {"label": "credential", "value": "p1"}
      ]}"#,
    );
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_name("jira", None).unwrap();

    let creds = resolver.resolve(&query).unwrap();
    assert_eq!(
      creds,
      Credentials {
        username: "u1".to_string(),
        credential: "p1".to_string(),
      }
    );
  }

  #[test]
  fn test_lookup_commands() {
    let fake = FakeOp::returning("[]");
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_username("u1", Some("Work")).unwrap();
    let _ = resolver.resolve(&query);

    let fake_by_name = FakeOp::returning("[]");
    let resolver = CredentialResolver::new(&fake_by_name);
    let query = CredentialQuery::by_name("jira_api_key", None).unwrap();
    let _ = resolver.resolve(&query);

    assert_eq!(
      fake.calls(),
      vec![
        vec!["--version".to_string()],
        ["item", "search", "username:u1", "--format", "json", "--vault", "Work"]
          .map(String::from)
          .to_vec(),
      ]
    );
    assert_eq!(
      fake_by_name.calls()[1],
      ["item", "get", "jira_api_key", "--format", "json"].map(String::from).to_vec()
    );
  }

  #[test]
  fn test_empty_list_is_not_found_naming_key() {
    let fake = FakeOp::returning("[]");
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_username("ghost@example.com", None).unwrap();

    let err = resolver.resolve(&query).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(err.to_string(), "No credentials found for username: ghost@example.com");
  }

  #[test]
  fn test_missing_credential_label_is_missing_field() {
    let fake = FakeOp::returning(r#"[{"fields": [{"label": "username", "value": "u1"}]}]"#);
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_name("jira", None).unwrap();

    let err = resolver.resolve(&query).unwrap_err();
    assert!(matches!(err, Error::MissingField(_)));
  }

  #[test]
  fn test_empty_field_value_is_missing_field() {
    let fake = FakeOp::returning(
      r#"[{"fields": [{"label": "username", "value": "u1"}, {"label": "credential", "value": ""}]}]"#,
    );
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_name("jira", None).unwrap();

    assert!(matches!(resolver.resolve(&query), Err(Error::MissingField(_))));
  }

  #[test]
  fn test_labels_match_case_insensitively_and_first_item_wins() {
    let fake = FakeOp::returning(
      r#"[
        {"fields": [{"label": "USERNAME", "value": "first"}, {"label": "Credential", "value": "one"}]},
        {"fields": [{"label": "username", "value": "second"}, {"label": "credential", "value": "two"}]}
      ]"#,
    );
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_username("first", None).unwrap();

    let creds = resolver.resolve(&query).unwrap();
    assert_eq!(creds.username, "first");
    assert_eq!(creds.credential, "one");
  }

  #[test]
  fn test_missing_cli_is_missing_dependency() {
    let fake = FakeOp::new(vec![Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))]);
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_name("jira", None).unwrap();

    let err = resolver.resolve(&query).unwrap_err();
    assert!(matches!(err, Error::MissingDependency(_)));
    assert_eq!(fake.calls().len(), 1);
  }

  #[test]
  fn test_failed_probe_is_missing_dependency() {
    let fake = FakeOp::new(vec![Ok(OpOutput::failed("broken install"))]);
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_name("jira", None).unwrap();

    assert!(matches!(resolver.resolve(&query), Err(Error::MissingDependency(_))));
  }

  #[test]
  fn test_not_signed_in() {
    let fake = FakeOp::new(vec![
      Ok(OpOutput::ok("2.30.0")),
      Ok(OpOutput::failed("[ERROR] 2024/01/01 00:00:00 You are not signed in.")),
    ]);
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_name("jira", None).unwrap();

    assert_eq!(resolver.resolve(&query).unwrap_err(), Error::NotSignedIn);
  }

  #[test]
  fn test_expired_session_is_not_signed_in() {
    let fake = FakeOp::new(vec![
      Ok(OpOutput::ok("2.30.0")),
      Ok(OpOutput::failed(
        "[ERROR] 2024/01/01 00:00:00 You are not currently signed in. Please run `op signin --help` for instructions",
      )),
    ]);
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_username("u1", None).unwrap();

    assert_eq!(resolver.resolve(&query).unwrap_err(), Error::NotSignedIn);
  }

  #[test]
  fn test_unknown_item_is_not_found() {
    let fake = FakeOp::new(vec![
      Ok(OpOutput::ok("2.30.0")),
      Ok(OpOutput::failed(
        "[ERROR] 2024/01/01 00:00:00 \"jira\" isn't an item. Specify the item with its UUID, name, or domain.",
      )),
    ]);
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_name("jira", None).unwrap();

    let err = resolver.resolve(&query).unwrap_err();
    assert_eq!(err.to_string(), "No credentials found for credential name: jira");
  }

  #[test]
  fn test_other_cli_failures_keep_stderr() {
    let fake = FakeOp::new(vec![
      Ok(OpOutput::ok("2.30.0")),
      Ok(OpOutput::failed("[ERROR] vault \"Nope\" not found\n")),
    ]);
    let resolver = CredentialResolver::new(&fake);
    let query = CredentialQuery::by_name("jira", Some("Nope")).unwrap();

    let err = resolver.resolve(&query).unwrap_err();
    assert_eq!(err, Error::Cli("[ERROR] vault \"Nope\" not found".to_string()));
  }

  #[test]
  fn test_unparseable_output_is_malformed() {
    for stdout in ["not json", "\"just a string\"", "[1, 2]"] {
      let fake = FakeOp::returning(stdout);
      let resolver = CredentialResolver::new(&fake);
      let query = CredentialQuery::by_name("jira", None).unwrap();

      assert!(
        matches!(resolver.resolve(&query), Err(Error::MalformedOutput(_))),
        "expected malformed output for {stdout:?}"
      );
    }
  }

  #[test]
  fn test_debug_redacts_credential() {
    let creds = Credentials {
      username: "u1".to_string(),
      credential: "super-secret".to_string(),
    };
    let rendered = format!("{creds:?}");
    assert!(rendered.contains("u1"));
    assert!(!rendered.contains("super-secret"));
  }
}
