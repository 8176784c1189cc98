//! # Jira Command
//!
//! Derive-based implementation of the Jira command: API-key lookup,
//! credential checks and project metadata.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use opjira_core::config::{DEFAULT_JIRA_CREDENTIAL_NAME, ENV_JIRA_EMAIL, env_value, resolve_jira_base_url};
use opjira_core::output::{format_field_name, format_url};
use opjira_core::{CredentialResolver, print_success};
use opjira_jira::{JiraSettings, ProjectRecord, connect, fetch_project, get_jira_api_key};
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

/// Command for Jira integration
#[derive(Args)]
pub struct JiraArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: JiraSubcommands,
}

/// Subcommands for the Jira command
#[derive(Subcommand)]
pub enum JiraSubcommands {
  /// Print the Jira API key stored in 1Password
  #[command(long_about = "Print the Jira API key stored in 1Password.\n\n\
                      The key is the 'credential' field of the named item.")]
  ApiKey(ApiKeyArgs),

  /// Verify that the Jira credentials are accepted
  #[command(long_about = "Connect to Jira and fetch the authenticated user.\n\n\
                      Use this to confirm that the server address, email and API key work together.")]
  Check(ConnectionArgs),

  /// Show metadata for a Jira project
  #[command(long_about = "Fetch a Jira project by key or id and print its metadata.\n\n\
                      Fields that are empty on the project are omitted.")]
  Project(ProjectArgs),
}

/// Arguments for `jira api-key`
#[derive(Args)]
pub struct ApiKeyArgs {
  /// Name of the 1Password item holding the API key
  #[arg(short = 'c', long, default_value = DEFAULT_JIRA_CREDENTIAL_NAME)]
  pub credential_name: String,

  /// Vault to search in (all vaults when omitted)
  #[arg(long)]
  pub vault: Option<String>,
}

/// Connection parameters shared by commands that talk to Jira
#[derive(Args)]
pub struct ConnectionArgs {
  /// Jira server address [default: $JIRA_HOST]
  #[arg(short = 's', long)]
  pub server: Option<String>,

  /// Jira account email [default: $JIRA_EMAIL]
  #[arg(short = 'e', long)]
  pub email: Option<String>,

  /// API key to use instead of looking it up in 1Password
  #[arg(long)]
  pub api_key: Option<String>,

  /// Name of the 1Password item holding the API key
  #[arg(short = 'c', long, default_value = DEFAULT_JIRA_CREDENTIAL_NAME)]
  pub credential_name: String,

  /// Vault to search in (all vaults when omitted)
  #[arg(long)]
  pub vault: Option<String>,
}

impl ConnectionArgs {
  /// Resolve flags and environment fallbacks into settings
  fn settings(&self) -> Result<JiraSettings> {
    let server = match &self.server {
      Some(server) => server.clone(),
      None => resolve_jira_base_url().context("No Jira server given; pass --server")?,
    };
    let email = self
      .email
      .clone()
      .or_else(|| env_value(ENV_JIRA_EMAIL))
      .with_context(|| format!("No Jira account email given; pass --email or set {ENV_JIRA_EMAIL}"))?;

    Ok(
      JiraSettings::new(server, email)
        .with_api_key(self.api_key.clone())
        .with_credential_name(self.credential_name.clone())
        .with_vault(self.vault.clone()),
    )
  }
}

/// Arguments for `jira project`
#[derive(Args)]
pub struct ProjectArgs {
  /// Project key or id (e.g., PROJ)
  #[arg(required = true, index = 1)]
  pub project_id: String,

  /// Print the project as JSON
  #[arg(long)]
  pub json: bool,

  #[command(flatten)]
  pub connection: ConnectionArgs,
}

/// Handle the Jira command
pub fn handle_jira_command(jira: JiraArgs) -> Result<()> {
  match jira.subcommand {
    JiraSubcommands::ApiKey(args) => handle_api_key_command(&args),
    JiraSubcommands::Check(args) => handle_check_command(&args),
    JiraSubcommands::Project(args) => handle_project_command(&args),
  }
}

fn handle_api_key_command(args: &ApiKeyArgs) -> Result<()> {
  let resolver = CredentialResolver::from_env();
  let api_key = get_jira_api_key(&resolver, &args.credential_name, args.vault.as_deref())?;

  println!("Jira API Key: {api_key}");
  Ok(())
}

fn handle_check_command(args: &ConnectionArgs) -> Result<()> {
  let settings = args.settings()?;
  let client = connect(&settings, &CredentialResolver::from_env())?;

  let rt = create_runtime()?;
  if !rt.block_on(client.test_connection())? {
    bail!(
      "Jira at {} rejected the credentials for {}",
      client.base_url(),
      client.email()
    );
  }
  let user = rt.block_on(client.get_myself())?;

  let who = user
    .display_name
    .or(user.email_address)
    .unwrap_or_else(|| client.email().to_string());
  print_success(&format!("Authenticated to {} as {who}", format_url(client.base_url())));
  Ok(())
}

fn handle_project_command(args: &ProjectArgs) -> Result<()> {
  let settings = args.connection.settings()?;
  let resolver = CredentialResolver::from_env();

  let rt = create_runtime()?;
  let record = rt.block_on(fetch_project(&args.project_id, &settings, &resolver))?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&record)?);
  } else {
    for line in render_record(&record) {
      println!("{line}");
    }
  }
  Ok(())
}

/// One `field: value` line per record entry
fn render_record(record: &ProjectRecord) -> Vec<String> {
  record
    .iter()
    .map(|(field, value)| {
      let value = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
      };
      format!("{}: {value}", format_field_name(field))
    })
    .collect()
}

/// Single-threaded runtime for one request at a time
fn create_runtime() -> Result<Runtime> {
  Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")
}
