//! # Credentials Command
//!
//! Looks up a 1Password item by name or username and prints its credentials.

use anyhow::Result;
use clap::{Args, Subcommand};
use opjira_core::{CredentialQuery, CredentialResolver};

/// Command for credential lookup
#[derive(Args)]
pub struct CredsArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: CredsSubcommands,
}

/// Subcommands for the creds command
#[derive(Subcommand)]
pub enum CredsSubcommands {
  /// Print the username and credential of a 1Password item
  #[command(long_about = "Retrieve credentials from 1Password using the local op CLI.\n\n\
                      Exactly one of --username and --credential-name must be given. When\n\
                      several items match a username search, the first one is used.")]
  Get(GetArgs),
}

/// Arguments for `creds get`
#[derive(Args)]
pub struct GetArgs {
  /// Username to search for
  #[arg(short = 'u', long)]
  pub username: Option<String>,

  /// Name of the 1Password item
  #[arg(short = 'c', long)]
  pub credential_name: Option<String>,

  /// Vault to search in (all vaults when omitted)
  #[arg(long)]
  pub vault: Option<String>,
}

/// Handle the creds command
pub fn handle_creds_command(creds: CredsArgs) -> Result<()> {
  match creds.subcommand {
    CredsSubcommands::Get(args) => handle_get_command(&args),
  }
}

fn handle_get_command(args: &GetArgs) -> Result<()> {
  let query = CredentialQuery::new(
    args.credential_name.as_deref(),
    args.username.as_deref(),
    args.vault.as_deref(),
  )?;
  let credentials = CredentialResolver::from_env().resolve(&query)?;

  println!("Username: {}", credentials.username);
  println!("Credential: {}", credentials.credential);
  Ok(())
}
