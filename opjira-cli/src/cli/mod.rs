//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for opjira.

mod creds;
mod jira;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use opjira_core::output::format_command;
use opjira_core::{ColorMode, Error, print_hint};

/// Top-level CLI command for opjira
#[derive(Parser)]
#[command(name = "opjira")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Look up secrets in 1Password and use them to query Jira")]
#[command(
  long_about = "opjira reads credentials from the local 1Password CLI (op) and uses them to\n\
        authenticate against the Jira REST API.\n\n\
        The op CLI must be installed and signed in. Set OPJIRA_OP_PATH to use an\n\
        op binary that is not on your PATH."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for opjira
#[derive(Subcommand)]
pub enum Commands {
  /// Credential lookup
  #[command(long_about = "Look up credentials stored in 1Password.\n\n\
            Items are found by name or by the username stored in them and must carry\n\
            fields labeled 'username' and 'credential'.")]
  #[command(arg_required_else_help = true)]
  Creds(creds::CredsArgs),

  /// Jira integration
  #[command(long_about = "Connect to Jira with an API key stored in 1Password.\n\n\
            The server and account email default to $JIRA_HOST and $JIRA_EMAIL.\n\
            The API key is read from the 1Password item named by --credential-name\n\
            unless --api-key is given.")]
  #[command(arg_required_else_help = true)]
  Jira(jira::JiraArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Creds(creds) => creds::handle_creds_command(creds),
    Commands::Jira(jira) => jira::handle_jira_command(jira),
  }
}

/// Print a follow-up suggestion for failures the user can fix locally
pub fn print_error_hint(error: &anyhow::Error) {
  let Some(error) = error.downcast_ref::<Error>() else {
    return;
  };

  match error.root() {
    Error::NotSignedIn => print_hint(&format!("Run {} and try again.", format_command("eval $(op signin)"))),
    Error::MissingDependency(_) => print_hint(&format!(
      "Install the 1Password CLI or set {} to its path.",
      format_command(opjira_core::config::ENV_OP_PATH)
    )),
    _ => {}
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_verbose_is_global() {
    let cli = Cli::try_parse_from(["opjira", "creds", "get", "-c", "jira_api_key", "-vv"]).unwrap();
    assert_eq!(cli.verbose, 2);
  }
}
