//! # 1Password CLI Runner
//!
//! Thin wrapper around the locally installed `op` executable. Authentication
//! is handled entirely by `op` itself (desktop app integration or an active
//! `op signin` session); this module only spawns the process and captures its
//! output.

use std::ffi::OsString;
use std::io;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::trace;

use crate::config::ENV_OP_PATH;

/// Default name of the 1Password CLI executable
pub const DEFAULT_OP_PROGRAM: &str = "op";

/// Captured result of one `op` invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpOutput {
  pub success: bool,
  pub stdout: String,
  pub stderr: String,
}

impl OpOutput {
  /// Successful invocation with the given stdout
  pub fn ok(stdout: impl Into<String>) -> Self {
    Self {
      success: true,
      stdout: stdout.into(),
      stderr: String::new(),
    }
  }

  /// Failed invocation with the given stderr
  pub fn failed(stderr: impl Into<String>) -> Self {
    Self {
      success: false,
      stdout: String::new(),
      stderr: stderr.into(),
    }
  }
}

/// Executes `op` subcommands.
///
/// Implemented by [`OpCli`] for real process execution; tests provide their
/// own implementations to simulate the CLI.
pub trait OpRunner {
  /// Run `op` with the given arguments and capture its output.
  ///
  /// An `Err` means the process could not be spawned at all.
  fn run(&self, args: &[&str]) -> io::Result<OpOutput>;
}

impl<R: OpRunner + ?Sized> OpRunner for &R {
  fn run(&self, args: &[&str]) -> io::Result<OpOutput> {
    (**self).run(args)
  }
}

/// Runs the real `op` binary
#[derive(Debug, Clone)]
pub struct OpCli {
  program: OsString,
}

impl Default for OpCli {
  fn default() -> Self {
    Self::new(DEFAULT_OP_PROGRAM)
  }
}

impl OpCli {
  /// Use an explicit executable path or name
  pub fn new(program: impl Into<OsString>) -> Self {
    Self {
      program: program.into(),
    }
  }

  /// Use `$OPJIRA_OP_PATH` if set and non-empty, otherwise `op` from `PATH`
  pub fn from_env() -> Self {
    match std::env::var_os(ENV_OP_PATH) {
      Some(path) if !path.is_empty() => Self::new(path),
      _ => Self::default(),
    }
  }

  /// The executable this runner spawns
  pub fn program(&self) -> &OsString {
    &self.program
  }
}

impl OpRunner for OpCli {
  fn run(&self, args: &[&str]) -> io::Result<OpOutput> {
    trace!("Running {:?} {:?}", self.program, args);

    let output = Command::new(&self.program)
      .args(args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .output()?;

    Ok(OpOutput {
      success: output.status.success(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
  }
}

/// Item as returned by `op item get --format json` and `op item search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpItem {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub fields: Vec<OpField>,
}

/// Labeled field of an [`OpItem`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpField {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub label: Option<String>,
  #[serde(default)]
  pub value: Option<String>,
}

impl OpField {
  /// Case-insensitive label comparison
  pub fn has_label(&self, label: &str) -> bool {
    self
      .label
      .as_deref()
      .is_some_and(|own| own.eq_ignore_ascii_case(label))
  }
}
