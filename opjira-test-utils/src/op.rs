//! Fake 1Password CLI for integration tests
//!
//! A small shell script stands in for `op`. It records the arguments of every
//! invocation, answers `--version`, and replies to lookups with the canned
//! stdout/stderr and exit status found in the directory named by
//! `$OPJIRA_FAKE_OP_DIR`.
//!
//! The script is written once per test process and shared by every guard, so
//! no executable is rewritten while other tests spawn processes (`ETXTBSY`).

use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

/// Environment variable the script reads its responses from
pub const ENV_FAKE_OP_DIR: &str = "OPJIRA_FAKE_OP_DIR";

/// Environment variable pointing opjira at the `op` executable
const ENV_OP_PATH: &str = "OPJIRA_OP_PATH";

const SCRIPT: &str = r#"#!/bin/sh
dir="$OPJIRA_FAKE_OP_DIR"
echo "$*" >> "$dir/args.log"
if [ "$1" = "--version" ]; then
  if [ -f "$dir/version_fails" ]; then
    echo "op: broken installation" >&2
    exit 1
  fi
  echo "2.30.0"
  exit 0
fi
cat "$dir/stdout"
cat "$dir/stderr" >&2
exit "$(cat "$dir/status")"
"#;

static SCRIPT_DIR: OnceLock<TempDir> = OnceLock::new();

/// Path of the shared fake `op` script, written on first use
fn script_path() -> PathBuf {
  let dir = SCRIPT_DIR.get_or_init(|| {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let program = dir.path().join("op");

    fs::write(&program, SCRIPT).expect("Failed to write fake op script");
    let mut perms = fs::metadata(&program).expect("Failed to stat fake op").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&program, perms).expect("Failed to make fake op executable");

    dir
  });
  dir.path().join("op")
}

/// RAII guard owning the responses of one fake `op`
pub struct FakeOpGuard {
  data_dir: TempDir,
  program: PathBuf,
}

impl FakeOpGuard {
  fn build(stdout: &str, stderr: &str, status: i32) -> Self {
    let program = script_path();
    let data_dir = TempDir::new().expect("Failed to create temp directory");

    fs::write(data_dir.path().join("stdout"), stdout).expect("Failed to write fake op stdout");
    fs::write(data_dir.path().join("stderr"), stderr).expect("Failed to write fake op stderr");
    fs::write(data_dir.path().join("status"), status.to_string()).expect("Failed to write fake op status");

    Self { data_dir, program }
  }

  /// Lookups succeed and print `json`
  pub fn returning(json: &str) -> Self {
    Self::build(json, "", 0)
  }

  /// Lookups exit with status 1 and print `stderr`
  pub fn failing(stderr: &str) -> Self {
    Self::build("", stderr, 1)
  }

  /// The `--version` probe itself fails
  pub fn broken() -> Self {
    let guard = Self::build("", "", 0);
    fs::write(guard.data_dir.path().join("version_fails"), "").expect("Failed to mark fake op as broken");
    guard
  }

  /// Path of the fake executable
  pub fn program(&self) -> &Path {
    &self.program
  }

  /// Directory holding this fake's canned responses
  pub fn data_dir(&self) -> &Path {
    self.data_dir.path()
  }

  /// Environment a child process needs to use this fake
  pub fn envs(&self) -> [(&'static str, OsString); 2] {
    [
      (ENV_OP_PATH, self.program.clone().into_os_string()),
      (ENV_FAKE_OP_DIR, self.data_dir.path().as_os_str().to_os_string()),
    ]
  }

  /// Arguments of every invocation, one space-joined line per call
  pub fn recorded_calls(&self) -> Vec<String> {
    fs::read_to_string(self.data_dir.path().join("args.log"))
      .map(|log| log.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }
}

/// JSON for an `op item get` response carrying the two expected fields
pub fn item_json(title: &str, username: &str, credential: &str) -> String {
  format!(
    r#"{{"id":"abc123","title":"{title}","category":"API_CREDENTIAL","fields":[{{"id":"username","type":"STRING","label":"username","value":"{username}"}},{{"id":"credential","type":"CONCEALED","label":"credential","value":"{credential}"}}]}}"#
  )
}
