//! # opjira Core Library
//!
//! Shared building blocks for opjira: the workspace error type, credential
//! resolution through the 1Password CLI, configuration constants, URL
//! normalization and terminal output helpers.

pub mod config;
pub mod creds;
pub mod error;
pub mod output;
pub mod url;

// Re-export main types
pub use creds::op::{OpCli, OpOutput, OpRunner};
pub use creds::{CredentialQuery, CredentialResolver, Credentials, SearchKey, get_credential};
pub use error::{Error, Result};
pub use output::{ColorMode, print_hint, print_success};
