//! URL normalization for Jira base addresses.

use url::Url;

use crate::error::{Error, Result};

/// Normalize a Jira server address into a base URL.
///
/// A missing scheme defaults to `https://`, malformed schemes such as
/// `https:/host` are repaired, and trailing slashes are dropped so that API
/// paths can be appended directly. Only `http` and `https` are accepted.
pub fn normalize_base_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(Error::InvalidArguments("Jira server address cannot be empty".to_string()));
  }

  let url = parse_with_scheme(trimmed)
    .ok_or_else(|| Error::InvalidArguments(format!("Invalid Jira server address: '{trimmed}'")))?;

  if !matches!(url.scheme(), "http" | "https") {
    return Err(Error::InvalidArguments(format!(
      "Unsupported scheme '{}' in Jira server address: '{trimmed}'",
      url.scheme()
    )));
  }

  if url.query().is_some() || url.fragment().is_some() {
    return Err(Error::InvalidArguments(format!(
      "Jira server address must not contain a query or fragment: '{trimmed}'"
    )));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Parse `input`, assuming `https://` when no usable scheme is present.
fn parse_with_scheme(input: &str) -> Option<Url> {
  let lowered = input.to_ascii_lowercase();

  for scheme in ["https", "http"] {
    let prefix = format!("{scheme}:");
    if lowered.starts_with(&prefix) && !lowered.starts_with(&format!("{scheme}://")) {
      // "https:/host" or "http:host": keep the host, default to https
      let remainder = input[prefix.len()..].trim_start_matches('/');
      return Url::parse(&format!("https://{remainder}")).ok();
    }
  }

  match Url::parse(input) {
    Ok(url) if url.has_host() => Some(url),
    _ => Url::parse(&format!("https://{input}")).ok().filter(Url::has_host),
  }
}
