//! # Output Formatting
//!
//! Colored, emoji-prefixed status messages for the terminal. Colors follow
//! the global [`ColorMode`] override and fall back to terminal detection.

use owo_colors::{OwoColorize, Stream, Style};
use {clap, emojis};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the global color override
  pub fn apply(self) {
    match self {
      Self::Always | Self::Yes => owo_colors::set_override(true),
      Self::Never | Self::No => owo_colors::set_override(false),
      // owo-colors detects terminal support on its own
      Self::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("white_check_mark", "✓");
  println!(
    "{} {}",
    check.if_supports_color(Stream::Stdout, |t| t.style(Style::new().green().bold())),
    message
  );
}

/// Print a hint to stderr, alongside error output
pub fn print_hint(message: &str) {
  let info = get_emoji_or_default("information_source", "ℹ");
  eprintln!(
    "{} {}",
    info.if_supports_color(Stream::Stderr, |t| t.style(Style::new().blue().bold())),
    message
  );
}

/// Format a record field name
pub fn format_field_name(name: &str) -> String {
  name
    .if_supports_color(Stream::Stdout, |t| t.style(Style::new().bright_cyan().bold()))
    .to_string()
}

/// Format a URL
pub fn format_url(url: &str) -> String {
  url.if_supports_color(Stream::Stdout, |t| t.bright_green()).to_string()
}

/// Format a command or command example shown on stderr
pub fn format_command(cmd: &str) -> String {
  cmd.if_supports_color(Stream::Stderr, |t| t.purple()).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_emoji_fallback() {
    assert_eq!(get_emoji_or_default("definitely_not_an_emoji", "*"), "*");
    assert_eq!(get_emoji_or_default("white_check_mark", "*"), "✅");
    assert_ne!(get_emoji_or_default("information_source", "*"), "*");
  }

  #[test]
  fn test_formatters_follow_color_mode() {
    ColorMode::Always.apply();
    let styled = format_field_name("key");
    assert!(styled.starts_with('\u{1b}'));
    assert!(styled.contains("key"));

    ColorMode::Never.apply();
    assert_eq!(format_field_name("key"), "key");
    assert_eq!(format_url("https://example.com"), "https://example.com");
    assert_eq!(format_command("op signin"), "op signin");
  }
}
