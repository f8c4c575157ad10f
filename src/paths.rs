//! XDG-style path utilities for the configuration directory.
//!
//! This module provides consistent path resolution across platforms,
//! preferring XDG Base Directory Specification conventions over
//! OS-specific locations.

use std::path::PathBuf;

/// Returns the configuration directory for deepl-chat.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/deepl-chat` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/deepl-chat` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join("deepl-chat"),
        |xdg| PathBuf::from(xdg).join("deepl-chat"),
    )
}

/// Returns the user's home directory.
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
#[allow(clippy::expect_used)]
fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Failed to determine home directory")
}
