//! Shared utility functions for Expert Manager crates

use anyhow::anyhow;
use std::path::PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that test
/// harnesses and wrapper scripts can redirect the settings location.
pub fn get_home_dir() -> anyhow::Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Filename component of a registered path.
///
/// Registered paths are Windows paths, possibly containing macros, so both
/// separators and the drive colon are treated as delimiters regardless of the
/// host platform.
pub fn file_name_component(path: &str) -> &str {
    path.rsplit(['\\', '/', ':']).next().unwrap_or(path)
}

/// Key used for duplicate filename detection (filenames compare case-insensitively)
pub fn duplicate_key(path: &str) -> String {
    file_name_component(path).to_lowercase()
}
