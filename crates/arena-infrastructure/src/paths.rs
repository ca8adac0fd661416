//! Unified path management for arena configuration files.
//!
//! All arena configuration, secrets, and record data live under one
//! platform config directory so storage stays consistent across
//! Linux, macOS and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for arena.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/arena/             # Config directory
/// ├── secret.json              # API keys and secrets
/// └── records/                 # Debate record files
///     └── <owner_id>/
///         └── <record_id>.json
/// ```
pub struct ArenaPaths;

impl ArenaPaths {
    /// Returns the arena configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/arena/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("arena"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the records directory.
    pub fn records_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("records"))
    }
}
