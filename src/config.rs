//! Configuration management for the helpdesk CLI.
//!
//! Configuration is resolved in this order:
//! 1. Command-line flags (`--server`, `--verbose`, `--format`)
//! 2. Environment variables (`HELPDESK_API_URL`, `RUST_LOG`)
//! 3. A `.env` file in the local data directory
//! 4. The defaults defined in this module

use std::{path::PathBuf, time::Duration};

use crate::Res;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "HELPDESK_API_URL";

/// Base URL used when neither the flag nor the environment provides one.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Connect timeout applied by the HTTP transport.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whole-request timeout applied by the HTTP transport.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads environment variables from the `.env` file in the local data directory.
///
/// The file lives at:
/// - Linux: `~/.local/share/helpdesk-cli/.env`
/// - macOS: `~/Library/Application Support/helpdesk-cli/.env`
/// - Windows: `%LOCALAPPDATA%/helpdesk-cli/.env`
///
/// Variables already present in the process environment are not overridden.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be parsed. Callers
/// treat this as a warning since every value has a default.
pub fn load_env() -> Res<PathBuf> {
    let path = env_file_path();
    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(path)
}

/// Returns the location of the `.env` file read by [`load_env`].
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("helpdesk-cli/.env");
    path
}
