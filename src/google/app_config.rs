//! App-level configuration for Google Calendar access.
//!
//! User-provided OAuth client credentials, exactly as downloaded from the
//! Google Cloud Console, stored at:
//!   ~/.config/rezept-termine/google/credentials.json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Google OAuth client credentials (user-provided).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// The console wraps the credentials in `installed` (desktop app) or `web`.
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum CredentialsFile {
    Installed(Credentials),
    Web(Credentials),
}

pub fn base_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("rezept-termine")
        .join("google"))
}

pub fn credentials_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("credentials.json"))
}

/// Load credentials, or `None` if the file has not been set up yet.
pub fn load(path: &Path) -> Result<Option<Credentials>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

    parse(&contents)
        .with_context(|| format!("Failed to parse credentials from {}", path.display()))
        .map(Some)
}

fn parse(contents: &str) -> Result<Credentials> {
    let file: CredentialsFile = serde_json::from_str(contents)?;

    Ok(match file {
        CredentialsFile::Installed(creds) | CredentialsFile::Web(creds) => creds,
    })
}

/// Setup instructions shown when no credentials file exists
pub fn setup_instructions(path: &Path) -> String {
    format!(
        "Google credentials not found at {}\n\n\
        To enable Google Calendar upload:\n  \
        1. Go to https://console.cloud.google.com/\n  \
        2. Create a project or select an existing one\n  \
        3. Enable the Google Calendar API\n  \
        4. Create OAuth 2.0 credentials (Desktop app)\n  \
        5. Download the JSON file and save it as the path above",
        path.display()
    )
}
