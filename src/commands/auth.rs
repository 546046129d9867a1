use anyhow::Result;

use crate::google::{self, AuthError};

pub async fn run() -> Result<()> {
    println!("Authenticating with Google Calendar...");

    match google::reauthenticate().await {
        Ok(session_path) => {
            println!("Authentication successful!");
            println!("Session saved to {}", session_path.display());
            println!("\nSet \"google_calendar_enabled\": true in config.json to upload appointments.");
            Ok(())
        }
        Err(AuthError::Unavailable(path)) => {
            anyhow::bail!(google::app_config::setup_instructions(&path))
        }
        Err(AuthError::Failed(e)) => Err(e),
    }
}
