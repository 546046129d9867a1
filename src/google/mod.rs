//! Google Calendar access.
//!
//! Files live under the platform config dir:
//!   ~/.config/rezept-termine/google/credentials.json  (OAuth client, user-provided)
//!   ~/.config/rezept-termine/google/session.toml      (cached tokens)
//!
//! Callers only see `obtain_credentials` and `GoogleCalendar`; everything
//! about tokens and consent stays in here.

pub mod app_config;
pub mod authenticate;
pub mod calendar;
pub mod session;

use std::path::PathBuf;

use google_calendar::Client;
use thiserror::Error;

pub use calendar::{GoogleCalendar, UploadStats};

use app_config::Credentials;
use session::Session;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No OAuth client credentials have been set up; upload is not possible.
    #[error("{}", app_config::setup_instructions(.0))]
    Unavailable(PathBuf),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// A usable session together with the client credentials it belongs to.
pub struct Authorization {
    creds: Credentials,
    session: Session,
}

impl Authorization {
    pub fn client(&self) -> Client {
        self.session.client(&self.creds)
    }
}

/// Get a valid session, refreshing it or running the consent flow as needed.
///
/// The resulting session is cached, so the browser only opens on first use
/// or when the refresh token is gone.
pub async fn obtain_credentials() -> Result<Authorization, AuthError> {
    let creds_path = app_config::credentials_path()?;
    let creds = app_config::load(&creds_path)?.ok_or(AuthError::Unavailable(creds_path))?;

    let session_path = Session::path()?;

    let session = match Session::load(&session_path)? {
        Some(session) if !session.is_expired() => session,
        Some(mut session) if session.can_refresh() => {
            tracing::info!("Google access token expired, refreshing");
            session.refresh(&creds).await?;
            session.save(&session_path)?;
            session
        }
        _ => {
            let session = authenticate::run(&creds).await?;
            session.save(&session_path)?;
            println!("Authentication successful!");
            session
        }
    };

    Ok(Authorization { creds, session })
}

/// Always run the consent flow, replacing any cached session.
pub async fn reauthenticate() -> Result<PathBuf, AuthError> {
    let creds_path = app_config::credentials_path()?;
    let creds = app_config::load(&creds_path)?.ok_or(AuthError::Unavailable(creds_path))?;

    let session_path = Session::path()?;
    let session = authenticate::run(&creds).await?;
    session.save(&session_path)?;

    Ok(session_path)
}
