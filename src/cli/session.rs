use std::path::Path;

use crate::{
    Res,
    config::ApiSettings,
    info,
    management::CredentialsManager,
    success,
    tidal::{
        Tidal,
        auth::{DeviceAuth, SessionAuth},
    },
    types::{SessionCredentials, SessionUser},
    warning,
};

/// Where the credentials of a session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Taken from the INI file and accepted as they were.
    Loaded,
    /// Taken from the INI file and refreshed.
    Refreshed,
    /// Obtained through the interactive login.
    LoggedIn,
}

/// Produces an authenticated session.
///
/// See [`resolve_session`] for the order in which credentials are tried.
/// New or refreshed credentials are printed as an INI block for reuse.
pub async fn bootstrap(settings: &ApiSettings, ini: Option<&Path>) -> Res<Tidal> {
    let auth = DeviceAuth::new(settings);
    let (credentials, user, origin) = resolve_session(&auth, ini).await?;

    match origin {
        SessionOrigin::Loaded => {}
        SessionOrigin::Refreshed => {
            info!("session token refreshed");
            print_credentials(&credentials);
        }
        SessionOrigin::LoggedIn => {
            success!("Authentication successful!");
            print_credentials(&credentials);
        }
    }

    Ok(Tidal::new(settings.clone(), credentials, user))
}

/// Finds working credentials.
///
/// Credentials from `ini` are tried first. An incomplete file is reported and
/// skipped. Credentials that fail the liveness check get one refresh attempt
/// when they carry a refresh token; if that does not help either, a warning is
/// printed. Whenever no working session came out of the file, the interactive
/// login runs.
///
/// # Errors
///
/// Fails only when the interactive login or its liveness check fails.
pub async fn resolve_session<A: SessionAuth + ?Sized>(
    auth: &A,
    ini: Option<&Path>,
) -> Res<(SessionCredentials, SessionUser, SessionOrigin)> {
    if let Some(path) = ini {
        match CredentialsManager::load(path).await {
            Ok(credentials) => {
                if let Some(session) = resume(auth, credentials).await {
                    return Ok(session);
                }
                warning!("loaded session appears to be not authenticated");
            }
            Err(e) => warning!(
                "supplied configuration to restore session is incomplete: {}",
                e
            ),
        }
    }

    info!("authenticating new session");
    let credentials = auth.login().await?;
    let user = auth.check_login(&credentials).await?;

    Ok((credentials, user, SessionOrigin::LoggedIn))
}

async fn resume<A: SessionAuth + ?Sized>(
    auth: &A,
    credentials: SessionCredentials,
) -> Option<(SessionCredentials, SessionUser, SessionOrigin)> {
    if let Ok(user) = auth.check_login(&credentials).await {
        return Some((credentials, user, SessionOrigin::Loaded));
    }

    credentials.refresh_token.as_ref()?;
    match auth.refresh(&credentials).await {
        Ok(refreshed) => {
            let user = auth.check_login(&refreshed).await.ok()?;
            Some((refreshed, user, SessionOrigin::Refreshed))
        }
        Err(e) => {
            warning!("Token refresh failed: {}", e);
            None
        }
    }
}

fn print_credentials(credentials: &SessionCredentials) {
    println!(
        "To load the session next time you run this program, \
         supply the following information via an INI file:"
    );
    println!();
    print!("{}", CredentialsManager::render(credentials));
    println!();
}
