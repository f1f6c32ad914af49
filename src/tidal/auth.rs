//! Session authentication against TIDAL.
//!
//! [`SessionAuth`] is the seam session bootstrap works through; [`DeviceAuth`]
//! implements it with the HTTP calls below.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::{
    Res,
    config::ApiSettings,
    info,
    types::{DeviceAuthorization, SessionCredentials, SessionUser, TokenResponse},
    utils, warning,
};

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Authentication steps needed to obtain a working session.
#[async_trait]
pub trait SessionAuth: Send + Sync {
    /// See [`check_login`].
    async fn check_login(&self, credentials: &SessionCredentials) -> Res<SessionUser>;

    /// See [`refresh`].
    async fn refresh(&self, credentials: &SessionCredentials) -> Res<SessionCredentials>;

    /// Interactive login; see [`login_device`].
    async fn login(&self) -> Res<SessionCredentials>;
}

/// [`SessionAuth`] over the TIDAL endpoints configured in [`ApiSettings`].
pub struct DeviceAuth<'a> {
    settings: &'a ApiSettings,
}

impl<'a> DeviceAuth<'a> {
    pub fn new(settings: &'a ApiSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionAuth for DeviceAuth<'_> {
    async fn check_login(&self, credentials: &SessionCredentials) -> Res<SessionUser> {
        check_login(self.settings, credentials).await
    }

    async fn refresh(&self, credentials: &SessionCredentials) -> Res<SessionCredentials> {
        refresh(self.settings, credentials).await
    }

    async fn login(&self) -> Res<SessionCredentials> {
        login_device(self.settings).await
    }
}

/// Checks that `credentials` are accepted by the API.
///
/// # Arguments
///
/// * `settings` - API base URL to call `GET sessions` on
/// * `credentials` - token sent as the `Authorization` header
///
/// # Returns
///
/// The user id and country code of the account behind the token.
///
/// # Errors
///
/// Fails on transport errors and on any non-success status, which is how an
/// expired or revoked token shows up.
pub async fn check_login(
    settings: &ApiSettings,
    credentials: &SessionCredentials,
) -> Res<SessionUser> {
    let url = format!("{}/sessions", settings.api_url.trim_end_matches('/'));
    let response = Client::new()
        .get(&url)
        .header(reqwest::header::AUTHORIZATION, credentials.authorization())
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<SessionUser>().await?)
}

/// Exchanges the refresh token of `credentials` for a new access token.
///
/// When TIDAL does not hand out a new refresh token, the old one is kept.
///
/// # Errors
///
/// Fails without any request when `credentials` has no refresh token or the
/// client id/secret are not configured. Otherwise fails when the token
/// endpoint rejects the grant.
pub async fn refresh(
    settings: &ApiSettings,
    credentials: &SessionCredentials,
) -> Res<SessionCredentials> {
    let refresh_token = credentials
        .refresh_token
        .as_deref()
        .ok_or("No refresh token available")?;

    let response = Client::new()
        .post(token_url(settings))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", settings.require_client_id()?),
            ("client_secret", settings.require_client_secret()?),
        ])
        .send()
        .await?
        .error_for_status()?;

    let token = response.json::<TokenResponse>().await?;
    let mut refreshed = into_credentials(token);
    if refreshed.refresh_token.is_none() {
        refreshed.refresh_token = credentials.refresh_token.clone();
    }
    Ok(refreshed)
}

/// Runs the OAuth device flow.
///
/// Opens the verification link in the default browser (and prints it), then
/// polls the token endpoint every `interval` seconds until the user approves
/// the device or the device code expires.
///
/// # Errors
///
/// Fails when the client id/secret are missing, when the device code expires
/// unapproved, or when the token endpoint answers with an error other than
/// `authorization_pending` / `slow_down`.
pub async fn login_device(settings: &ApiSettings) -> Res<SessionCredentials> {
    let client_id = settings.require_client_id()?;
    let client_secret = settings.require_client_secret()?;
    let client = Client::new();

    let authorization = client
        .post(format!(
            "{}/device_authorization",
            settings.auth_url.trim_end_matches('/')
        ))
        .form(&[("client_id", client_id), ("scope", settings.scope.as_str())])
        .send()
        .await?
        .error_for_status()?
        .json::<DeviceAuthorization>()
        .await?;

    let link = verification_link(&authorization);
    info!(
        "Visit {} to log in, the code will expire in {} seconds",
        link, authorization.expires_in
    );
    if webbrowser::open(&link).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            link
        )
    }

    let pb = utils::spinner("Waiting for authorization...");
    let interval = authorization.interval.max(1);
    let mut remaining = authorization.expires_in as i64;

    while remaining > 0 {
        let response = client
            .post(token_url(settings))
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("device_code", authorization.device_code.as_str()),
                ("grant_type", DEVICE_CODE_GRANT),
                ("scope", settings.scope.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        };

        if response.status().is_success() {
            pb.finish_and_clear();
            let token = response.json::<TokenResponse>().await?;
            return Ok(into_credentials(token));
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        match body["error"].as_str() {
            Some("authorization_pending") | Some("slow_down") | None => {}
            Some(other) => {
                pb.finish_and_clear();
                return Err(format!("Device login failed: {}", other).into());
            }
        }

        remaining -= interval as i64;
        tokio::time::sleep(Duration::from_secs(interval)).await;
    }

    pb.finish_and_clear();
    Err("Device login expired before it was authorized".into())
}

/// Link shown to the user; TIDAL omits the scheme in `verificationUriComplete`.
pub fn verification_link(authorization: &DeviceAuthorization) -> String {
    let uri = &authorization.verification_uri_complete;
    if uri.starts_with("http://") || uri.starts_with("https://") {
        uri.clone()
    } else {
        format!("https://{}", uri)
    }
}

/// Token endpoint under the configured auth URL.
fn token_url(settings: &ApiSettings) -> String {
    format!("{}/token", settings.auth_url.trim_end_matches('/'))
}

/// Credentials for `token`, expiring `expires_in` seconds from now.
fn into_credentials(token: TokenResponse) -> SessionCredentials {
    SessionCredentials {
        token_type: token.token_type,
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expiry_time: Some(Utc::now() + chrono::Duration::seconds(token.expires_in)),
    }
}
