use std::{fmt, path::Path};

use ini::Ini;

use crate::{types::SessionCredentials, utils};

pub const SESSION_SECTION: &str = "session";

#[derive(Debug)]
pub enum CredentialsError {
    IoError(std::io::Error),
    ParseError(ini::ParseError),
    MissingKey(&'static str),
    InvalidExpiry(String),
}

impl From<std::io::Error> for CredentialsError {
    fn from(err: std::io::Error) -> Self {
        CredentialsError::IoError(err)
    }
}

impl From<ini::ParseError> for CredentialsError {
    fn from(err: ini::ParseError) -> Self {
        CredentialsError::ParseError(err)
    }
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::IoError(e) => write!(f, "cannot read file: {}", e),
            CredentialsError::ParseError(e) => write!(f, "invalid INI: {}", e),
            CredentialsError::MissingKey(key) => {
                write!(f, "missing [{}] key '{}'", SESSION_SECTION, key)
            }
            CredentialsError::InvalidExpiry(value) => {
                write!(f, "cannot parse expiry_time '{}'", value)
            }
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Reads and renders the `[session]` INI block that carries OAuth credentials.
pub struct CredentialsManager;

impl CredentialsManager {
    pub async fn load(path: &Path) -> Result<SessionCredentials, CredentialsError> {
        let content = async_fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Turns INI text into credentials without touching any session.
    ///
    /// `token_type` and `access_token` are required, `refresh_token` and
    /// `expiry_time` are optional. Empty values count as absent.
    pub fn parse(content: &str) -> Result<SessionCredentials, CredentialsError> {
        let conf = Ini::load_from_str(content)?;
        let section = conf.section(Some(SESSION_SECTION));
        let get = |key: &str| {
            section
                .and_then(|s| s.get(key))
                .map(str::trim)
                .filter(|v| !v.is_empty() && *v != "None")
                .map(str::to_string)
        };

        let token_type = get("token_type").ok_or(CredentialsError::MissingKey("token_type"))?;
        let access_token =
            get("access_token").ok_or(CredentialsError::MissingKey("access_token"))?;
        let expiry_time = match get("expiry_time") {
            Some(value) => Some(
                utils::parse_expiry_time(&value).ok_or(CredentialsError::InvalidExpiry(value))?,
            ),
            None => None,
        };

        Ok(SessionCredentials {
            token_type,
            access_token,
            refresh_token: get("refresh_token"),
            expiry_time,
        })
    }

    /// Renders credentials as an INI document that [`CredentialsManager::parse`]
    /// accepts.
    /// Values without a counterpart (no refresh token, no expiry) are left
    /// empty.
    pub fn render(credentials: &SessionCredentials) -> String {
        format!(
            "[{}]\ntoken_type = {}\naccess_token = {}\nrefresh_token = {}\nexpiry_time = {}\n",
            SESSION_SECTION,
            credentials.token_type,
            credentials.access_token,
            credentials.refresh_token.as_deref().unwrap_or_default(),
            credentials
                .expiry_time
                .as_ref()
                .map(utils::format_expiry_time)
                .unwrap_or_default(),
        )
    }
}
