//! Login URL helper
//!
//! Zero-argument entry point for "give me a URL to redirect the user to".
//! The login endpoint wraps its result in an envelope:
//!
//! ```json
//! {"status": 200, "data": "https://login.example/..."}
//! ```
//!
//! In lenient mode anything other than a well-formed 200 envelope becomes
//! an empty string, which is what existing callers check for. Strict mode
//! surfaces the same cases as errors.

use serde::Deserialize;
use tracing::warn;

use crate::client::AuthClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::login::LoginUrlParams;

/// How `login_url` treats a response that is not a usable 200 envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeMode {
    /// Fall back to an empty string
    #[default]
    Lenient,
    /// Return an error
    Strict,
}

/// Status-tagged response from the login URL endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub status: u16,
    #[serde(default)]
    pub data: Option<String>,
}

/// Builds login URLs from a fixed configuration.
#[derive(Debug, Clone)]
pub struct SessionHelper {
    client: AuthClient,
    claims: String,
    mode: EnvelopeMode,
}

impl SessionHelper {
    /// Build the helper and its client from explicit configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: AuthClient::from_config(config)?,
            claims: config.session.claims.clone(),
            mode: config.envelope_mode(),
        })
    }

    /// Build the helper from `NA_*` environment variables.
    ///
    /// Fails fast when a required variable is missing.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Self::new(&config)
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }

    pub fn mode(&self) -> EnvelopeMode {
        self.mode
    }

    /// Request a login URL with the configured claims and unwrap the envelope.
    ///
    /// Transport failures always propagate. Everything else follows the
    /// configured `EnvelopeMode`.
    pub async fn login_url(&self) -> Result<String> {
        let params = LoginUrlParams::new().claims(self.claims.as_str());

        match self.client.build_login_url(&params).await {
            Ok(body) => parse_login_envelope(&body, self.mode),
            Err(Error::AuthService { status, .. }) if self.mode == EnvelopeMode::Lenient => {
                warn!(status, "login url request rejected, returning empty url");
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Extract the login URL from an envelope body.
pub fn parse_login_envelope(body: &str, mode: EnvelopeMode) -> Result<String> {
    match unwrap_envelope(body) {
        Ok(url) => Ok(url),
        Err(reason) => match mode {
            EnvelopeMode::Lenient => {
                warn!(reason = %reason, "unusable login envelope, returning empty url");
                Ok(String::new())
            }
            EnvelopeMode::Strict => Err(Error::InvalidResponse(reason)),
        },
    }
}

fn unwrap_envelope(body: &str) -> std::result::Result<String, String> {
    let envelope: ApiEnvelope = serde_json::from_str(body)
        .map_err(|e| format!("login envelope is not valid JSON: {e}"))?;

    if envelope.status != 200 {
        return Err(format!("login envelope status {}", envelope.status));
    }

    envelope
        .data
        .ok_or_else(|| "login envelope has no data".to_owned())
}
