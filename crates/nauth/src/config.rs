//! Configuration types and loading
//!
//! Config precedence: env vars > config file > defaults.
//! The client secret is loaded from NA_CLIENT_SECRET or client_secret_file,
//! never stored in the TOML directly to avoid leaking secrets.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_CLAIMS, DEFAULT_TIMEOUT_SECS};
use crate::session::EnvelopeMode;

/// Root configuration
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Registered application identity
#[derive(Debug, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(skip)]
    pub client_secret: Option<Secret<String>>,
    /// Path to a file containing the client secret (alternative to NA_CLIENT_SECRET)
    #[serde(default)]
    pub client_secret_file: Option<PathBuf>,
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default)]
    pub env: String,
}

/// Remote service settings
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Login helper settings
#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_claims")]
    pub claims: String,
    /// Treat malformed or non-200 login envelopes as errors instead of ""
    #[serde(default)]
    pub strict_envelope: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            claims: default_claims(),
            strict_envelope: false,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_claims() -> String {
    DEFAULT_CLAIMS.to_owned()
}

impl Config {
    /// Load configuration from a TOML file, overlay environment variables,
    /// then validate.
    ///
    /// Client secret resolution order:
    /// 1. NA_CLIENT_SECRET env var
    /// 2. client_secret_file path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.overlay(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from defaults and environment variables only.
    pub fn from_env() -> common::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults and an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> common::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.overlay(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve config file path from an explicit path or NAUTH_CONFIG env var.
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        if let Some(p) = explicit {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("NAUTH_CONFIG") {
            return PathBuf::from(p);
        }
        PathBuf::from("nauth.toml")
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }

    /// Envelope handling for the login helper.
    pub fn envelope_mode(&self) -> EnvelopeMode {
        if self.session.strict_envelope {
            EnvelopeMode::Strict
        } else {
            EnvelopeMode::Lenient
        }
    }

    /// Apply variables from `lookup` over the current values. Empty
    /// variables are treated as unset.
    fn overlay<F>(&mut self, lookup: F) -> common::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("NA_CLIENT_ID") {
            self.client.client_id = v;
        }
        if let Some(v) = get("NA_REDIRECT_URI") {
            self.client.redirect_uri = v;
        }
        if let Some(v) = get("NA_ENV") {
            self.client.env = v;
        }
        if let Some(v) = get("NA_CLAIMS") {
            self.session.claims = v;
        }
        if let Some(v) = get("NA_BASE_URL") {
            self.service.base_url = v;
        }
        if let Some(v) = get("NA_TIMEOUT_SECS") {
            self.service.timeout_secs = v.parse().map_err(|_| {
                common::Error::Config(format!("NA_TIMEOUT_SECS must be an integer, got: {v}"))
            })?;
        }
        if let Some(v) = get("NA_STRICT_ENVELOPE") {
            self.session.strict_envelope = match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(common::Error::Config(format!(
                        "NA_STRICT_ENVELOPE must be true or false, got: {v}"
                    )));
                }
            };
        }

        // Env var takes precedence over file
        if let Some(secret) = get("NA_CLIENT_SECRET") {
            self.client.client_secret = Some(Secret::new(secret));
        } else if let Some(ref secret_file) = self.client.client_secret_file {
            let secret = std::fs::read_to_string(secret_file).map_err(|e| {
                common::Error::Config(format!(
                    "failed to read client_secret_file {}: {e}",
                    secret_file.display()
                ))
            })?;
            let secret = secret.trim().to_owned();
            if !secret.is_empty() {
                self.client.client_secret = Some(Secret::new(secret));
            }
        }

        Ok(())
    }

    /// Fail fast on anything the client cannot be built without.
    fn validate(&self) -> common::Result<()> {
        if self.client.client_id.is_empty() {
            return Err(common::Error::missing("client_id (NA_CLIENT_ID)"));
        }
        if self.client.client_secret.as_ref().is_none_or(|s| s.is_empty()) {
            return Err(common::Error::missing(
                "client_secret (NA_CLIENT_SECRET or client_secret_file)",
            ));
        }
        if self.client.redirect_uri.is_empty() {
            return Err(common::Error::missing("redirect_uri (NA_REDIRECT_URI)"));
        }
        if self.client.env.is_empty() {
            return Err(common::Error::missing("env (NA_ENV)"));
        }

        if !self.service.base_url.starts_with("http://")
            && !self.service.base_url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.service.base_url
            )));
        }

        if self.service.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
