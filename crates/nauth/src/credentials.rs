//! Registered application credentials
//!
//! The four values identifying a client application to N-Auth. They are
//! validated once when the credentials are built and never change afterwards.
//! The secret only leaves its `Secret` wrapper when the Basic authorization
//! value is computed for a request.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::Secret;

use crate::error::{Error, Result};

/// Client id, secret, redirect URI and environment tag for one application.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: Secret<String>,
    redirect_uri: String,
    environment: String,
}

impl ClientCredentials {
    /// Validate and capture the credentials.
    ///
    /// Fields are checked in declaration order; the first empty one is named
    /// in the returned `InvalidConfiguration` error.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<Secret<String>>,
        redirect_uri: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        let redirect_uri = redirect_uri.into();
        let environment = environment.into();

        if client_id.is_empty() {
            return Err(Error::InvalidConfiguration { field: "client_id" });
        }
        if client_secret.is_empty() {
            return Err(Error::InvalidConfiguration {
                field: "client_secret",
            });
        }
        if redirect_uri.is_empty() {
            return Err(Error::InvalidConfiguration {
                field: "redirect_uri",
            });
        }
        if environment.is_empty() {
            return Err(Error::InvalidConfiguration { field: "env" });
        }

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            environment,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Basic authorization value: `base64(client_id ":" client_secret)`.
    ///
    /// Recomputed on every call.
    pub fn basic_authorization(&self) -> String {
        STANDARD.encode(format!(
            "{}:{}",
            self.client_id,
            self.client_secret.expose()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ClientCredentials {
        ClientCredentials::new("my-app", "s3cret", "https://app.example/cb", "test").unwrap()
    }

    #[test]
    fn accepts_all_fields_present() {
        let creds = credentials();
        assert_eq!(creds.client_id(), "my-app");
        assert_eq!(creds.redirect_uri(), "https://app.example/cb");
        assert_eq!(creds.environment(), "test");
    }

    #[test]
    fn rejects_each_empty_field_by_name() {
        let cases = [
            (("", "s", "r", "e"), "client_id"),
            (("c", "", "r", "e"), "client_secret"),
            (("c", "s", "", "e"), "redirect_uri"),
            (("c", "s", "r", ""), "env"),
        ];
        for ((id, secret, redirect, env), expected) in cases {
            match ClientCredentials::new(id, secret, redirect, env) {
                Err(Error::InvalidConfiguration { field }) => assert_eq!(field, expected),
                other => panic!("expected InvalidConfiguration({expected}), got {other:?}"),
            }
        }
    }

    #[test]
    fn first_empty_field_wins() {
        let err = ClientCredentials::new("", "", "", "").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration { field: "client_id" }
        ));
    }

    #[test]
    fn basic_authorization_matches_known_value() {
        // base64("my-app:s3cret")
        assert_eq!(credentials().basic_authorization(), "bXktYXBwOnMzY3JldA==");
    }

    #[test]
    fn basic_authorization_tracks_each_credential_pair() {
        let other = ClientCredentials::new("my-app", "other", "https://app.example/cb", "test")
            .unwrap();
        assert_ne!(credentials().basic_authorization(), other.basic_authorization());
        // base64("my-app:other")
        assert_eq!(other.basic_authorization(), "bXktYXBwOm90aGVy");
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let debug = format!("{:?}", credentials());
        assert!(!debug.contains("s3cret"), "got: {debug}");
        assert!(debug.contains("[REDACTED]"));
    }
}
