//! N-Auth HTTP client
//!
//! One method per service endpoint, each issuing exactly one request:
//! 1. `build_login_url` asks the service for a login URL (no auth)
//! 2. `exchange_token` trades the authorization code for tokens (Basic)
//! 3. `fetch_user_info` reads the user's claims (Bearer)
//! 4. `logout` ends the session behind a token (Basic)
//! 5. `introspect` checks whether an access or id token is valid (Basic)
//!
//! Bodies are returned verbatim on 2xx. The client holds no token state;
//! operations that need a bearer token take it as an argument.

use std::time::Duration;

use common::Secret;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL};
use reqwest::{RequestBuilder, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, INTROSPECT_PATH, LOGIN_URL_PATH, LOGOUT_PATH,
    TOKEN_PATH, USER_INFO_PATH,
};
use crate::credentials::ClientCredentials;
use crate::error::{Error, Result};
use crate::login::LoginUrlParams;

/// Transport settings shared by every request from one client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL all endpoint paths are resolved against
    pub base_url: String,
    /// Total time allowed for each request, connect through body
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Body for the code exchange call.
#[derive(Debug, Serialize)]
struct CodeExchange<'a> {
    code: &'a str,
    redirect_uri: &'a str,
    env: &'a str,
}

/// Body for logout and introspect.
#[derive(Debug, Serialize)]
struct TokenCheck<'a> {
    token: &'a str,
    env: &'a str,
}

/// Client for one registered N-Auth application.
#[derive(Debug, Clone)]
pub struct AuthClient {
    credentials: ClientCredentials,
    base_url: Url,
    http: reqwest::Client,
}

impl AuthClient {
    /// Validate credentials and build a client against the production base URL.
    ///
    /// Fails with `InvalidConfiguration` naming the first empty argument.
    /// Performs no network activity.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        environment: &str,
    ) -> Result<Self> {
        let credentials =
            ClientCredentials::new(client_id, client_secret, redirect_uri, environment)?;
        Self::with_options(credentials, ClientOptions::default())
    }

    /// Build a client with explicit transport options.
    ///
    /// A zero timeout would fail every request, so it is rejected here.
    pub fn with_options(credentials: ClientCredentials, options: ClientOptions) -> Result<Self> {
        let base_url = parse_base_url(&options.base_url)?;
        if options.timeout.is_zero() {
            return Err(Error::InvalidConfiguration { field: "timeout" });
        }

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::Transport(format!("building HTTP client: {e}")))?;

        debug!(
            base_url = %base_url,
            client_id = credentials.client_id(),
            env = credentials.environment(),
            "auth client ready"
        );

        Ok(Self {
            credentials,
            base_url,
            http,
        })
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = ClientCredentials::new(
            config.client.client_id.clone(),
            config
                .client
                .client_secret
                .clone()
                .unwrap_or_else(|| Secret::from("")),
            config.client.redirect_uri.clone(),
            config.client.env.clone(),
        )?;
        Self::with_options(
            credentials,
            ClientOptions {
                base_url: config.service.base_url.clone(),
                timeout: config.timeout(),
            },
        )
    }

    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request a login URL.
    ///
    /// The body is normally an envelope `{"status": 200, "data": "<url>"}`;
    /// interpreting it is left to the caller (see `session::parse_login_envelope`).
    pub async fn build_login_url(&self, params: &LoginUrlParams) -> Result<String> {
        let request = self
            .http
            .get(self.endpoint(LOGIN_URL_PATH)?)
            .query(&params.query_pairs(&self.credentials));

        self.send(LOGIN_URL_PATH, request).await
    }

    /// Exchange an authorization code received on the redirect URI for tokens.
    pub async fn exchange_token(&self, code: &str) -> Result<String> {
        let body = CodeExchange {
            code,
            redirect_uri: self.credentials.redirect_uri(),
            env: self.credentials.environment(),
        };
        let request = self.post_basic(TOKEN_PATH, &body)?;
        self.send(TOKEN_PATH, request).await
    }

    /// Fetch user info for the given bearer token.
    ///
    /// `client_id` is sent so the service can include application memberships.
    pub async fn fetch_user_info(&self, token: &str) -> Result<String> {
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        let request = self
            .http
            .get(self.endpoint(USER_INFO_PATH)?)
            .bearer_auth(token)
            .query(&[
                ("env", self.credentials.environment()),
                ("client_id", self.credentials.client_id()),
            ]);

        self.send(USER_INFO_PATH, request).await
    }

    /// Log out the session behind `token`.
    pub async fn logout(&self, token: &str) -> Result<String> {
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        let body = TokenCheck {
            token,
            env: self.credentials.environment(),
        };
        let request = self.post_basic(LOGOUT_PATH, &body)?;
        self.send(LOGOUT_PATH, request).await
    }

    /// Check the validity of an access token or id token.
    pub async fn introspect(&self, token: &str) -> Result<String> {
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        let body = TokenCheck {
            token,
            env: self.credentials.environment(),
        };
        let request = self.post_basic(INTROSPECT_PATH, &body)?;
        self.send(INTROSPECT_PATH, request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|_| Error::InvalidConfiguration { field: "base_url" })
    }

    /// POST with Basic client authentication and a JSON body.
    fn post_basic<T: Serialize>(&self, path: &str, body: &T) -> Result<RequestBuilder> {
        Ok(self
            .http
            .post(self.endpoint(path)?)
            .header(
                AUTHORIZATION,
                format!("Basic {}", self.credentials.basic_authorization()),
            )
            .header(CACHE_CONTROL, "no-cache")
            .json(body))
    }

    async fn send(&self, path: &'static str, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{path} request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("reading {path} response: {e}")))?;

        if !status.is_success() {
            warn!(
                endpoint = path,
                status = status.as_u16(),
                "auth service returned error status"
            );
            return Err(Error::AuthService {
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            endpoint = path,
            status = status.as_u16(),
            bytes = body.len(),
            "auth service request completed"
        );
        Ok(body)
    }
}

/// Parse the base URL, forcing a trailing slash so endpoint paths append
/// rather than replace the last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };

    let url =
        Url::parse(&normalized).map_err(|_| Error::InvalidConfiguration { field: "base_url" })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::InvalidConfiguration { field: "base_url" });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AuthClient {
        AuthClient::new("app", "secret", "https://app.example/cb", "test").unwrap()
    }

    #[test]
    fn new_uses_production_base_url() {
        assert_eq!(client().base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn new_rejects_empty_fields() {
        let err = AuthClient::new("app", "secret", "https://app.example/cb", "").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { field: "env" }));
    }

    #[test]
    fn endpoints_resolve_under_base_path() {
        let creds = ClientCredentials::new("app", "secret", "r", "test").unwrap();
        let client = AuthClient::with_options(
            creds,
            ClientOptions {
                base_url: "https://auth.example/stage".into(),
                ..ClientOptions::default()
            },
        )
        .unwrap();

        assert_eq!(
            client.endpoint(TOKEN_PATH).unwrap().as_str(),
            "https://auth.example/stage/v1/token"
        );
        assert_eq!(
            client.endpoint(LOGIN_URL_PATH).unwrap().as_str(),
            "https://auth.example/stage/v1/loginurl"
        );
    }

    #[test]
    fn base_url_must_be_http() {
        for bad in ["auth.example", "ftp://auth.example/", ""] {
            let creds = ClientCredentials::new("app", "secret", "r", "test").unwrap();
            let result = AuthClient::with_options(
                creds,
                ClientOptions {
                    base_url: bad.into(),
                    ..ClientOptions::default()
                },
            );
            assert!(
                matches!(result, Err(Error::InvalidConfiguration { field: "base_url" })),
                "{bad:?} must be rejected"
            );
        }
    }

    #[test]
    fn zero_timeout_rejected() {
        let creds = ClientCredentials::new("app", "secret", "r", "test").unwrap();
        let result = AuthClient::with_options(
            creds,
            ClientOptions {
                timeout: Duration::ZERO,
                ..ClientOptions::default()
            },
        );
        assert!(
            matches!(result, Err(Error::InvalidConfiguration { field: "timeout" })),
            "zero timeout must be rejected"
        );
    }

    #[tokio::test]
    async fn token_operations_reject_empty_token() {
        let client = client();
        assert!(matches!(
            client.fetch_user_info("").await,
            Err(Error::MissingToken)
        ));
        assert!(matches!(client.logout("").await, Err(Error::MissingToken)));
        assert!(matches!(
            client.introspect("").await,
            Err(Error::MissingToken)
        ));
    }

    #[test]
    fn default_options_use_thirty_second_timeout() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
    }
}
