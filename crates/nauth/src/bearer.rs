//! Single-user bearer session
//!
//! Wraps an `AuthClient` with one remembered bearer token, for callers that
//! want "the current user's token" carried between calls instead of passing
//! it every time. The token is set by a successful code exchange or by
//! passing one to `fetch_user_info`, and is never cleared.

use common::Secret;
use serde::Deserialize;
use tracing::debug;

use crate::client::AuthClient;
use crate::error::{Error, Result};

/// Fields of a token endpoint response this session cares about.
#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
}

/// An `AuthClient` plus the most recently established bearer token.
#[derive(Debug)]
pub struct BearerSession {
    client: AuthClient,
    token: Option<Secret<String>>,
}

impl BearerSession {
    pub fn new(client: AuthClient) -> Self {
        Self {
            client,
            token: None,
        }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }

    /// The stored bearer token, if one has been established.
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose().as_str())
    }

    /// Replace the stored token. Empty tokens are ignored.
    pub fn set_token(&mut self, token: &str) {
        if !token.is_empty() {
            self.token = Some(Secret::from(token));
        }
    }

    /// Exchange an authorization code and remember the access token when the
    /// response carries one. The body is returned verbatim either way.
    pub async fn exchange_token(&mut self, code: &str) -> Result<String> {
        let body = self.client.exchange_token(code).await?;

        match serde_json::from_str::<TokenGrant>(&body) {
            Ok(grant) if !grant.access_token.is_empty() => {
                debug!("stored access token from code exchange");
                self.token = Some(Secret::new(grant.access_token));
            }
            _ => debug!("code exchange response carried no access_token"),
        }

        Ok(body)
    }

    /// Fetch user info, first replacing the stored token with `token` when it
    /// is given and non-empty.
    pub async fn fetch_user_info(&mut self, token: Option<&str>) -> Result<String> {
        if let Some(token) = token {
            self.set_token(token);
        }
        let token = self.token.as_ref().ok_or(Error::MissingToken)?;
        self.client.fetch_user_info(token.expose()).await
    }

    /// Log out with the stored token.
    pub async fn logout(&self) -> Result<String> {
        let token = self.token.as_ref().ok_or(Error::MissingToken)?;
        self.client.logout(token.expose()).await
    }
}
