//! Login URL request parameters
//!
//! The login endpoint takes the client's identity plus a handful of flow
//! options as query parameters. `client_id`, `redirect_uri`, `env`, `claims`
//! and `is_implicit` are always sent; `return_id`, `state` and `skip_iwa` are
//! only sent when set, so the service applies its own defaults otherwise.
//!
//! Set flags go on the wire as `1`. `is_implicit` is always present and is
//! written `false`/`true`, since the service documents it as a string.

use crate::constants::DEFAULT_CLAIMS;
use crate::credentials::ClientCredentials;

/// Options for one login URL request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUrlParams {
    /// Space separated claims for the later userinfo call, e.g. `openid profile`
    pub claims: String,
    /// `false` for the authorization code flow
    pub is_implicit: bool,
    /// Ask for an id_token alongside the access token
    pub return_id: bool,
    /// Opaque value echoed back to the redirect URI
    pub state: String,
    /// Skip the integrated Windows auth (SSO) check and force a credential prompt
    pub skip_iwa: bool,
}

impl Default for LoginUrlParams {
    fn default() -> Self {
        Self {
            claims: DEFAULT_CLAIMS.to_owned(),
            is_implicit: false,
            return_id: false,
            state: String::new(),
            skip_iwa: false,
        }
    }
}

impl LoginUrlParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claims(mut self, claims: impl Into<String>) -> Self {
        self.claims = claims.into();
        self
    }

    pub fn implicit(mut self, is_implicit: bool) -> Self {
        self.is_implicit = is_implicit;
        self
    }

    pub fn return_id(mut self, return_id: bool) -> Self {
        self.return_id = return_id;
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn skip_iwa(mut self, skip_iwa: bool) -> Self {
        self.skip_iwa = skip_iwa;
        self
    }

    /// Query pairs for the login endpoint, in a stable order.
    pub fn query_pairs(&self, credentials: &ClientCredentials) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("client_id", credentials.client_id().to_owned()),
            ("redirect_uri", credentials.redirect_uri().to_owned()),
            ("env", credentials.environment().to_owned()),
            ("claims", self.claims.clone()),
            ("is_implicit", self.is_implicit.to_string()),
        ];

        if self.return_id {
            query.push(("return_id", "1".to_owned()));
        }
        if !self.state.is_empty() {
            query.push(("state", self.state.clone()));
        }
        if self.skip_iwa {
            query.push(("skip_iwa", "1".to_owned()));
        }

        query
    }
}
