//! N-Auth client library
//!
//! Thin async client for the N-Auth authorization service: login URL
//! generation, authorization code exchange, user info, logout and token
//! introspection. One call issues one HTTP request; nothing is cached,
//! retried or refreshed.
//!
//! Typical flow:
//! 1. `SessionHelper::login_url()` returns the URL to redirect the user to
//! 2. The service redirects back to `redirect_uri` with a `code`
//! 3. `AuthClient::exchange_token()` trades the code for tokens
//! 4. `AuthClient::fetch_user_info()` reads the user's claims
//! 5. `AuthClient::introspect()` / `AuthClient::logout()` as needed
//!
//! `BearerSession` carries one remembered token across those calls for
//! callers that prefer not to pass it explicitly.

pub mod bearer;
pub mod client;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod login;
pub mod session;

pub use bearer::BearerSession;
pub use client::{AuthClient, ClientOptions};
pub use config::Config;
pub use constants::*;
pub use credentials::ClientCredentials;
pub use error::{Error, Result};
pub use login::LoginUrlParams;
pub use session::{ApiEnvelope, EnvelopeMode, SessionHelper, parse_login_envelope};
