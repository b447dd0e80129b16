//! N-Auth service constants
//!
//! Endpoint paths are relative to the base URL and carry the versioned
//! `v1/` prefix. The base URL itself is configurable; the value here is the
//! production gateway.

/// Production API gateway for the N-Auth service
pub const DEFAULT_BASE_URL: &str = "https://9497hir2i5.execute-api.us-west-2.amazonaws.com/";

/// Login URL endpoint (GET, unauthenticated)
pub const LOGIN_URL_PATH: &str = "v1/loginurl";

/// Authorization code exchange endpoint (POST, Basic)
pub const TOKEN_PATH: &str = "v1/token";

/// User info endpoint (GET, Bearer)
pub const USER_INFO_PATH: &str = "v1/userinfo";

/// Logout endpoint (POST, Basic)
pub const LOGOUT_PATH: &str = "v1/logout";

/// Token introspection endpoint (POST, Basic)
pub const INTROSPECT_PATH: &str = "v1/introspect";

/// Claims requested when the caller does not specify any
pub const DEFAULT_CLAIMS: &str = "openid";

/// Request timeout applied to every call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
