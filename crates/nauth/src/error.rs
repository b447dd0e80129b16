//! Error types for N-Auth client operations

/// Errors from N-Auth client operations.
///
/// Every public operation reports failures through this type; nothing is
/// retried or swallowed inside the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {field} is missing or invalid")]
    InvalidConfiguration { field: &'static str },

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("auth service returned {status}: {body}")]
    AuthService { status: u16, body: String },

    #[error("no bearer token available")]
    MissingToken,

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Config(#[from] common::Error),
}

/// Result alias for N-Auth operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_names_field() {
        let err = Error::InvalidConfiguration {
            field: "client_secret",
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: client_secret is missing or invalid"
        );
    }

    #[test]
    fn auth_service_carries_status_and_body() {
        let err = Error::AuthService {
            status: 401,
            body: r#"{"error":"invalid_client"}"#.into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"), "got: {msg}");
        assert!(msg.contains("invalid_client"), "got: {msg}");
    }

    #[test]
    fn config_error_is_transparent() {
        let err: Error = common::Error::missing("NA_ENV").into();
        assert_eq!(
            err.to_string(),
            "Configuration error: NA_ENV is required but was not set"
        );
    }
}
