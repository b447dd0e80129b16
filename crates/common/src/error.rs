//! Configuration loading errors

use thiserror::Error;

/// Errors raised while loading or validating client configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Shorthand for a required key that was absent or empty.
    pub fn missing(key: &str) -> Self {
        Self::Config(format!("{key} is required but was not set"))
    }
}

/// Result alias using common Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_names_the_key() {
        let err = Error::missing("NA_CLIENT_ID");
        assert_eq!(
            err.to_string(),
            "Configuration error: NA_CLIENT_ID is required but was not set"
        );
    }

    #[test]
    fn io_error_display_has_prefix() {
        let io_err = Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(
            io_err.to_string().starts_with("I/O error:"),
            "got: {}",
            io_err
        );
    }

    #[test]
    fn toml_error_converts() {
        let parse = toml::from_str::<toml::Table>("not valid {{{{ toml").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Toml(_)), "got: {err:?}");
    }
}
