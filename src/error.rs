// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// Transport-level failure (connection refused, timeout, TLS, ...).
    Http(String),
    /// The service answered but refused the operation. Carries the most
    /// readable message available: server message, then raw body, then a
    /// generic fallback chosen by the call site.
    Api(String),
    /// Preference file problems.
    Config(String),
    /// Session state persistence problems.
    State(String),
    /// A navigation target could not be parsed.
    Route(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "Network error: {}", e),
            Error::Api(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::State(e) => write!(f, "State error: {}", e),
            Error::Route(e) => write!(f, "Bad route: {}", e),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::State(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_http_error() {
        let err = Error::Http("connection refused".to_string());
        assert_eq!(format!("{}", err), "Network error: connection refused");
    }

    #[test]
    fn api_error_displays_message_verbatim() {
        let err = Error::Api("Invalid captcha".to_string());
        assert_eq!(format!("{}", err), "Invalid captcha");
    }

    #[test]
    fn from_io_error_produces_state_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::State(message) => assert!(message.contains("boom")),
            _ => panic!("expected State variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config error: bad field");
    }
}
