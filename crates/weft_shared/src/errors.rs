//! Error results that can be returned from the css parser and its tooling
use crate::byte_stream::Location;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Parser error that defines an error (message) on the given position
#[derive(Clone, Debug, PartialEq)]
pub struct CssError {
    /// Error message
    pub message: String,
    /// Location of the error, if available (during parsing mostly)
    pub location: Option<Location>,
}

impl CssError {
    #[must_use]
    pub fn new(message: &str) -> Self {
        CssError {
            message: message.to_string(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(message: &str, location: Location) -> Self {
        CssError {
            message: message.to_string(),
            location: Some(location),
        }
    }
}

impl Display for CssError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{} at {}", self.message, loc),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CssError {}

pub type CssResult<T> = Result<T, CssError>;

/// Serious errors and errors from third-party libraries
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    IO(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] CssError),

    #[error("utf8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("json parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("there was a problem: {0}")]
    Generic(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location() {
        let err = CssError::with_location("Expected ;", Location::new(3, 7, 40));
        assert_eq!(err.to_string(), "Expected ; at 3:7");
        assert_eq!(CssError::new("boom").to_string(), "boom");

        let wrapped = Error::from(err);
        assert_eq!(wrapped.to_string(), "parse error: Expected ; at 3:7");
    }
}
