//! Error types for world-points

use thiserror::Error;

/// Main error type for world-points operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build a geocoding URL: {0}")]
    UrlBuild(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No data was returned")]
    NoData,

    #[error("The data received was not in JSON format")]
    NonJsonFormat,

    #[error("The JSON received was in an unexpected format")]
    InvalidFormat,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Index {index} is out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Message suitable for showing to a user.
    ///
    /// Network failures carry their underlying cause; everything else gets a
    /// generic description.
    pub fn user_message(&self) -> String {
        match self {
            Error::Network(cause) => cause.to_string(),
            Error::UrlBuild(_) => "Failed to build a GeoCoding URL".to_string(),
            Error::IndexOutOfRange { .. } => "That point no longer exists".to_string(),
            Error::InvalidCoordinates(_) => "Those coordinates are not valid".to_string(),
            Error::Config(_) | Error::Storage(_) | Error::Io(_) | Error::Json(_) => {
                "Could not access saved data".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for world-points operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocoding_messages() {
        assert_eq!(Error::NoData.user_message(), "No data was returned");
        assert_eq!(
            Error::NonJsonFormat.user_message(),
            "The data received was not in JSON format"
        );
        assert_eq!(
            Error::InvalidFormat.user_message(),
            "The JSON received was in an unexpected format"
        );
        assert_eq!(
            Error::UrlBuild("relative URL without a base".to_string()).user_message(),
            "Failed to build a GeoCoding URL"
        );
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = Error::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "Index 3 is out of range for 2 points");
    }
}
