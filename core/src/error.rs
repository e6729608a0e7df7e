//! Error types for the request executor.
//!
//! # Design
//! The two calling conventions keep separate vocabularies. `NetworkError`
//! belongs to the callback convention and always carries a user-facing
//! message plus an optional status code. `DataError` belongs to the
//! awaitable convention and only distinguishes "bad URL", "not a 200", and
//! "bad body". Neither converts into the other.

use thiserror::Error;

pub const NO_INTERNET_CONNECTION: &str =
    "Please ensure you are connected to the internet and try again.";
pub const SOMETHING_WRONG_WITH_SERVER: &str = "Something went wrong.";
pub const WRONG_URL: &str = "Requested URL is not valid.";
pub const FORBIDDEN: &str = "Access to the requested resource is forbidden.";
pub const INPUT_REQUIRED: &str = "Input is required to search for photos";

/// Failures reported by the callback convention (`execute`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The endpoint string is not a well-formed URL. No request was sent.
    #[error("{}", WRONG_URL)]
    MalformedUrl,

    /// The connectivity check reported no network. Non-terminal: the
    /// request is still issued after this is surfaced.
    #[error("{}", NO_INTERNET_CONNECTION)]
    NoConnectivity,

    /// A 2xx body did not decode into the expected type.
    #[error("{message}")]
    Decode { message: String, status: u16 },

    /// The server answered 403.
    #[error("{}", FORBIDDEN)]
    Forbidden,

    /// The server answered 405.
    #[error("{}", WRONG_URL)]
    WrongUrl,

    /// Any other status, including 404 when no response arrived at all.
    #[error("{}", SOMETHING_WRONG_WITH_SERVER)]
    Server { status: u16 },
}

impl NetworkError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetworkError::MalformedUrl | NetworkError::NoConnectivity => None,
            NetworkError::Decode { status, .. } | NetworkError::Server { status } => Some(*status),
            NetworkError::Forbidden => Some(403),
            NetworkError::WrongUrl => Some(405),
        }
    }

    /// `false` only for the connectivity warning, which is followed by the
    /// real outcome of the call.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NetworkError::NoConnectivity)
    }
}

/// Failures reported by the awaitable convention (`request`, `post_request`).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid URL")]
    InvalidUrl,

    /// Anything other than exactly 200.
    #[error("invalid response (HTTP {status})")]
    InvalidResponse { status: u16 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The request body could not be serialized.
    #[error("request body could not be encoded: {0}")]
    Encoding(String),

    #[error("network failure: {0}")]
    Network(#[from] TransportError),
}

/// The JSON codec could not encode or decode a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CodecError(pub String);

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError(e.to_string())
    }
}

/// The transport never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::new(e.to_string())
    }
}

/// An image-search query was rejected before any request was built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{}", INPUT_REQUIRED)]
    EmptyInput,

    #[error("invalid search base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors from `PhotoSearch::search`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_messages_and_codes() {
        assert_eq!(NetworkError::MalformedUrl.message(), WRONG_URL);
        assert_eq!(NetworkError::MalformedUrl.status_code(), None);
        assert_eq!(NetworkError::NoConnectivity.message(), NO_INTERNET_CONNECTION);
        assert_eq!(NetworkError::WrongUrl.status_code(), Some(405));
        assert_eq!(NetworkError::Forbidden.status_code(), Some(403));
        assert_eq!(NetworkError::Server { status: 502 }.status_code(), Some(502));
        assert_eq!(
            NetworkError::Server { status: 502 }.message(),
            SOMETHING_WRONG_WITH_SERVER
        );
    }

    #[test]
    fn decode_error_keeps_underlying_description() {
        let err = NetworkError::Decode {
            message: "missing field `hits`".to_string(),
            status: 200,
        };
        assert_eq!(err.message(), "missing field `hits`");
        assert_eq!(err.status_code(), Some(200));
    }

    #[test]
    fn only_connectivity_is_non_terminal() {
        assert!(!NetworkError::NoConnectivity.is_terminal());
        assert!(NetworkError::MalformedUrl.is_terminal());
        assert!(NetworkError::Server { status: 404 }.is_terminal());
    }

    #[test]
    fn data_error_display() {
        assert_eq!(
            DataError::InvalidResponse { status: 201 }.to_string(),
            "invalid response (HTTP 201)"
        );
        let err: DataError = TransportError::new("connection refused").into();
        assert_eq!(
            err.to_string(),
            "network failure: transport failure: connection refused"
        );
    }
}
