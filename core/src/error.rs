//! Error types for the prediction client.
//!
//! # Design
//! Three layers: `TransportError` is what a host reports when no response
//! arrived, `ApiError` is what request building and response parsing can
//! fail with, and `SubmitError` is what a session operation hands back to the
//! UI. Every network-class failure collapses into `SubmitError::Network`, so
//! the user sees a single notice whether the server was unreachable, replied
//! with garbage, or (under the strict status policy) replied with an error
//! status.

/// Notice shown when submit is called with no input.
pub const VALIDATION_NOTICE: &str = "Please enter a YouTube URL";
/// Notice shown for every network-class failure.
pub const NETWORK_NOTICE: &str = "Error fetching prediction";
/// Notice shown when a submit overlaps an outstanding request.
pub const IN_FLIGHT_NOTICE: &str = "A prediction is already in progress";

/// Failure to obtain any response from the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    /// The response head arrived but the body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Errors returned by `PredictClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx status, only reported under `StatusPolicy::RequireSuccess`.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors returned by `Session` operations.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The input was empty. No request was sent.
    #[error("no URL entered")]
    Validation,

    /// Another submission is still outstanding. No request was sent.
    #[error("a request is already pending")]
    InFlight,

    /// A completion arrived for a submission that is no longer in flight.
    #[error("completion for a superseded submission")]
    Stale,

    #[error("prediction request failed: {0}")]
    Network(#[from] ApiError),
}

impl SubmitError {
    /// The short human-readable text surfaced to the user.
    pub fn notice(&self) -> &'static str {
        match self {
            SubmitError::Validation => VALIDATION_NOTICE,
            SubmitError::InFlight => IN_FLIGHT_NOTICE,
            SubmitError::Stale | SubmitError::Network(_) => NETWORK_NOTICE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failures_share_one_notice() {
        let unreachable = SubmitError::Network(ApiError::Transport(TransportError::Connection(
            "refused".to_string(),
        )));
        let garbage = SubmitError::Network(ApiError::DeserializationError("eof".to_string()));
        let status = SubmitError::Network(ApiError::HttpError {
            status: 500,
            body: String::new(),
        });
        assert_eq!(unreachable.notice(), NETWORK_NOTICE);
        assert_eq!(garbage.notice(), NETWORK_NOTICE);
        assert_eq!(status.notice(), NETWORK_NOTICE);
    }

    #[test]
    fn validation_has_its_own_notice() {
        assert_eq!(SubmitError::Validation.notice(), VALIDATION_NOTICE);
    }

    #[test]
    fn transport_error_converts_into_api_error() {
        let err: ApiError = TransportError::Timeout.into();
        assert!(matches!(err, ApiError::Transport(TransportError::Timeout)));
        assert_eq!(err.to_string(), "request timed out");
    }
}
