//! Error types for share count lookups

use thiserror::Error;

/// Errors that can occur while fetching a share count
#[derive(Debug, Error)]
pub enum CountError {
    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Provider did not answer within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to provider
    #[error("Failed to connect to provider")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Response body exceeded the configured size cap
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Provider answered, but without the expected field or marker
    #[error("{provider}: bad response: {reason}")]
    BadResponse {
        provider: &'static str,
        reason: String,
    },

    /// Response could not be decoded into the expected shape
    #[error("{provider}: cannot decode response: {reason}")]
    Decode {
        provider: &'static str,
        reason: String,
    },
}

impl CountError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CountError::Timeout
        } else if err.is_connect() {
            CountError::ConnectError(err)
        } else {
            CountError::RequestError(err.to_string())
        }
    }

    pub(crate) fn bad_response(provider: &'static str, reason: impl Into<String>) -> Self {
        CountError::BadResponse {
            provider,
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(provider: &'static str, reason: impl Into<String>) -> Self {
        CountError::Decode {
            provider,
            reason: reason.into(),
        }
    }

    /// True if the outbound call itself failed (no response was parsed)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CountError::ClientBuildError(_)
                | CountError::Timeout
                | CountError::ConnectError(_)
                | CountError::RequestError(_)
        )
    }

    /// True if the caller may reasonably try again
    pub fn is_retryable(&self) -> bool {
        matches!(self, CountError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CountError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            CountError::BodyTooLarge { limit: 1024 }.to_string(),
            "Response body exceeds 1024 bytes"
        );
        assert_eq!(
            CountError::bad_response("pinterest", "count is empty").to_string(),
            "pinterest: bad response: count is empty"
        );
        assert_eq!(
            CountError::decode("stumbleupon", "top level is not an object").to_string(),
            "stumbleupon: cannot decode response: top level is not an object"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert!(CountError::Timeout.is_transport());
        assert!(CountError::Timeout.is_retryable());
        assert!(CountError::RequestError("reset".into()).is_transport());
        assert!(!CountError::RequestError("reset".into()).is_retryable());

        let bad = CountError::bad_response("vkontakte", "pattern not found");
        assert!(!bad.is_transport());
        assert!(!bad.is_retryable());
        assert!(!CountError::BodyTooLarge { limit: 1 }.is_transport());
    }
}
