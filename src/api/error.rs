use reqwest::StatusCode;
use thiserror::Error;

/// Shown when the backend gave no usable `message`
pub const GENERIC_FAILURE: &str = "Please try again later";

/// Failure of a single backend call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: StatusCode,
        /// `message` field of the error body, when the backend sent one
        message: Option<String>,
    },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request to {url} was cancelled")]
    Cancelled { url: String },

    #[error("Failed to read upload {path}: {source}")]
    Upload {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Text for the error toast: the backend message when present
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Upload { path, .. } => format!("Could not read {path}"),
            _ => GENERIC_FAILURE.to_owned(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_message() {
        let err = ApiError::Status {
            url: "http://localhost/jobs".into(),
            status: StatusCode::CONFLICT,
            message: Some("Job already booked".into()),
        };
        assert_eq!(err.user_message(), "Job already booked");
        assert_eq!(err.to_string(), "http://localhost/jobs returned 409 Conflict");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Status {
            url: "http://localhost/jobs".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("  ".into()),
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = ApiError::Cancelled {
            url: "http://localhost/jobs".into(),
        };
        assert!(err.is_cancelled());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }
}
