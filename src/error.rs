use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a sequence query.
///
/// Cloneable so that every caller coalesced onto one backend construction
/// receives the same failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed location: {0}")]
    MalformedLocation(String),

    #[error(
        "Cannot request a slice whose start is greater than its end. Start: {start}. End: {end}"
    )]
    InvertedRange { start: u64, end: u64 },

    #[error(
        "{length} is greater than the maximum allowed length of {max}. Request smaller regions of sequence"
    )]
    RangeTooLarge { length: u64, max: u64 },

    #[error("failed to get sequence index for {0}")]
    SystemNotFound(String),

    #[error("failed to fetch sequence: {0}")]
    FetchFailed(String),

    #[error("failed to get subsequence {0}")]
    SequenceEmpty(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl Error {
    /// Stable kebab-case name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedLocation(_) => "malformed-location",
            Error::InvertedRange { .. } => "inverted-range",
            Error::RangeTooLarge { .. } => "range-too-large",
            Error::SystemNotFound(_) => "system-not-found",
            Error::FetchFailed(_) => "fetch-failed",
            Error::SequenceEmpty(_) => "sequence-empty",
        }
    }

    /// Input errors are detected before any I/O and are never worth retrying.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedLocation(_) | Error::InvertedRange { .. } | Error::RangeTooLarge { .. }
        )
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::MalformedLocation(_)
            | Error::InvertedRange { .. }
            | Error::RangeTooLarge { .. } => StatusCode::BAD_REQUEST,
            Error::SystemNotFound(_) | Error::FetchFailed(_) | Error::SequenceEmpty(_) => {
                StatusCode::NOT_FOUND
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}
