use thiserror::Error;

use crate::display::TransportError;

/// Everything that can stop one fetch-and-dispatch cycle. None of these are
/// fatal: the selection loop logs them and keeps running.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("price source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("malformed price response: {0}")]
    MalformedResponse(String),

    #[error("display write failed: {0}")]
    TransportWrite(#[from] TransportError),
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::MalformedResponse(value.to_string())
        } else {
            Self::SourceUnavailable(value.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedResponse(value.to_string())
    }
}
