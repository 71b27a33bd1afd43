use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::datapoint::MIN_PARAGRAPHS;

/// Failure reaching the API or a non-200 answer from it.
///
/// `url` never includes the query string, so the API key stays out of
/// error messages and logs.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{url}: unexpected status code {status}")]
    Status { url: String, status: StatusCode },

    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Status code of a non-200 response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network { .. } => None,
        }
    }
}

/// A decoded regional forecast that is too small to build a summary from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("regional forecast contains no forecast periods")]
    NoPeriods,

    #[error(
        "regional forecast period has {found} paragraphs, at least {} are required",
        MIN_PARAGRAPHS
    )]
    TooFewParagraphs { found: usize },
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to decode {resource} JSON")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

pub type Result<T, E = ForecastError> = std::result::Result<T, E>;
