// SPDX-License-Identifier: GPL-3.0-or-later

use crate::status::StatusError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to start search: {0}")]
    SubmissionFailed(#[source] StatusError),

    #[error("Failed to fetch result for lookup {lookup_id}: {source}")]
    FetchFailed {
        lookup_id: u64,
        #[source]
        source: StatusError,
    },

    /// `get` was already called on this future. Not transient; never retry.
    #[error("Result for lookup {lookup_id} was already retrieved")]
    AlreadyConsumed { lookup_id: u64 },

    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SearchError {
    /// The status error reported by the service, if this error came from a remote call.
    pub fn status(&self) -> Option<&StatusError> {
        match self {
            SearchError::SubmissionFailed(source) | SearchError::FetchFailed { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
