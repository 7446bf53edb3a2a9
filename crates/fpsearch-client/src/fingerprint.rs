// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Precomputed content fingerprint used as the search query.
///
/// The client treats the payload as an opaque token: it is produced elsewhere
/// and only checked for shape before being sent to the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fingerprint {
    /// Fingerprint payload (base64-encoded).
    pub hash: String,
    /// Duration of media covered by the fingerprint (in seconds).
    pub duration: u32,
    /// Fingerprint algorithm version.
    #[serde(default = "default_algorithm")]
    pub algorithm: u32,
}

fn default_algorithm() -> u32 {
    4
}

fn invalid(reason: &str) -> SearchError {
    SearchError::InvalidArgument(format!("invalid fingerprint: {}", reason))
}

impl Fingerprint {
    pub fn new(hash: impl Into<String>, duration: u32) -> Self {
        Self {
            hash: hash.into(),
            duration,
            algorithm: default_algorithm(),
        }
    }

    /// Override the algorithm version.
    pub fn with_algorithm(mut self, algorithm: u32) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Check that the fingerprint can be submitted.
    ///
    /// The payload must be non-empty base64 (at most two trailing `=`) and the
    /// duration must be non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.hash.is_empty() {
            return Err(invalid("payload is empty"));
        }
        if self.duration == 0 {
            return Err(invalid("duration must be > 0"));
        }

        let body = self.hash.trim_end_matches('=');
        if self.hash.len() - body.len() > 2 {
            return Err(invalid("too much padding"));
        }
        if body.contains('=') {
            return Err(invalid("padding before end of payload"));
        }
        if let Some(c) = body
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '+' || *c == '/'))
        {
            return Err(invalid(&format!("unexpected character {:?}", c)));
        }

        Ok(())
    }
}
