// SPDX-License-Identifier: GPL-3.0-or-later

use crate::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};

/// Parameters of a metadata search. Only a fingerprint is supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub fingerprint: Fingerprint,
}

impl SearchRequest {
    pub fn new(fingerprint: Fingerprint) -> Self {
        Self { fingerprint }
    }
}

/// Decoded result of a completed search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Server-assigned identifier of the search, for diagnostics.
    pub lookup_id: u64,
    /// Identifier of the user-generated content the fingerprint came from.
    pub ugc_id: u64,
    /// Matches in server (relevance) order.
    pub matches: Vec<Match>,
}

/// A reference asset matched by the query, with its aligned segments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Match {
    pub asset_id: u64,
    pub segments: Vec<Segment>,
}

/// Aligned interval pair between query and asset, in the service's time unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    pub query_start: i64,
    pub query_end: i64,
    pub asset_start: i64,
    pub asset_end: i64,
}
