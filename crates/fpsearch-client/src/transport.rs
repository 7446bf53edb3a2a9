// SPDX-License-Identifier: GPL-3.0-or-later

//! Seam between the search protocol and whatever performs the remote calls.

use crate::fingerprint::Fingerprint;
use crate::models::Segment;
use crate::status::Status;
use async_trait::async_trait;

/// Remote side of a metadata search.
///
/// Handles are owned values: dropping a `Pending` or a `Results` releases it.
/// `fetch` takes the pending handle by value, so it is released whatever the
/// outcome of the call.
#[async_trait]
pub trait SearchTransport: Send + Sync + 'static {
    type Pending: Send + 'static;
    type Results: ResultHandle + Send;

    /// Register a search and return its pending handle. Does not wait for matching.
    async fn submit(&self, fingerprint: &Fingerprint) -> Result<Self::Pending, Status>;

    /// Server-assigned lookup id of a pending search.
    fn lookup_id(pending: &Self::Pending) -> u64;

    /// Wait until the search completes and return its result handle.
    async fn fetch(&self, pending: Self::Pending) -> Result<Self::Results, Status>;
}

/// Forward-only cursor over the matches of a completed search.
pub trait ResultHandle {
    type Match: MatchHandle;

    fn lookup_id(&self) -> u64;

    fn ugc_id(&self) -> u64;

    /// Advance to the next match, or `None` once the cursor is exhausted.
    fn next_match(&mut self) -> Option<Self::Match>;
}

/// Forward-only cursor over the segments of one match.
pub trait MatchHandle {
    fn asset_id(&self) -> u64;

    /// Advance to the next segment, or `None` once the cursor is exhausted.
    fn next_segment(&mut self) -> Option<Segment>;
}
