// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns a completed result handle into an owned [`SearchResult`].

use crate::models::{Match, SearchResult, Segment};
use crate::transport::{MatchHandle, ResultHandle};
use tracing::trace;

/// Iterator over the matches of a result handle, in server order.
pub struct Matches<'a, R: ResultHandle> {
    handle: &'a mut R,
    done: bool,
}

impl<'a, R: ResultHandle> Matches<'a, R> {
    pub fn new(handle: &'a mut R) -> Self {
        Self {
            handle,
            done: false,
        }
    }
}

impl<R: ResultHandle> Iterator for Matches<'_, R> {
    type Item = R::Match;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.handle.next_match();
        self.done = next.is_none();
        next
    }
}

/// Iterator over the segments of one match, in server order.
pub struct Segments<'a, M: MatchHandle> {
    handle: &'a mut M,
    done: bool,
}

impl<'a, M: MatchHandle> Segments<'a, M> {
    pub fn new(handle: &'a mut M) -> Self {
        Self {
            handle,
            done: false,
        }
    }
}

impl<M: MatchHandle> Iterator for Segments<'_, M> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.handle.next_segment();
        self.done = next.is_none();
        next
    }
}

/// Walk a completed result handle and materialize it.
///
/// The handle is consumed, so the returned value holds no reference to it.
pub fn decode<R: ResultHandle>(mut handle: R) -> SearchResult {
    let lookup_id = handle.lookup_id();
    let ugc_id = handle.ugc_id();

    let matches: Vec<Match> = Matches::new(&mut handle)
        .map(|mut m| {
            let asset_id = m.asset_id();
            let segments: Vec<Segment> = Segments::new(&mut m).collect();
            trace!(
                target: "search",
                "decoded match {} with {} segments",
                asset_id,
                segments.len()
            );
            Match { asset_id, segments }
        })
        .collect();

    SearchResult {
        lookup_id,
        ugc_id,
        matches,
    }
}
