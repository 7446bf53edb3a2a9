//! Scripted in-memory transport that counts live pending handles.

#![allow(dead_code)]

use async_trait::async_trait;
use fpsearch_client::{Fingerprint, MatchHandle, ResultHandle, SearchTransport, Segment, Status};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn segment(query_start: i64, query_end: i64, asset_start: i64, asset_end: i64) -> Segment {
    Segment {
        query_start,
        query_end,
        asset_start,
        asset_end,
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedMatch {
    pub asset_id: u64,
    pub segments: VecDeque<Segment>,
}

impl ScriptedMatch {
    pub fn new(asset_id: u64, segments: Vec<Segment>) -> Self {
        Self {
            asset_id,
            segments: segments.into(),
        }
    }
}

impl MatchHandle for ScriptedMatch {
    fn asset_id(&self) -> u64 {
        self.asset_id
    }

    fn next_segment(&mut self) -> Option<Segment> {
        self.segments.pop_front()
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedResults {
    pub lookup_id: u64,
    pub ugc_id: u64,
    pub matches: VecDeque<ScriptedMatch>,
}

impl ResultHandle for ScriptedResults {
    type Match = ScriptedMatch;

    fn lookup_id(&self) -> u64 {
        self.lookup_id
    }

    fn ugc_id(&self) -> u64 {
        self.ugc_id
    }

    fn next_match(&mut self) -> Option<ScriptedMatch> {
        self.matches.pop_front()
    }
}

/// Pending handle; decrements the live counter when released.
#[derive(Debug)]
pub struct MockPending {
    lookup_id: u64,
    live: Arc<AtomicUsize>,
}

impl Drop for MockPending {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct MockTransport {
    pub lookup_id: u64,
    pub ugc_id: u64,
    pub matches: Vec<ScriptedMatch>,
    pub submit_error: Option<Status>,
    pub fetch_error: Option<Status>,
    pub fetch_delay: Duration,
    pub live: Arc<AtomicUsize>,
    pub submit_calls: Arc<AtomicUsize>,
    pub fetch_calls: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new(lookup_id: u64) -> Self {
        Self {
            lookup_id,
            ugc_id: 0,
            matches: Vec::new(),
            submit_error: None,
            fetch_error: None,
            fetch_delay: Duration::ZERO,
            live: Arc::new(AtomicUsize::new(0)),
            submit_calls: Arc::new(AtomicUsize::new(0)),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_matches(mut self, matches: Vec<ScriptedMatch>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_ugc_id(mut self, ugc_id: u64) -> Self {
        self.ugc_id = ugc_id;
        self
    }

    pub fn failing_submit(mut self, status: Status) -> Self {
        self.submit_error = Some(status);
        self
    }

    pub fn failing_fetch(mut self, status: Status) -> Self {
        self.fetch_error = Some(status);
        self
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }
}

#[async_trait]
impl SearchTransport for MockTransport {
    type Pending = MockPending;
    type Results = ScriptedResults;

    async fn submit(&self, _fingerprint: &Fingerprint) -> Result<MockPending, Status> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);

        // Allocate before the call can fail, so failures must release it.
        self.live.fetch_add(1, Ordering::SeqCst);
        let pending = MockPending {
            lookup_id: self.lookup_id,
            live: Arc::clone(&self.live),
        };

        match &self.submit_error {
            Some(status) => Err(status.clone()),
            None => Ok(pending),
        }
    }

    fn lookup_id(pending: &MockPending) -> u64 {
        pending.lookup_id
    }

    async fn fetch(&self, pending: MockPending) -> Result<ScriptedResults, Status> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }

        if let Some(status) = &self.fetch_error {
            return Err(status.clone());
        }

        Ok(ScriptedResults {
            lookup_id: pending.lookup_id,
            ugc_id: self.ugc_id,
            matches: self.matches.clone().into(),
        })
    }
}
