// SPDX-License-Identifier: GPL-3.0-or-later

use crate::decoder::decode;
use crate::error::{Result, SearchError};
use crate::models::SearchResult;
use crate::status::translate_status;
use crate::transport::SearchTransport;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// One-shot state of a [`SearchFuture`].
#[derive(Debug)]
pub enum FutureState<P> {
    /// Submitted; the pending handle has not been consumed yet.
    Pending(P),
    /// `get` has run. The pending handle is released.
    Consumed,
}

/// A submitted search whose result can be retrieved exactly once.
///
/// Returned by [`SearchSession::start`](crate::SearchSession::start). The first
/// call to [`get`](Self::get) waits for the search to finish, decodes the result
/// and releases the pending handle; every later call, including calls made
/// after a failed first attempt, returns [`SearchError::AlreadyConsumed`].
///
/// Only the winning caller receives the result. Dropping an unconsumed future
/// releases the pending handle, but the server-side search keeps running.
pub struct SearchFuture<T: SearchTransport> {
    lookup_id: u64,
    transport: Arc<T>,
    state: Mutex<FutureState<T::Pending>>,
}

impl<T: SearchTransport> SearchFuture<T> {
    pub(crate) fn new(transport: Arc<T>, pending: T::Pending) -> Self {
        Self {
            lookup_id: T::lookup_id(&pending),
            transport,
            state: Mutex::new(FutureState::Pending(pending)),
        }
    }

    /// Server-assigned lookup id, available from construction.
    pub fn lookup_id(&self) -> u64 {
        self.lookup_id
    }

    /// Whether `get` has already taken the pending handle.
    ///
    /// Waits for an in-flight `get` to finish before answering.
    pub async fn is_consumed(&self) -> bool {
        matches!(*self.state.lock().await, FutureState::Consumed)
    }

    /// Wait for the search to complete and return its decoded result.
    ///
    /// Concurrent callers are serialized; exactly one performs the wait.
    /// There is no timeout here: wrap the call in `tokio::time::timeout` for
    /// bounded waiting. Abandoning the wait consumes the future.
    pub async fn get(&self) -> Result<SearchResult> {
        let mut state = self.state.lock().await;

        let pending = match std::mem::replace(&mut *state, FutureState::Consumed) {
            FutureState::Pending(pending) => pending,
            FutureState::Consumed => {
                warn!(target: "search", "lookup {} already consumed", self.lookup_id);
                return Err(SearchError::AlreadyConsumed {
                    lookup_id: self.lookup_id,
                });
            }
        };

        debug!(target: "search", "waiting for lookup {}", self.lookup_id);

        let results = self.transport.fetch(pending).await.map_err(|status| {
            let source = translate_status(&status);
            warn!(
                target: "search",
                "lookup {} failed: {}",
                self.lookup_id,
                source
            );
            SearchError::FetchFailed {
                lookup_id: self.lookup_id,
                source,
            }
        })?;

        let result = decode(results);
        info!(
            target: "search",
            "lookup {} completed with {} matches",
            self.lookup_id,
            result.matches.len()
        );
        Ok(result)
    }
}

impl<T: SearchTransport> fmt::Debug for SearchFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchFuture")
            .field("lookup_id", &self.lookup_id)
            .finish_non_exhaustive()
    }
}
