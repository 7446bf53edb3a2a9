// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Result, SearchError};
use crate::future::SearchFuture;
use crate::models::{SearchRequest, SearchResult};
use crate::status::translate_status;
use crate::transport::SearchTransport;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for metadata searches over a transport.
#[derive(Debug)]
pub struct SearchSession<T: SearchTransport> {
    transport: Arc<T>,
}

impl<T: SearchTransport> Clone for SearchSession<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: SearchTransport> SearchSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a metadata search.
    ///
    /// Performs one remote call to register the search and returns as soon as
    /// the service has assigned a lookup id; it does not wait for matching.
    ///
    /// # Errors
    /// - `InvalidArgument` if the request fingerprint is malformed.
    /// - `SubmissionFailed` if the service rejected or could not register the search.
    ///
    /// # Example
    /// ```no_run
    /// # use fpsearch_client::{Fingerprint, HttpTransport, SearchRequest, SearchSession};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let session = SearchSession::new(HttpTransport::new("https://search.example.com/v1")?);
    /// let request = SearchRequest::new(Fingerprint::new("AQADvEWZ==", 120));
    /// let future = session.start(&request).await?;
    /// let result = future.get().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start(&self, request: &SearchRequest) -> Result<SearchFuture<T>> {
        request.fingerprint.validate()?;

        debug!(
            target: "search",
            "submitting search ({}s fingerprint)",
            request.fingerprint.duration
        );

        let pending = self
            .transport
            .submit(&request.fingerprint)
            .await
            .map_err(|status| SearchError::SubmissionFailed(translate_status(&status)))?;

        let future = SearchFuture::new(Arc::clone(&self.transport), pending);
        info!(target: "search", "search started with lookup id {}", future.lookup_id());
        Ok(future)
    }

    /// Start a search and wait for its result.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult> {
        self.start(request).await?.get().await
    }
}
