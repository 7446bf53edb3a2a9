// SPDX-License-Identifier: GPL-3.0-or-later

//! Client for asynchronous fingerprint metadata searches.
//!
//! This crate provides functionality for:
//! - Submitting a fingerprint search without waiting for it to finish
//! - Retrieving the result exactly once through a [`SearchFuture`]
//! - Decoding matches and their aligned segments into owned values

pub mod decoder;
pub mod error;
pub mod fingerprint;
pub mod future;
pub mod http;
pub mod models;
pub mod session;
pub mod status;
pub mod transport;

pub use error::{Result, SearchError};
pub use fingerprint::Fingerprint;
pub use future::{FutureState, SearchFuture};
pub use http::{HttpTransport, HttpTransportBuilder};
pub use models::{Match, SearchRequest, SearchResult, Segment};
pub use session::SearchSession;
pub use status::{translate_status, Status, StatusCode, StatusError};
pub use transport::{MatchHandle, ResultHandle, SearchTransport};
