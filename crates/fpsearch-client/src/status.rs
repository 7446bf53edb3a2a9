// SPDX-License-Identifier: GPL-3.0-or-later

//! Raw transport status and its translation into typed errors.
//!
//! Transports report failures as a [`Status`]: a numeric code plus a message.
//! [`translate_status`] is the only place that interprets those codes.

use std::fmt;
use thiserror::Error;

/// Raw failure status as reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: i32,
    pub message: String,
}

impl Status {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn from_code(code: StatusCode, message: impl Into<String>) -> Self {
        Self::new(code.as_raw(), message)
    }
}

/// Typed failure category of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    DeadlineExceeded,
    ConnectionError,
    NotInitialized,
    InvalidInput,
    Unauthenticated,
    NotFound,
    Cancelled,
    InternalError,
    Unknown(i32),
}

impl StatusCode {
    pub fn from_raw(code: i32) -> Self {
        match code {
            1 => StatusCode::DeadlineExceeded,
            2 => StatusCode::ConnectionError,
            3 => StatusCode::NotInitialized,
            4 => StatusCode::InvalidInput,
            5 => StatusCode::Unauthenticated,
            6 => StatusCode::NotFound,
            7 => StatusCode::Cancelled,
            8 => StatusCode::InternalError,
            other => StatusCode::Unknown(other),
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            StatusCode::DeadlineExceeded => 1,
            StatusCode::ConnectionError => 2,
            StatusCode::NotInitialized => 3,
            StatusCode::InvalidInput => 4,
            StatusCode::Unauthenticated => 5,
            StatusCode::NotFound => 6,
            StatusCode::Cancelled => 7,
            StatusCode::InternalError => 8,
            StatusCode::Unknown(code) => code,
        }
    }

    /// Whether the failure is transient. The client itself never retries.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            StatusCode::DeadlineExceeded | StatusCode::ConnectionError
        )
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::DeadlineExceeded => f.write_str("deadline exceeded"),
            StatusCode::ConnectionError => f.write_str("connection error"),
            StatusCode::NotInitialized => f.write_str("not initialized"),
            StatusCode::InvalidInput => f.write_str("invalid input"),
            StatusCode::Unauthenticated => f.write_str("unauthenticated"),
            StatusCode::NotFound => f.write_str("not found"),
            StatusCode::Cancelled => f.write_str("cancelled"),
            StatusCode::InternalError => f.write_str("internal error"),
            StatusCode::Unknown(code) => write!(f, "unknown status {}", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct StatusError {
    pub code: StatusCode,
    pub message: String,
}

impl StatusError {
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

/// Translate a raw transport status into a typed error.
pub fn translate_status(status: &Status) -> StatusError {
    StatusError {
        code: StatusCode::from_raw(status.code),
        message: status.message.clone(),
    }
}
