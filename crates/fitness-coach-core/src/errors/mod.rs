// ABOUTME: Unified error type and error codes for the coach pipeline
// ABOUTME: Model availability, timeout, configuration, and input failures share one AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. Errors carry
//! an [`ErrorCode`] so callers can branch on the failure class (for example to
//! offer a retry on [`ErrorCode::ModelTimeout`]) without string matching.
//!
//! Two failure kinds never surface as `AppError` because they are recovered
//! locally: an empty cleaned chat reply (replaced by a fallback reply) and an
//! unparseable plan line (skipped and reported as a [`PlanLineIssue`]).

mod plan;

pub use plan::PlanLineIssue;

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied unusable input
    InvalidInput = 3000,

    // Model runtime (5000-5999)
    /// Text-generation runtime could not be reached or refused the request
    ModelUnavailable = 5001,
    /// Text-generation runtime did not answer within the request timeout
    ModelTimeout = 5002,
    /// Text-generation runtime answered with a body we could not interpret
    ModelResponseInvalid = 5003,

    // Configuration (6000-6999)
    /// Configuration value present but invalid
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Reading or writing a local file failed
    StorageError = 9002,
    /// Data serialization/deserialization failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ModelUnavailable => "The language model is currently unavailable",
            Self::ModelTimeout => "The language model did not respond in time",
            Self::ModelResponseInvalid => "The language model returned an unreadable response",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the caller may reasonably retry the same request
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ModelUnavailable | Self::ModelTimeout)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::ModelUnavailable => "MODEL_UNAVAILABLE",
            Self::ModelTimeout => "MODEL_TIMEOUT",
            Self::ModelResponseInvalid => "MODEL_RESPONSE_INVALID",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        };
        f.write_str(label)
    }
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
#[error("{}: {message}", .code.description())]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the caller may retry the request that produced this error
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Model runtime unreachable or refusing requests
    #[must_use]
    pub fn model_unavailable(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ModelUnavailable,
            format!("{}: {}", backend.into(), message.into()),
        )
    }

    /// Model runtime exceeded the request timeout
    #[must_use]
    pub fn model_timeout(backend: impl Into<String>, timeout_secs: u64) -> Self {
        Self::new(
            ErrorCode::ModelTimeout,
            format!(
                "{}: no response after {timeout_secs}s, try again",
                backend.into()
            ),
        )
    }

    /// Model runtime answered with something unusable
    #[must_use]
    pub fn model_response_invalid(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ModelResponseInvalid,
            format!("{}: {}", backend.into(), message.into()),
        )
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
