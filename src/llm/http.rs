// ABOUTME: Shared HTTP plumbing for the local text-generation backends
// ABOUTME: Client construction and mapping of transport and status failures to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::error;

use crate::config::ModelConfig;
use crate::errors::AppError;

/// Connection timeout for local servers
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Build a client whose overall timeout matches the configured request timeout
pub(super) fn build_client(config: &ModelConfig) -> Result<Client, AppError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")).with_source(e))
}

/// Join a base URL and an endpoint path
pub(super) fn api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Map a failed send to the matching model error
pub(super) fn send_error(
    backend: &'static str,
    base_url: &str,
    timeout: Duration,
    e: reqwest::Error,
) -> AppError {
    error!("Failed to send request to {backend}: {e}");
    if e.is_timeout() {
        AppError::model_timeout(backend, timeout.as_secs()).with_source(e)
    } else if e.is_connect() {
        AppError::model_unavailable(
            backend,
            format!("Cannot connect to {backend}. Is the server running at {base_url}?"),
        )
        .with_source(e)
    } else {
        AppError::model_unavailable(backend, format!("Request failed: {e}")).with_source(e)
    }
}

/// Map a non-success status to the matching model error
pub(super) fn status_error(
    backend: &'static str,
    timeout: Duration,
    status: StatusCode,
    body: &str,
) -> AppError {
    let detail: String = body.chars().take(200).collect();
    match status.as_u16() {
        400 => AppError::invalid_input(format!("{backend} rejected the request: {detail}")),
        404 => AppError::model_unavailable(
            backend,
            format!("Model or endpoint not found: {detail}"),
        ),
        408 | 504 => AppError::model_timeout(backend, timeout.as_secs()),
        500..=599 => AppError::model_unavailable(
            backend,
            format!("Server error ({status}): {detail}"),
        ),
        _ => AppError::model_response_invalid(backend, format!("API error ({status}): {detail}")),
    }
}
