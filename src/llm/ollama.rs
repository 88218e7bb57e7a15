// ABOUTME: Ollama text-generation backend using the raw /api/generate endpoint
// ABOUTME: Sends pre-formatted instruction prompts verbatim and echoes them in front of the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ollama Backend
//!
//! Uses `/api/generate` with `raw: true` so Ollama does not apply its own
//! chat template on top of the instruction markup the pipeline already
//! rendered.
//!
//! ## Configuration
//!
//! - `COACH_LLM_BASE_URL`: Base URL (default: <http://localhost:11434>)
//! - `COACH_LLM_MODEL`: Model tag (default: `mistral:7b-instruct-v0.3`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::http::{api_url, build_client, send_error, status_error};
use super::{GenerationConfig, TextGenerator};
use crate::config::ModelConfig;
use crate::errors::AppError;

const BACKEND: &str = "ollama";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    raw: bool,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    repeat_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    eval_count: Option<u32>,
}

// ============================================================================
// Generator Implementation
// ============================================================================

/// Text generator backed by a local Ollama server
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
    seed: Option<u64>,
    request_timeout: Duration,
}

impl OllamaGenerator {
    /// Create a generator from model configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ModelConfig) -> Result<Self, AppError> {
        let client = build_client(config)?;

        info!(
            "Initializing Ollama generator: base_url={}, model={}",
            config.base_url, config.model
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            seed: config.seed,
            request_timeout: config.request_timeout,
        })
    }

    fn options(&self, config: &GenerationConfig) -> OllamaOptions {
        OllamaOptions {
            num_predict: config.max_new_tokens,
            temperature: config.effective_temperature(),
            top_p: config.top_p,
            top_k: config.top_k,
            repeat_penalty: config.repetition_penalty,
            seed: config.seed.or(self.seed),
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt, config), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, AppError> {
        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            raw: true,
            stream: false,
            options: self.options(config),
        };

        debug!(
            "Sending generate request to {BACKEND}: max_new_tokens={}, temperature={}",
            request.options.num_predict, request.options.temperature
        );

        let response = self
            .client
            .post(api_url(&self.base_url, "api/generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(BACKEND, &self.base_url, self.request_timeout, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| send_error(BACKEND, &self.base_url, self.request_timeout, e))?;

        if !status.is_success() {
            return Err(status_error(BACKEND, self.request_timeout, status, &body));
        }

        let generated: OllamaGenerateResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse {BACKEND} response: {e}");
            AppError::model_response_invalid(BACKEND, format!("Failed to parse response: {e}"))
                .with_source(e)
        })?;

        debug!(
            "Received response from {BACKEND}: {} chars, tokens={:?}, done_reason={:?}",
            generated.response.len(),
            generated.eval_count,
            generated.done_reason
        );

        // Raw mode returns only the continuation
        Ok(format!("{prompt}{}", generated.response))
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        debug!("Performing {BACKEND} health check at {}", self.base_url);

        let response = self
            .client
            .get(api_url(&self.base_url, "api/tags"))
            .send()
            .await
            .map_err(|e| send_error(BACKEND, &self.base_url, self.request_timeout, e))?;

        let healthy = response.status().is_success();
        if healthy {
            debug!("{BACKEND} health check passed");
        } else {
            warn!(
                "{BACKEND} health check failed with status: {}",
                response.status()
            );
        }

        Ok(healthy)
    }
}
