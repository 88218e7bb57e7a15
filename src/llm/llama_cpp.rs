// ABOUTME: llama.cpp server text-generation backend using the /completion endpoint
// ABOUTME: Maps sampling presets onto llama.cpp parameters and echoes the prompt in front of the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # llama.cpp Backend
//!
//! Talks to `llama-server` started with a GGUF instruct model. The server
//! runs a single model, so the configured model name is only used for
//! logging.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::http::{api_url, build_client, send_error, status_error};
use super::{GenerationConfig, TextGenerator};
use crate::config::ModelConfig;
use crate::errors::AppError;

const BACKEND: &str = "llamacpp";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: u32,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    repeat_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
    #[serde(default)]
    tokens_predicted: Option<u32>,
    #[serde(default)]
    stopped_eos: Option<bool>,
}

/// Text generator backed by a llama.cpp HTTP server
pub struct LlamaCppGenerator {
    client: Client,
    base_url: String,
    model: String,
    seed: Option<u64>,
    request_timeout: Duration,
}

impl LlamaCppGenerator {
    /// Create a generator from model configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ModelConfig) -> Result<Self, AppError> {
        let client = build_client(config)?;

        info!(
            "Initializing llama.cpp generator: base_url={}, model={}",
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
}

#[async_trait]
impl TextGenerator for LlamaCppGenerator {
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
        let request = CompletionRequest {
            prompt,
            n_predict: config.max_new_tokens,
            temperature: config.effective_temperature(),
            top_p: config.top_p,
            top_k: config.top_k,
            repeat_penalty: config.repetition_penalty,
            seed: config.seed.or(self.seed),
            stream: false,
        };

        debug!(
            "Sending completion request to {BACKEND}: n_predict={}, temperature={}",
            request.n_predict, request.temperature
        );

        let response = self
            .client
            .post(api_url(&self.base_url, "completion"))
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

        let completion: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse {BACKEND} response: {e}");
            AppError::model_response_invalid(BACKEND, format!("Failed to parse response: {e}"))
                .with_source(e)
        })?;

        debug!(
            "Received response from {BACKEND}: {} chars, tokens={:?}, stopped_eos={:?}",
            completion.content.len(),
            completion.tokens_predicted,
            completion.stopped_eos
        );

        Ok(format!("{prompt}{}", completion.content))
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        debug!("Performing {BACKEND} health check at {}", self.base_url);

        let response = self
            .client
            .get(api_url(&self.base_url, "health"))
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
