// ABOUTME: Environment-driven configuration for the model runtime and pipeline
// ABOUTME: Resolves backend, endpoint, model, timeout, and windowing defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Configuration
//!
//! Configuration is environment-only. Every variable has a default so a
//! local Ollama install with the Mistral instruct model works without any
//! setup:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `COACH_LLM_BACKEND` | `ollama` |
//! | `COACH_LLM_BASE_URL` | backend specific |
//! | `COACH_LLM_MODEL` | `mistral:7b-instruct-v0.3` |
//! | `COACH_LLM_TIMEOUT_SECS` | `120` |
//! | `COACH_LLM_SEED` | unset (stochastic sampling) |

mod types;

pub use types::{LlmBackendType, LogLevel};

use std::env;
use std::time::Duration;

use crate::errors::{AppError, AppResult};
use crate::llm::prompts::InstructionTemplate;

/// Default model tag, the 4-bit Mistral 7B instruct build
pub const DEFAULT_MODEL: &str = "mistral:7b-instruct-v0.3";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Prior turns included in a chat prompt (three exchanges)
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

/// Logged workouts summarised into a prompt
pub const DEFAULT_WORKOUT_WINDOW: usize = 5;

/// Model runtime connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Which local runtime to talk to
    pub backend: LlmBackendType,
    /// Runtime base URL without a trailing path
    pub base_url: String,
    /// Model identifier understood by the runtime
    pub model: String,
    /// Upper bound for one generation call
    pub request_timeout: Duration,
    /// Fixed sampling seed, `None` keeps sampling stochastic
    pub seed: Option<u64>,
}

impl ModelConfig {
    /// Defaults for a backend
    #[must_use]
    pub fn for_backend(backend: LlmBackendType) -> Self {
        Self {
            backend,
            base_url: backend.default_base_url().to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            seed: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `COACH_LLM_TIMEOUT_SECS` is not a
    /// positive integer or `COACH_LLM_SEED` is not an unsigned integer.
    pub fn from_env() -> AppResult<Self> {
        let backend = LlmBackendType::from_env();
        let mut config = Self::for_backend(backend);

        if let Some(base_url) = non_empty_var(LlmBackendType::BASE_URL_ENV_VAR) {
            config.base_url = base_url.trim_end_matches('/').to_owned();
        }
        if let Some(model) = non_empty_var(LlmBackendType::MODEL_ENV_VAR) {
            config.model = model;
        }
        if let Some(raw) = non_empty_var(LlmBackendType::TIMEOUT_SECS_ENV_VAR) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::config(format!(
                        "{} must be a positive number of seconds, got '{raw}'",
                        LlmBackendType::TIMEOUT_SECS_ENV_VAR
                    ))
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = non_empty_var(LlmBackendType::SEED_ENV_VAR) {
            let seed = raw.parse::<u64>().map_err(|e| {
                AppError::config(format!(
                    "{} must be an unsigned integer, got '{raw}'",
                    LlmBackendType::SEED_ENV_VAR
                ))
                .with_source(e)
            })?;
            config.seed = Some(seed);
        }

        Ok(config)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::for_backend(LlmBackendType::default())
    }
}

/// Request shaping shared by every pipeline call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Upper bound for one generation call, enforced by the pipeline
    pub request_timeout: Duration,
    /// Number of prior turns flattened into chat prompts
    pub history_window: usize,
    /// Number of recent workouts summarised into prompts
    pub workout_window: usize,
    /// Instruction markup expected by the model
    pub template: InstructionTemplate,
}

impl PipelineConfig {
    /// Pipeline settings matching a model configuration
    #[must_use]
    pub fn from_model_config(model: &ModelConfig) -> Self {
        Self {
            request_timeout: model.request_timeout,
            ..Self::default()
        }
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            history_window: DEFAULT_HISTORY_WINDOW,
            workout_window: DEFAULT_WORKOUT_WINDOW,
            template: InstructionTemplate::mistral(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
