// ABOUTME: Runtime selector over the local text-generation backends
// ABOUTME: Picks Ollama or llama.cpp from configuration and delegates the TextGenerator contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generator Selector
//!
//! Set `COACH_LLM_BACKEND` to choose the runtime:
//! - `ollama` (default): Ollama `/api/generate` in raw mode
//! - `llamacpp`: llama.cpp server `/completion`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitness_coach::config::PipelineConfig;
//! use fitness_coach::llm::GeneratorProvider;
//! use fitness_coach::pipeline::CoachPipeline;
//!
//! fn main() -> Result<(), fitness_coach::errors::AppError> {
//!     let generator = GeneratorProvider::from_env()?;
//!     let _pipeline = CoachPipeline::new(Arc::new(generator), PipelineConfig::default());
//!     Ok(())
//! }
//! ```

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{GenerationConfig, LlamaCppGenerator, OllamaGenerator, TextGenerator};
use crate::config::{LlmBackendType, ModelConfig};
use crate::errors::AppError;

/// Text generator selected at runtime
///
/// Provides one concrete type regardless of which backend is configured, so
/// it can be stored behind `Arc<dyn TextGenerator>` or used directly.
pub enum GeneratorProvider {
    /// Local Ollama server
    Ollama(OllamaGenerator),
    /// Local llama.cpp server
    LlamaCpp(LlamaCppGenerator),
}

impl GeneratorProvider {
    /// Create a generator from environment configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration variable is invalid or the HTTP
    /// client cannot be created.
    pub fn from_env() -> Result<Self, AppError> {
        let config = ModelConfig::from_env()?;
        info!(
            "Initializing text generator: {} (set {} to change)",
            config.backend,
            LlmBackendType::ENV_VAR
        );
        Self::from_config(&config)
    }

    /// Create a generator for an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &ModelConfig) -> Result<Self, AppError> {
        let provider = match config.backend {
            LlmBackendType::Ollama => Self::Ollama(OllamaGenerator::new(config)?),
            LlmBackendType::LlamaCpp => Self::LlamaCpp(LlamaCppGenerator::new(config)?),
        };
        debug!(
            "Generator {} initialized with model: {}",
            provider.name(),
            provider.model()
        );
        Ok(provider)
    }

    /// Backend type of the wrapped generator
    #[must_use]
    pub const fn backend(&self) -> LlmBackendType {
        match self {
            Self::Ollama(_) => LlmBackendType::Ollama,
            Self::LlamaCpp(_) => LlmBackendType::LlamaCpp,
        }
    }
}

impl fmt::Debug for GeneratorProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorProvider")
            .field("backend", &self.name())
            .field("model", &self.model())
            .finish()
    }
}

#[async_trait]
impl TextGenerator for GeneratorProvider {
    fn name(&self) -> &'static str {
        match self {
            Self::Ollama(g) => g.name(),
            Self::LlamaCpp(g) => g.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::Ollama(g) => g.model(),
            Self::LlamaCpp(g) => g.model(),
        }
    }

    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, AppError> {
        match self {
            Self::Ollama(g) => g.generate(prompt, config).await,
            Self::LlamaCpp(g) => g.generate(prompt, config).await,
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        match self {
            Self::Ollama(g) => g.health_check().await,
            Self::LlamaCpp(g) => g.health_check().await,
        }
    }
}
