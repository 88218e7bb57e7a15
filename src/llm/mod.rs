// ABOUTME: Text-generation runtime abstraction for the coach pipeline
// ABOUTME: Defines the TextGenerator contract, sampling presets, and local HTTP backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Text Generation Service Provider Interface
//!
//! The pipeline talks to a causal language model through [`TextGenerator`].
//! The contract mirrors a raw completion endpoint: the returned text is the
//! full prompt followed by the model's continuation, so the cleaning stages
//! are responsible for cutting the echoed prompt away.
//!
//! ## Key Concepts
//!
//! - **`TextGenerator`**: Async trait implemented by every backend and by test fakes
//! - **`GenerationConfig`**: Sampling knobs with `chat()` and `plan()` presets
//! - **`GeneratorProvider`**: Backend selected at runtime from configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitness_coach::llm::{GenerationConfig, GeneratorProvider, TextGenerator};
//! use fitness_coach::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let generator = GeneratorProvider::from_env()?;
//!     let raw = generator
//!         .generate("<s>[INST] Say hi [/INST]", &GenerationConfig::chat())
//!         .await?;
//!     println!("{raw}");
//!     Ok(())
//! }
//! ```

mod http;
mod llama_cpp;
mod ollama;
pub mod prompts;
mod provider;

pub use llama_cpp::LlamaCppGenerator;
pub use ollama::OllamaGenerator;
pub use provider::GeneratorProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Generation Configuration
// ============================================================================

/// Sampling configuration for one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Upper bound on generated tokens
    pub max_new_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling mass
    pub top_p: f32,
    /// Top-k cutoff, `None` leaves the runtime default
    pub top_k: Option<u32>,
    /// Penalty applied to repeated tokens
    pub repetition_penalty: f32,
    /// Stochastic sampling; `false` requests greedy decoding
    pub do_sample: bool,
    /// Fixed seed for reproducible sampling
    pub seed: Option<u64>,
}

impl GenerationConfig {
    /// Short conversational replies
    #[must_use]
    pub const fn chat() -> Self {
        Self {
            max_new_tokens: 180,
            temperature: 0.7,
            top_p: 0.85,
            top_k: Some(40),
            repetition_penalty: 1.3,
            do_sample: true,
            seed: None,
        }
    }

    /// Multi-line workout plans
    #[must_use]
    pub const fn plan() -> Self {
        Self {
            max_new_tokens: 280,
            temperature: 0.7,
            top_p: 0.9,
            top_k: None,
            repetition_penalty: 1.2,
            do_sample: true,
            seed: None,
        }
    }

    /// Override the token budget
    #[must_use]
    pub const fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Override the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Enable or disable stochastic sampling
    #[must_use]
    pub const fn with_sampling(mut self, do_sample: bool) -> Self {
        self.do_sample = do_sample;
        self
    }

    /// Pin the sampling seed
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Temperature actually sent to a runtime, zero when sampling is off
    #[must_use]
    pub const fn effective_temperature(&self) -> f32 {
        if self.do_sample {
            self.temperature
        } else {
            0.0
        }
    }
}

// ============================================================================
// Generator Trait
// ============================================================================

/// Contract for text-generation runtimes
///
/// Implementations must be safe to share across requests; the pipeline
/// holds one behind an `Arc` for the lifetime of the process.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Runtime identifier used in logs and error messages (e.g. "ollama")
    fn name(&self) -> &'static str;

    /// Model identifier the runtime is asked to use
    fn model(&self) -> &str;

    /// Generate a continuation of `prompt`
    ///
    /// Returns the prompt followed by the continuation.
    async fn generate(&self, prompt: &str, config: &GenerationConfig)
        -> Result<String, AppError>;

    /// Check whether the runtime is reachable
    async fn health_check(&self) -> Result<bool, AppError>;
}
