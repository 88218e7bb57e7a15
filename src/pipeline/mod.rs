// ABOUTME: Request orchestration for coach chat replies and workout plan generation
// ABOUTME: Assembles prompts, calls the generator under a timeout, and cleans the output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach Response Pipeline
//!
//! [`CoachPipeline`] is stateless apart from its shared generator and
//! configuration. Each call receives a read-only [`CoachContext`] owned by
//! the caller and issues exactly one generation request.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitness_coach::config::PipelineConfig;
//! use fitness_coach::llm::GeneratorProvider;
//! use fitness_coach::models::CoachContext;
//! use fitness_coach::pipeline::CoachPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fitness_coach::errors::AppError> {
//!     let generator = Arc::new(GeneratorProvider::from_env()?);
//!     let pipeline = CoachPipeline::new(generator, PipelineConfig::default());
//!     let reply = pipeline.respond(&CoachContext::default(), "What should I train today?").await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

pub mod cleaning;
pub mod plan_parser;
pub mod prompt;

pub use cleaning::{clean_chat_output, clean_plan_output, ChatReply, CHAT_FALLBACK_REPLY};
pub use plan_parser::{parse_plan, PlanParseReport, SkippedPlanLine};
pub use prompt::{build_chat_prompt, build_plan_prompt};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{GenerationConfig, TextGenerator};
use crate::models::CoachContext;

/// Cleaned plan text returned by [`CoachPipeline::generate_plan`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    /// Plan text, possibly empty
    pub text: String,
}

impl GeneratedPlan {
    /// True when the model produced nothing usable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Parse the plan into exercise records
    #[must_use]
    pub fn parse(&self) -> PlanParseReport {
        parse_plan(&self.text)
    }
}

/// Prompt-build, generate, clean pipeline around a shared generator
#[derive(Clone)]
pub struct CoachPipeline {
    generator: Arc<dyn TextGenerator>,
    config: PipelineConfig,
    chat_generation: GenerationConfig,
    plan_generation: GenerationConfig,
}

impl CoachPipeline {
    /// Create a pipeline using the default chat and plan sampling presets
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, config: PipelineConfig) -> Self {
        Self {
            generator,
            config,
            chat_generation: GenerationConfig::chat(),
            plan_generation: GenerationConfig::plan(),
        }
    }

    /// Override the chat sampling configuration
    #[must_use]
    pub fn with_chat_generation(mut self, generation: GenerationConfig) -> Self {
        self.chat_generation = generation;
        self
    }

    /// Override the plan sampling configuration
    #[must_use]
    pub fn with_plan_generation(mut self, generation: GenerationConfig) -> Self {
        self.plan_generation = generation;
        self
    }

    /// Pipeline configuration
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Answer a chat message
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank message, `ModelTimeout` if the
    /// generator exceeds the request timeout, and any error the generator
    /// itself reports. An empty cleaned reply is not an error: the fallback
    /// reply is returned with `used_fallback` set.
    pub async fn respond(&self, context: &CoachContext, message: &str) -> AppResult<ChatReply> {
        if message.trim().is_empty() {
            return Err(AppError::invalid_input("Chat message must not be empty"));
        }

        let span = info_span!(
            "coach_chat",
            request_id = %Uuid::new_v4(),
            generator = self.generator.name(),
            history_turns = context.history.len(),
        );

        async {
            let prompt = build_chat_prompt(context, message, &self.config);
            debug!(prompt_len = prompt.len(), "Assembled chat prompt");

            let raw = self.generate(&prompt, &self.chat_generation).await?;
            let reply = clean_chat_output(&raw, message, &self.config.template);

            info!(
                reply_len = reply.text.len(),
                used_fallback = reply.used_fallback,
                "Chat reply ready"
            );
            Ok::<_, AppError>(reply)
        }
        .instrument(span)
        .await
    }

    /// Generate a workout plan for a free-text request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank request, `ModelTimeout` if the
    /// generator exceeds the request timeout, and any error the generator
    /// itself reports. An empty plan is returned as [`GeneratedPlan::is_empty`].
    pub async fn generate_plan(
        &self,
        context: &CoachContext,
        request: &str,
    ) -> AppResult<GeneratedPlan> {
        if request.trim().is_empty() {
            return Err(AppError::invalid_input("Plan request must not be empty"));
        }

        let span = info_span!(
            "coach_plan",
            request_id = %Uuid::new_v4(),
            generator = self.generator.name(),
        );

        async {
            let prompt = build_plan_prompt(context, request, &self.config);
            debug!(prompt_len = prompt.len(), "Assembled plan prompt");

            let raw = self.generate(&prompt, &self.plan_generation).await?;
            let plan = GeneratedPlan {
                text: clean_plan_output(&raw, &self.config.template),
            };

            if plan.is_empty() {
                warn!("Plan generation produced no usable text");
            } else {
                info!(plan_len = plan.text.len(), "Plan ready");
            }
            Ok::<_, AppError>(plan)
        }
        .instrument(span)
        .await
    }

    async fn generate(&self, prompt: &str, generation: &GenerationConfig) -> AppResult<String> {
        let limit = self.config.request_timeout;
        let result = timeout(limit, self.generator.generate(prompt, generation)).await;

        let Ok(generated) = result else {
            warn!(
                timeout = ?limit,
                "Generator did not respond within the request timeout"
            );
            return Err(AppError::model_timeout(
                self.generator.name(),
                limit.as_secs(),
            ));
        };

        generated.inspect_err(|e| warn!(code = %e.code, "Generation failed: {e}"))
    }
}
