// ABOUTME: Main library entry point for the fitness coach response pipeline
// ABOUTME: Prompt construction and output cleaning around a locally hosted language model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitness Coach
//!
//! Turns a user message (or a workout plan request), the user's profile,
//! recent workouts, and prior conversation into a prompt for a local
//! instruct model, then cleans the raw completion into either a short chat
//! reply or line-oriented plan text that parses into exercise records.
//!
//! ## Architecture
//!
//! - **Models**: Caller-owned profile, workout, and chat types (`fitness-coach-core`)
//! - **Errors**: Unified `AppError` with `ErrorCode` (`fitness-coach-core`)
//! - **Config**: Environment-driven model and pipeline settings
//! - **LLM**: `TextGenerator` trait with Ollama and llama.cpp backends
//! - **Pipeline**: Prompt assembly, cleaning stages, plan parsing, orchestration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitness_coach::config::{ModelConfig, PipelineConfig};
//! use fitness_coach::errors::AppResult;
//! use fitness_coach::llm::GeneratorProvider;
//! use fitness_coach::models::CoachContext;
//! use fitness_coach::pipeline::CoachPipeline;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let model = ModelConfig::from_env()?;
//!     let generator = Arc::new(GeneratorProvider::from_config(&model)?);
//!     let pipeline = CoachPipeline::new(generator, PipelineConfig::from_model_config(&model));
//!
//!     let plan = pipeline
//!         .generate_plan(&CoachContext::default(), "Give me a leg day workout")
//!         .await?;
//!     let report = plan.parse();
//!     println!("{} exercises, {} skipped", report.accepted(), report.skipped_count());
//!     Ok(())
//! }
//! ```

/// Unified error handling system with standard error codes
pub use fitness_coach_core::errors;

/// Caller-owned data model consumed and produced by the pipeline
pub use fitness_coach_core::models;

/// Environment-driven configuration
pub mod config;

/// Text-generation runtime abstraction and backends
pub mod llm;

/// Tracing subscriber setup
pub mod logging;

/// Prompt assembly, output cleaning, plan parsing, and orchestration
pub mod pipeline;
