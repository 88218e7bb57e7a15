// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a scripted fake text generator and sample coach contexts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `fitness_coach`
//!
//! Tests never sample a real model: [`ScriptedGenerator`] honours the
//! prompt-plus-continuation contract with fixed text, fails on demand, or
//! sleeps past the pipeline timeout.

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use fitness_coach::config::PipelineConfig;
use fitness_coach::errors::{AppError, ErrorCode};
use fitness_coach::llm::{GenerationConfig, TextGenerator};
use fitness_coach::models::{ChatTurn, CoachContext, ProfileContext, WorkoutSummaryEntry};
use fitness_coach::pipeline::CoachPipeline;
use tokio::time::sleep;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// What the fake generator does when called
#[derive(Debug, Clone)]
pub enum Script {
    /// Return the prompt followed by this continuation
    Continuation(String),
    /// Return exactly this text, ignoring the prompt
    Raw(String),
    /// Fail with this error code
    Fail(ErrorCode),
    /// Sleep, then return the prompt with an empty continuation
    Stall(Duration),
}

/// Deterministic stand-in for a model runtime
pub struct ScriptedGenerator {
    script: Script,
    prompts: Mutex<Vec<String>>,
    configs: Mutex<Vec<GenerationConfig>>,
}

impl ScriptedGenerator {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            prompts: Mutex::new(Vec::new()),
            configs: Mutex::new(Vec::new()),
        })
    }

    pub fn continuation(text: &str) -> Arc<Self> {
        Self::new(Script::Continuation(text.to_owned()))
    }

    pub fn raw(text: &str) -> Arc<Self> {
        Self::new(Script::Raw(text.to_owned()))
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Sampling configurations received so far
    pub fn configs(&self) -> Vec<GenerationConfig> {
        self.configs.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.configs.lock().unwrap().push(config.clone());

        match &self.script {
            Script::Continuation(text) => Ok(format!("{prompt}{text}")),
            Script::Raw(text) => Ok(text.clone()),
            Script::Fail(code) => Err(AppError::new(*code, "scripted failure")),
            Script::Stall(duration) => {
                sleep(*duration).await;
                Ok(prompt.to_owned())
            }
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Pipeline around a scripted generator with default configuration
pub fn pipeline_with(generator: &Arc<ScriptedGenerator>) -> CoachPipeline {
    init_test_logging();
    CoachPipeline::new(generator.clone(), PipelineConfig::default())
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn sample_profile() -> ProfileContext {
    ProfileContext {
        name: Some("Sam".to_owned()),
        age: Some(30),
        experience_level: Some("Beginner".to_owned()),
        fitness_goal: Some("Build strength".to_owned()),
        injuries: Some("Left knee".to_owned()),
        preferences: Some("Morning sessions".to_owned()),
        body_weight: Some(180.0),
        height: Some("5'10\"".to_owned()),
    }
}

pub fn workout(exercise: &str, sets: u32, reps: u32, weight: f64, day: u32) -> WorkoutSummaryEntry {
    WorkoutSummaryEntry {
        exercise: exercise.to_owned(),
        sets,
        reps,
        weight,
        date: date(2024, 5, day),
    }
}

pub fn sample_context() -> CoachContext {
    CoachContext {
        profile: sample_profile(),
        workouts: vec![workout("Squat", 3, 8, 135.0, 1), workout("Bench Press", 3, 10, 95.0, 2)],
        history: vec![
            ChatTurn::user("Hi coach"),
            ChatTurn::assistant("Hello Sam! Ready to train?"),
        ],
    }
}
