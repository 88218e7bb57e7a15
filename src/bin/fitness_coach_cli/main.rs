// ABOUTME: Fitness coach CLI - manual driver for the chat and plan pipeline
// ABOUTME: Loads a session file, calls the configured local model, and prints cleaned output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Ask the coach a question with no profile
//! fitness-coach-cli chat "What should I do for a warm-up?"
//!
//! # Personalise with a session file holding profile, workouts, and history
//! fitness-coach-cli --session session.json chat "How are you?"
//!
//! # Generate a plan and print the parsed log entries
//! fitness-coach-cli --session session.json plan "Give me a leg day workout" --add-to-log
//!
//! # Check that the configured runtime is reachable
//! fitness-coach-cli health
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use fitness_coach::config::{LogLevel, ModelConfig, PipelineConfig};
use fitness_coach::errors::{AppError, AppResult};
use fitness_coach::llm::GeneratorProvider;
use fitness_coach::logging::LoggingConfig;
use fitness_coach::pipeline::CoachPipeline;
use tracing::info;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "fitness-coach-cli",
    about = "Fitness coach pipeline CLI",
    long_about = "Manual driver for the fitness coach prompt and cleaning pipeline against a local Ollama or llama.cpp server."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON session file with profile, workouts, and history
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Enable debug logging (ignored when `RUST_LOG` is set)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Send one chat message and print the cleaned reply
    Chat {
        /// Message to the coach
        message: String,
    },

    /// Generate a workout plan and report how it parses
    Plan {
        /// Free-text plan request
        request: String,

        /// Print accepted exercises as workout log entries dated today
        #[arg(long)]
        add_to_log: bool,
    },

    /// Check that the configured model runtime answers
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    LoggingConfig::from_env()
        .with_level(level)
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let model = ModelConfig::from_env()?;
    info!(
        "Using {} at {} with model {}",
        model.backend, model.base_url, model.model
    );
    let generator = Arc::new(GeneratorProvider::from_config(&model)?);

    match cli.command {
        Command::Chat { message } => {
            let context = helpers::session::load_context(cli.session.as_deref()).await?;
            let pipeline =
                CoachPipeline::new(generator, PipelineConfig::from_model_config(&model));
            commands::chat::run(&pipeline, &context, &message).await?;
        }
        Command::Plan {
            request,
            add_to_log,
        } => {
            let context = helpers::session::load_context(cli.session.as_deref()).await?;
            let pipeline =
                CoachPipeline::new(generator, PipelineConfig::from_model_config(&model));
            commands::plan::run(&pipeline, &context, &request, add_to_log).await?;
        }
        Command::Health => {
            commands::health::run(generator.as_ref()).await?;
        }
    }

    Ok(())
}
