// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Health command for fitness-coach-cli
// ABOUTME: Reports whether the configured model runtime is reachable

use fitness_coach::errors::{AppError, AppResult};
use fitness_coach::llm::TextGenerator;

/// Run the health command
///
/// # Errors
///
/// Returns `ModelUnavailable` if the runtime cannot be reached or reports unhealthy.
pub async fn run(generator: &dyn TextGenerator) -> AppResult<()> {
    if generator.health_check().await? {
        println!("{} is reachable (model {})", generator.name(), generator.model());
        Ok(())
    } else {
        Err(AppError::model_unavailable(
            generator.name(),
            "health check returned an error status",
        ))
    }
}
