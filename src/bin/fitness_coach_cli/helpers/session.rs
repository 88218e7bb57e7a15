// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Session file loading for fitness-coach-cli
// ABOUTME: Reads a JSON CoachContext so manual runs can carry profile, workouts, and history

use std::path::Path;

use fitness_coach::errors::{AppError, AppResult};
use fitness_coach::models::CoachContext;
use tokio::fs;
use tracing::debug;

/// Load the request context, or an empty one when no session file is given
pub async fn load_context(path: Option<&Path>) -> AppResult<CoachContext> {
    let Some(path) = path else {
        return Ok(CoachContext::default());
    };

    let raw = fs::read_to_string(path).await.map_err(|e| {
        AppError::storage(format!("Failed to read session file {}: {e}", path.display()))
            .with_source(e)
    })?;
    let context: CoachContext = serde_json::from_str(&raw)?;

    debug!(
        workouts = context.workouts.len(),
        history = context.history.len(),
        "Loaded session from {}",
        path.display()
    );
    Ok(context)
}
