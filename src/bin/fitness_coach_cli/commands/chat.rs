// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Chat command for fitness-coach-cli
// ABOUTME: Sends one message through the pipeline and prints the cleaned reply

use fitness_coach::errors::AppResult;
use fitness_coach::models::CoachContext;
use fitness_coach::pipeline::CoachPipeline;

use crate::helpers::display::display_reply;

/// Run the chat command
///
/// # Errors
///
/// Returns model errors from the pipeline; a timeout is reported as retryable.
pub async fn run(pipeline: &CoachPipeline, context: &CoachContext, message: &str) -> AppResult<()> {
    match pipeline.respond(context, message).await {
        Ok(reply) => {
            display_reply(&reply);
            Ok(())
        }
        Err(e) => {
            if e.is_retryable() {
                eprintln!("The coach did not answer ({e}). Try again in a moment.");
            }
            Err(e)
        }
    }
}
