// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Plan command for fitness-coach-cli
// ABOUTME: Generates a workout plan, reports parse results, and optionally emits log entries

use chrono::Local;
use fitness_coach::errors::AppResult;
use fitness_coach::models::CoachContext;
use fitness_coach::pipeline::CoachPipeline;

use crate::helpers::display::{display_log_entries, display_parse_report, display_plan};

/// Run the plan command
///
/// # Errors
///
/// Returns model errors from the pipeline.
pub async fn run(
    pipeline: &CoachPipeline,
    context: &CoachContext,
    request: &str,
    add_to_log: bool,
) -> AppResult<()> {
    let plan = pipeline.generate_plan(context, request).await?;
    if plan.is_empty() {
        println!("No plan was generated. Try rephrasing the request.");
        return Ok(());
    }

    display_plan(&plan);
    let report = plan.parse();
    display_parse_report(&report);

    if add_to_log {
        if report.is_addable() {
            let entries = report.into_log_entries(Local::now().date_naive());
            display_log_entries(&entries);
        } else {
            println!("Nothing to add: no plan line could be parsed.");
        }
    }

    Ok(())
}
