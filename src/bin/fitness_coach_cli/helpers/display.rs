// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for fitness-coach-cli
// ABOUTME: Consistent display of replies, plans, parse reports, and log entries

use fitness_coach::models::WorkoutLogEntry;
use fitness_coach::pipeline::{ChatReply, GeneratedPlan, PlanParseReport};

/// Display a chat reply
pub fn display_reply(reply: &ChatReply) {
    println!("{}", reply.text);
    if reply.used_fallback {
        eprintln!("\n(model output was empty after cleaning; showing fallback reply)");
    }
}

/// Display generated plan text between rules
pub fn display_plan(plan: &GeneratedPlan) {
    println!("{}", "-".repeat(60));
    println!("{}", plan.text);
    println!("{}", "-".repeat(60));
}

/// Display accepted and skipped counts with per-line reasons
pub fn display_parse_report(report: &PlanParseReport) {
    println!(
        "Parsed {} exercise(s), skipped {} line(s)",
        report.accepted(),
        report.skipped_count()
    );
    for exercise in &report.exercises {
        println!(
            "   {} | {} sets | {} reps | {} lbs | {}",
            exercise.exercise, exercise.sets, exercise.reps, exercise.weight, exercise.notes
        );
    }
    for skipped in &report.skipped {
        println!(
            "   line {} skipped ({}): {}",
            skipped.line_number, skipped.issue, skipped.line
        );
    }
}

/// Print log entries as JSON lines
pub fn display_log_entries(entries: &[WorkoutLogEntry]) {
    for entry in entries {
        match serde_json::to_string(entry) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("Failed to serialize log entry for {}: {e}", entry.exercise),
        }
    }
}
