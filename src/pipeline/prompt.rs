// ABOUTME: Prompt assembly for chat replies and workout plan generation
// ABOUTME: Renders profile and workout clauses, flattens history, and wraps everything in instruction markup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Assembly
//!
//! Every function here is total and deterministic. Absent profile fields
//! and empty workout or history lists are omitted entirely rather than
//! rendered as placeholders.
//!
//! Caller-supplied text passes through [`InstructionTemplate::strip`] before
//! it is embedded, so the only instruction-close marker in a rendered prompt
//! is the one the template appends.

use fitness_coach_core::models::{ChatTurn, CoachContext, ProfileContext, WorkoutSummaryEntry};

use crate::config::PipelineConfig;
use crate::llm::prompts::{
    InstructionTemplate, CHAT_INSTRUCTIONS, CHAT_PERSONA, CURRENT_QUESTION_LABEL, HISTORY_LABEL,
    PLAN_INSTRUCTIONS, PLAN_PERSONA,
};

/// Render a weight without a fractional part when it is whole
#[must_use]
pub fn format_weight(weight: f64) -> String {
    if weight.is_finite() && weight.fract().abs() < f64::EPSILON {
        format!("{weight:.0}")
    } else {
        format!("{weight}")
    }
}

/// Profile clause for chat prompts
///
/// `The user's name is Sam; they are 30 years old; experience level is beginner.`
#[must_use]
pub fn render_chat_profile(profile: &ProfileContext, template: &InstructionTemplate) -> String {
    let mut parts = Vec::new();
    if let Some(name) = profile.name() {
        parts.push(format!("The user's name is {}", template.strip(name)));
    }
    if let Some(age) = profile.age() {
        parts.push(format!("they are {age} years old"));
    }
    if let Some(level) = profile.experience_level() {
        parts.push(format!(
            "experience level is {}",
            template.strip(level).to_lowercase()
        ));
    }
    if let Some(goal) = profile.fitness_goal() {
        parts.push(format!("their goal: {}", template.strip(goal)));
    }
    if let Some(injuries) = profile.injuries() {
        parts.push(format!("injury considerations: {}", template.strip(injuries)));
    }
    if let Some(preferences) = profile.preferences() {
        parts.push(format!("preferences: {}", template.strip(preferences)));
    }
    terminated_clause(&parts)
}

/// Profile clause for plan prompts
///
/// `Name: Sam; Age: 30; Experience: Beginner; Goal: Strength; Injuries: Knee.`
/// Preferences are not part of plan prompts.
#[must_use]
pub fn render_plan_profile(profile: &ProfileContext, template: &InstructionTemplate) -> String {
    let mut parts = Vec::new();
    if let Some(name) = profile.name() {
        parts.push(format!("Name: {}", template.strip(name)));
    }
    if let Some(age) = profile.age() {
        parts.push(format!("Age: {age}"));
    }
    if let Some(level) = profile.experience_level() {
        parts.push(format!("Experience: {}", template.strip(level)));
    }
    if let Some(goal) = profile.fitness_goal() {
        parts.push(format!("Goal: {}", template.strip(goal)));
    }
    if let Some(injuries) = profile.injuries() {
        parts.push(format!("Injuries: {}", template.strip(injuries)));
    }
    terminated_clause(&parts)
}

/// Workout clause for chat prompts
///
/// `Recent workouts: Squat 3x8 @ 135lbs on 2024-05-01; Bench Press 3x10 @ 95lbs on 2024-05-02.`
#[must_use]
pub fn render_chat_workouts(
    workouts: &[WorkoutSummaryEntry],
    template: &InstructionTemplate,
) -> String {
    let entries: Vec<String> = workouts
        .iter()
        .map(|w| {
            format!(
                "{} {}x{} @ {}lbs on {}",
                template.strip(&w.exercise),
                w.sets,
                w.reps,
                format_weight(w.weight),
                w.date
            )
        })
        .collect();
    workout_clause(&entries)
}

/// Workout clause for plan prompts
///
/// `Recent workouts: Squat 135lbs 3x8; Bench Press 95lbs 3x10.`
#[must_use]
pub fn render_plan_workouts(
    workouts: &[WorkoutSummaryEntry],
    template: &InstructionTemplate,
) -> String {
    let entries: Vec<String> = workouts
        .iter()
        .map(|w| {
            format!(
                "{} {}lbs {}x{}",
                template.strip(&w.exercise),
                format_weight(w.weight),
                w.sets,
                w.reps
            )
        })
        .collect();
    workout_clause(&entries)
}

/// Flatten prior turns into `User: ...` / `Assistant: ...` lines
#[must_use]
pub fn render_history(history: &[ChatTurn], template: &InstructionTemplate) -> String {
    history
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), template.strip(turn.text.trim())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full chat prompt for the current message
#[must_use]
pub fn build_chat_prompt(context: &CoachContext, message: &str, config: &PipelineConfig) -> String {
    let template = &config.template;
    let workouts = context.recent_workouts(config.workout_window);
    let system = join_pieces(&[
        CHAT_PERSONA,
        &render_chat_profile(&context.profile, template),
        &render_chat_workouts(workouts, template),
        CHAT_INSTRUCTIONS.trim(),
    ]);

    let message = template.strip(message.trim());
    let history = context.history_window(config.history_window);
    let body = if history.is_empty() {
        message
    } else {
        format!(
            "{HISTORY_LABEL}\n{}\n\n{CURRENT_QUESTION_LABEL} {message}",
            render_history(history, template)
        )
    };

    template.wrap(&system, &body)
}

/// Full plan prompt for a plan request
#[must_use]
pub fn build_plan_prompt(context: &CoachContext, request: &str, config: &PipelineConfig) -> String {
    let template = &config.template;
    let workouts = context.recent_workouts(config.workout_window);
    let system = join_pieces(&[
        PLAN_PERSONA,
        &render_plan_profile(&context.profile, template),
        &render_plan_workouts(workouts, template),
        PLAN_INSTRUCTIONS.trim(),
    ]);

    template.wrap(&system, &template.strip(request.trim()))
}

fn terminated_clause(parts: &[String]) -> String {
    if parts.is_empty() {
        String::new()
    } else {
        format!("{}.", parts.join("; "))
    }
}

fn workout_clause(entries: &[String]) -> String {
    if entries.is_empty() {
        String::new()
    } else {
        format!("Recent workouts: {}.", entries.join("; "))
    }
}

fn join_pieces(pieces: &[&str]) -> String {
    pieces
        .iter()
        .map(|piece| piece.trim())
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
