// ABOUTME: Workout records consumed by prompts and produced by the plan parser
// ABOUTME: Summary entries feed prompt context; parsed exercises become new log entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A logged workout as summarised into prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummaryEntry {
    /// Exercise name
    pub exercise: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Weight in pounds
    pub weight: f64,
    /// Day the workout was logged
    pub date: NaiveDate,
}

/// One exercise extracted from a generated plan line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExercise {
    /// Exercise name, never empty
    pub exercise: String,
    /// Number of sets, at least 1
    pub sets: u32,
    /// Repetitions per set, at least 1
    pub reps: u32,
    /// Weight in pounds, 0 for bodyweight
    pub weight: u32,
    /// Short coaching tip, possibly empty
    pub notes: String,
}

impl ParsedExercise {
    /// Stamp the exercise with a date so the caller can append it to its log
    #[must_use]
    pub fn into_log_entry(self, date: NaiveDate) -> WorkoutLogEntry {
        WorkoutLogEntry {
            date,
            exercise: self.exercise,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            notes: self.notes,
            completed: false,
        }
    }
}

/// An accepted plan exercise ready for the caller's workout log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutLogEntry {
    /// Day the plan was accepted
    pub date: NaiveDate,
    /// Exercise name
    pub exercise: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Weight in pounds
    pub weight: u32,
    /// Coaching tip from the plan
    pub notes: String,
    /// Whether the user has completed it
    pub completed: bool,
}

impl From<&WorkoutLogEntry> for WorkoutSummaryEntry {
    fn from(entry: &WorkoutLogEntry) -> Self {
        Self {
            exercise: entry.exercise.clone(),
            sets: entry.sets,
            reps: entry.reps,
            weight: f64::from(entry.weight),
            date: entry.date,
        }
    }
}
