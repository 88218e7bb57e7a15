// ABOUTME: Per-request context object passed into the coach pipeline
// ABOUTME: Replaces framework session state with an explicit, read-only value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{ChatTurn, ProfileContext, WorkoutSummaryEntry};

/// Everything the pipeline needs to personalise one request
///
/// `workouts` and `history` are ordered oldest first; windowing helpers
/// return the most recent suffix without copying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachContext {
    /// User profile
    #[serde(default)]
    pub profile: ProfileContext,
    /// Logged workouts, oldest first
    #[serde(default)]
    pub workouts: Vec<WorkoutSummaryEntry>,
    /// Prior conversation turns, oldest first, excluding the current message
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl CoachContext {
    /// Create a context for the given profile with no workouts or history
    #[must_use]
    pub fn new(profile: ProfileContext) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// The last `limit` workouts
    #[must_use]
    pub fn recent_workouts(&self, limit: usize) -> &[WorkoutSummaryEntry] {
        tail(&self.workouts, limit)
    }

    /// The last `limit` conversation turns
    #[must_use]
    pub fn history_window(&self, limit: usize) -> &[ChatTurn] {
        tail(&self.history, limit)
    }
}

fn tail<T>(items: &[T], limit: usize) -> &[T] {
    &items[items.len().saturating_sub(limit)..]
}
