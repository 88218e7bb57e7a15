// ABOUTME: User profile fields that personalise coach prompts
// ABOUTME: Every field is optional; blank values are treated exactly like missing ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Profile collected by the UI layer
///
/// Accessors return `None` for absent or whitespace-only values so prompt
/// rendering never has to deal with placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileContext {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,
    /// Free-text experience level (e.g. "Beginner")
    #[serde(default)]
    pub experience_level: Option<String>,
    /// Free-text fitness goal
    #[serde(default)]
    pub fitness_goal: Option<String>,
    /// Injury notes the coach must respect
    #[serde(default)]
    pub injuries: Option<String>,
    /// Training preferences
    #[serde(default)]
    pub preferences: Option<String>,
    /// Body weight in pounds (collected, not sent to the model)
    #[serde(default)]
    pub body_weight: Option<f64>,
    /// Height as entered by the user (collected, not sent to the model)
    #[serde(default)]
    pub height: Option<String>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl ProfileContext {
    /// Name, if set
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        present(self.name.as_ref())
    }

    /// Age, if set and non-zero
    #[must_use]
    pub fn age(&self) -> Option<u32> {
        self.age.filter(|age| *age > 0)
    }

    /// Experience level, if set
    #[must_use]
    pub fn experience_level(&self) -> Option<&str> {
        present(self.experience_level.as_ref())
    }

    /// Fitness goal, if set
    #[must_use]
    pub fn fitness_goal(&self) -> Option<&str> {
        present(self.fitness_goal.as_ref())
    }

    /// Injury notes, if set
    #[must_use]
    pub fn injuries(&self) -> Option<&str> {
        present(self.injuries.as_ref())
    }

    /// Preferences, if set
    #[must_use]
    pub fn preferences(&self) -> Option<&str> {
        present(self.preferences.as_ref())
    }

    /// True when no prompt-relevant field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name().is_none()
            && self.age().is_none()
            && self.experience_level().is_none()
            && self.fitness_goal().is_none()
            && self.injuries().is_none()
            && self.preferences().is_none()
    }
}
