// ABOUTME: Reasons a generated plan line was rejected by the plan parser
// ABOUTME: Recovered locally by skipping the line and reporting the issue to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a pipe-delimited plan line could not become an exercise record.
///
/// These never abort parsing: the offending line is skipped and the issue
/// is attached to the parse report so the caller can show accepted versus
/// skipped counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanLineIssue {
    /// Fewer than the four required `name | sets | reps | weight` fields
    TooFewFields {
        /// Number of fields found after splitting on `|`
        found: usize,
    },
    /// The exercise-name field was blank or had no letters or digits
    EmptyExerciseName,
    /// The line is a table header such as `Exercise | Sets | Reps | Weight`
    HeaderRow,
}

impl PlanLineIssue {
    /// Create a "too few fields" issue
    #[must_use]
    pub const fn too_few_fields(found: usize) -> Self {
        Self::TooFewFields { found }
    }
}

impl fmt::Display for PlanLineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found } => {
                write!(f, "expected at least 4 '|' separated fields, found {found}")
            }
            Self::EmptyExerciseName => write!(f, "exercise name is empty"),
            Self::HeaderRow => write!(f, "table header row"),
        }
    }
}

impl Error for PlanLineIssue {}
