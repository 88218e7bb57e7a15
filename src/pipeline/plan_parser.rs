// ABOUTME: Parser turning generated pipe-delimited plan text into exercise records
// ABOUTME: Best-effort line parsing that skips malformed rows and reports why
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::PlanLineIssue;
use crate::models::{ParsedExercise, WorkoutLogEntry};

/// Sets used when the sets field has no usable number
pub const DEFAULT_SETS: u32 = 3;

/// Reps used when the reps field has no usable number
pub const DEFAULT_REPS: u32 = 10;

/// Weight used when the weight field has no number (bodyweight)
pub const DEFAULT_WEIGHT: u32 = 0;

/// Minimum fields: name, sets, reps, weight
const MIN_FIELDS: usize = 4;

const SETS_UNITS: &[&str] = &["sets", "set"];
const REPS_UNITS: &[&str] = &["reps", "rep"];
const WEIGHT_UNITS: &[&str] = &["lbs", "lb"];

const HEADER_NAMES: &[&str] = &["exercise", "exercise name"];

// "1. ", "1)", or bare digits followed by whitespace
static ORDINAL_PREFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d+(?:[.)]\s*|\s+)").ok());

/// A plan line that did not become an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPlanLine {
    /// 1-based line number within the plan text
    pub line_number: usize,
    /// The line as generated, trimmed
    pub line: String,
    /// Why it was skipped
    pub issue: PlanLineIssue,
}

/// Outcome of parsing a generated plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanParseReport {
    /// Accepted exercises in plan order
    pub exercises: Vec<ParsedExercise>,
    /// Candidate lines that were rejected
    pub skipped: Vec<SkippedPlanLine>,
}

impl PlanParseReport {
    /// Number of accepted exercises
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.exercises.len()
    }

    /// Number of rejected candidate lines
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// A plan can be added to the log once at least one line parsed
    #[must_use]
    pub fn is_addable(&self) -> bool {
        !self.exercises.is_empty()
    }

    /// Stamp every accepted exercise with `date` for the caller's log
    #[must_use]
    pub fn into_log_entries(self, date: NaiveDate) -> Vec<WorkoutLogEntry> {
        self.exercises
            .into_iter()
            .map(|exercise| exercise.into_log_entry(date))
            .collect()
    }
}

/// Parse every pipe-delimited line of a plan
///
/// Blank lines and lines without `|` are prose and ignored. Other lines
/// either become exercises or are reported as skipped; nothing here fails.
#[must_use]
pub fn parse_plan(text: &str) -> PlanParseReport {
    let mut report = PlanParseReport::default();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || !line.contains('|') {
            continue;
        }
        match parse_plan_line(line) {
            Ok(exercise) => report.exercises.push(exercise),
            Err(issue) => {
                if issue == PlanLineIssue::HeaderRow {
                    debug!(line_number = index + 1, "Skipping plan table header");
                } else {
                    warn!(line_number = index + 1, %issue, "Skipping unparseable plan line");
                }
                report.skipped.push(SkippedPlanLine {
                    line_number: index + 1,
                    line: line.to_owned(),
                    issue,
                });
            }
        }
    }

    debug!(
        accepted = report.accepted(),
        skipped = report.skipped_count(),
        "Parsed generated plan"
    );
    report
}

/// Parse one `Name | Sets | Reps | Weight | Tip` line
///
/// # Errors
///
/// Returns the [`PlanLineIssue`] explaining why the line is not an exercise.
pub fn parse_plan_line(line: &str) -> Result<ParsedExercise, PlanLineIssue> {
    let line = strip_ordinal(line.trim());
    // Outer pipes only belong to markdown table rows
    let line = line
        .strip_prefix('|')
        .and_then(|inner| inner.strip_suffix('|'))
        .unwrap_or(line);

    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return Err(PlanLineIssue::too_few_fields(fields.len()));
    }

    let name = fields[0].trim_matches('*').trim();
    if !name.chars().any(char::is_alphanumeric) {
        return Err(PlanLineIssue::EmptyExerciseName);
    }
    if HEADER_NAMES.contains(&name.to_lowercase().as_str()) {
        return Err(PlanLineIssue::HeaderRow);
    }

    Ok(ParsedExercise {
        exercise: name.to_owned(),
        sets: positive_or(numeric_field(fields[1], SETS_UNITS), DEFAULT_SETS),
        reps: positive_or(numeric_field(fields[2], REPS_UNITS), DEFAULT_REPS),
        weight: numeric_field(fields[3], WEIGHT_UNITS).unwrap_or(DEFAULT_WEIGHT),
        notes: fields.get(4).map_or_else(String::new, |notes| (*notes).to_owned()),
    })
}

fn strip_ordinal(line: &str) -> &str {
    ORDINAL_PREFIX
        .as_ref()
        .and_then(|re| re.find(line))
        .map_or(line, |found| &line[found.end()..])
}

/// First run of digits after removing unit words, e.g. `8-10 reps` is 8
///
/// Runs too large for `u32` saturate to `u32::MAX`.
fn numeric_field(field: &str, units: &[&str]) -> Option<u32> {
    let mut value = field.to_lowercase();
    for unit in units {
        value = value.replace(unit, "");
    }
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

fn positive_or(value: Option<u32>, default: u32) -> u32 {
    value.filter(|v| *v > 0).unwrap_or(default)
}
