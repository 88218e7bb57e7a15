// ABOUTME: Data model shared between the response pipeline and its callers
// ABOUTME: Chat turns, profile, workout summaries, parsed plan exercises, and the request context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Models
//!
//! All of these types are owned by the caller (the UI or CLI layer). The
//! pipeline receives them by reference and never mutates or persists them.

mod chat;
mod context;
mod profile;
mod workout;

pub use chat::{ChatRole, ChatTurn};
pub use context::CoachContext;
pub use profile::ProfileContext;
pub use workout::{ParsedExercise, WorkoutLogEntry, WorkoutSummaryEntry};
