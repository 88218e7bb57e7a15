// ABOUTME: Core types for the fitness coach response pipeline
// ABOUTME: Foundation crate with error handling and the caller-owned data model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitness Coach Core
//!
//! Foundation crate shared by the response pipeline and its callers. It is
//! designed to change infrequently, enabling incremental compilation benefits
//! in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and plan-line issues
//! - **models**: Chat turns, profile, workout summaries, and parsed plan exercises

/// Unified error handling system with standard error codes
pub mod errors;

/// Caller-owned data model consumed and produced by the pipeline
pub mod models;
