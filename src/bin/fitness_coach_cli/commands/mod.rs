// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for fitness-coach-cli
// ABOUTME: Provides access to the chat, plan, and health commands

pub mod chat;
pub mod health;
pub mod plan;
