// ABOUTME: Shared configuration type definitions for the coach pipeline
// ABOUTME: Contains LogLevel and LlmBackendType enums parsed from environment strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level - only critical errors
    Error,
    /// Warning level - potential issues
    Warn,
    /// Info level - normal operational messages (default)
    #[default]
    Info,
    /// Debug level - per-stage pipeline output
    Debug,
    /// Trace level - very verbose tracing
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info, // Default fallback (including "info")
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Local text-generation runtime selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackendType {
    /// Ollama `/api/generate` in raw mode (default)
    #[default]
    Ollama,
    /// llama.cpp server `/completion`
    LlamaCpp,
}

impl LlmBackendType {
    /// Environment variable name for backend selection
    pub const ENV_VAR: &'static str = "COACH_LLM_BACKEND";

    /// Environment variable for the backend base URL
    pub const BASE_URL_ENV_VAR: &'static str = "COACH_LLM_BASE_URL";

    /// Environment variable for model selection
    pub const MODEL_ENV_VAR: &'static str = "COACH_LLM_MODEL";

    /// Environment variable for the per-request timeout in seconds
    pub const TIMEOUT_SECS_ENV_VAR: &'static str = "COACH_LLM_TIMEOUT_SECS";

    /// Environment variable pinning the sampling seed
    pub const SEED_ENV_VAR: &'static str = "COACH_LLM_SEED";

    /// Parse from string with fallback to default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "llamacpp" | "llama.cpp" | "llama-cpp" | "llama_cpp" => Self::LlamaCpp,
            _ => Self::Ollama, // Default fallback (including "ollama")
        }
    }

    /// Load from environment variable
    #[must_use]
    pub fn from_env() -> Self {
        env::var(Self::ENV_VAR)
            .map(|s| Self::from_str_or_default(&s))
            .unwrap_or_default()
    }

    /// Default base URL for this backend
    #[must_use]
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::Ollama => "http://localhost:11434",
            Self::LlamaCpp => "http://localhost:8080",
        }
    }
}

impl Display for LlmBackendType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::LlamaCpp => write!(f, "llamacpp"),
        }
    }
}
