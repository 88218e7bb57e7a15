// ABOUTME: Unit tests for environment-driven model, pipeline, and logging configuration
// ABOUTME: Validates defaults, enum parsing, overrides, and rejection of invalid values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use fitness_coach::config::{
    LlmBackendType, LogLevel, ModelConfig, PipelineConfig, DEFAULT_HISTORY_WINDOW, DEFAULT_MODEL,
    DEFAULT_WORKOUT_WINDOW,
};
use fitness_coach::errors::ErrorCode;
use fitness_coach::logging::{LogFormat, LoggingConfig, SERVICE_NAME};
use serial_test::serial;

const MODEL_VARS: [&str; 5] = [
    LlmBackendType::ENV_VAR,
    LlmBackendType::BASE_URL_ENV_VAR,
    LlmBackendType::MODEL_ENV_VAR,
    LlmBackendType::TIMEOUT_SECS_ENV_VAR,
    LlmBackendType::SEED_ENV_VAR,
];

fn clear_model_vars() {
    for var in MODEL_VARS {
        env::remove_var(var);
    }
}

// ============================================================================
// Enum Parsing
// ============================================================================

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("trace"), LogLevel::Trace);
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info); // Default fallback
    assert_eq!(LogLevel::Warn.to_string(), "warn");
}

#[test]
fn test_backend_parsing() {
    assert_eq!(
        LlmBackendType::from_str_or_default("ollama"),
        LlmBackendType::Ollama
    );
    assert_eq!(
        LlmBackendType::from_str_or_default("LlamaCpp"),
        LlmBackendType::LlamaCpp
    );
    assert_eq!(
        LlmBackendType::from_str_or_default("llama.cpp"),
        LlmBackendType::LlamaCpp
    );
    assert_eq!(
        LlmBackendType::from_str_or_default("unknown"),
        LlmBackendType::Ollama
    ); // Default fallback
    assert_eq!(LlmBackendType::LlamaCpp.to_string(), "llamacpp");
}

#[test]
fn test_backend_default_urls() {
    assert_eq!(
        ModelConfig::for_backend(LlmBackendType::Ollama).base_url,
        "http://localhost:11434"
    );
    assert_eq!(
        ModelConfig::for_backend(LlmBackendType::LlamaCpp).base_url,
        "http://localhost:8080"
    );
}

// ============================================================================
// Model Configuration
// ============================================================================

#[test]
#[serial]
fn test_model_config_defaults() {
    clear_model_vars();

    let config = ModelConfig::from_env().unwrap();

    assert_eq!(config, ModelConfig::default());
    assert_eq!(config.backend, LlmBackendType::Ollama);
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.request_timeout, Duration::from_secs(120));
    assert_eq!(config.seed, None);
}

#[test]
#[serial]
fn test_model_config_overrides() {
    clear_model_vars();
    env::set_var(LlmBackendType::ENV_VAR, "llamacpp");
    env::set_var(LlmBackendType::BASE_URL_ENV_VAR, "http://gpu-box:9000/");
    env::set_var(LlmBackendType::MODEL_ENV_VAR, "mistral-7b-q4");
    env::set_var(LlmBackendType::TIMEOUT_SECS_ENV_VAR, "45");
    env::set_var(LlmBackendType::SEED_ENV_VAR, "1234");

    let config = ModelConfig::from_env().unwrap();

    assert_eq!(config.backend, LlmBackendType::LlamaCpp);
    assert_eq!(config.base_url, "http://gpu-box:9000");
    assert_eq!(config.model, "mistral-7b-q4");
    assert_eq!(config.request_timeout, Duration::from_secs(45));
    assert_eq!(config.seed, Some(1234));

    clear_model_vars();
}

#[test]
#[serial]
fn test_model_config_blank_values_use_defaults() {
    clear_model_vars();
    env::set_var(LlmBackendType::BASE_URL_ENV_VAR, "   ");
    env::set_var(LlmBackendType::MODEL_ENV_VAR, "");

    let config = ModelConfig::from_env().unwrap();

    assert_eq!(config.base_url, "http://localhost:11434");
    assert_eq!(config.model, DEFAULT_MODEL);

    clear_model_vars();
}

#[test]
#[serial]
fn test_model_config_rejects_invalid_timeout() {
    clear_model_vars();

    for raw in ["0", "-5", "soon"] {
        env::set_var(LlmBackendType::TIMEOUT_SECS_ENV_VAR, raw);
        let err = ModelConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
        assert!(err.message.contains(LlmBackendType::TIMEOUT_SECS_ENV_VAR));
    }

    clear_model_vars();
}

#[test]
#[serial]
fn test_model_config_rejects_invalid_seed() {
    clear_model_vars();
    env::set_var(LlmBackendType::SEED_ENV_VAR, "lucky");

    let err = ModelConfig::from_env().unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    clear_model_vars();
}

// ============================================================================
// Pipeline Configuration
// ============================================================================

#[test]
fn test_pipeline_config_defaults() {
    let config = PipelineConfig::default();

    assert_eq!(config.history_window, DEFAULT_HISTORY_WINDOW);
    assert_eq!(config.workout_window, DEFAULT_WORKOUT_WINDOW);
    assert_eq!(config.history_window, 6);
    assert_eq!(config.workout_window, 5);
}

#[test]
fn test_pipeline_config_follows_model_timeout() {
    let mut model = ModelConfig::default();
    model.request_timeout = Duration::from_secs(30);

    let config = PipelineConfig::from_model_config(&model);

    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(
        config.with_request_timeout(Duration::from_secs(5)).request_timeout,
        Duration::from_secs(5)
    );
}

// ============================================================================
// Logging Configuration
// ============================================================================

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
    assert_eq!(LogFormat::from_str_or_default("other"), LogFormat::Pretty);
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_SPANS", "1");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_spans);
    assert!(!config.include_location);
    assert_eq!(config.service_name, SERVICE_NAME);

    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");
    env::remove_var("LOG_INCLUDE_SPANS");
}

#[test]
#[serial]
fn test_default_logging_config() {
    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");

    let config = LoggingConfig::from_env().with_level(LogLevel::Warn);

    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.service_name, "fitness-coach");
}

#[test]
#[serial]
fn test_rust_log_crate_directive_is_kept() {
    env::set_var("RUST_LOG", "warn,fitness_coach=debug");

    let config = LoggingConfig::from_env();
    let rendered = config.env_filter().to_string();

    assert_eq!(config.level, LogLevel::Debug);
    assert!(rendered.contains("fitness_coach=debug"));
    assert!(!rendered.contains("fitness_coach=info"));
    assert!(rendered.contains("reqwest=warn"));

    env::remove_var("RUST_LOG");
}

#[test]
#[serial]
fn test_rust_log_wins_over_configured_level() {
    env::set_var("RUST_LOG", "error");

    let config = LoggingConfig::from_env().with_level(LogLevel::Debug);
    let rendered = config.env_filter().to_string();

    assert!(!rendered.contains("fitness_coach="));
    assert!(rendered.contains("error"));

    env::remove_var("RUST_LOG");
}

#[test]
#[serial]
fn test_configured_level_applies_without_rust_log() {
    env::remove_var("RUST_LOG");

    let config = LoggingConfig::from_env().with_level(LogLevel::Warn);
    let rendered = config.env_filter().to_string();

    assert!(rendered.contains("fitness_coach=warn"));
    assert!(rendered.contains("hyper=warn"));
}
