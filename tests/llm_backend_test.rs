// ABOUTME: Tests for the Ollama and llama.cpp HTTP backends against an in-process fake server
// ABOUTME: Validates request bodies, the prompt-echo contract, status mapping, and connection failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use fitness_coach::config::{LlmBackendType, ModelConfig};
use fitness_coach::errors::ErrorCode;
use fitness_coach::llm::{
    GenerationConfig, GeneratorProvider, LlamaCppGenerator, OllamaGenerator, TextGenerator,
};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const PROMPT: &str = "<s>[INST] You are a helpful fitness coach.\n\nHi [/INST]";

// =============================================================================
// Fake Server
// =============================================================================

/// Captured HTTP request
struct CapturedRequest {
    request_line: String,
    body: String,
}

impl CapturedRequest {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serve exactly one HTTP response, returning the base URL and the captured request
async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut chunk = [0_u8; 4096];

        let (head_end, content_length) = loop {
            let read = socket.read(&mut chunk).await.unwrap();
            assert!(read > 0, "client closed before sending a request");
            raw.extend_from_slice(&chunk[..read]);
            let text = String::from_utf8_lossy(&raw);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                break (end + 4, content_length);
            }
        };
        while raw.len() < head_end + content_length {
            let read = socket.read(&mut chunk).await.unwrap();
            assert!(read > 0, "client closed mid-body");
            raw.extend_from_slice(&chunk[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status} Fake\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        let text = String::from_utf8_lossy(&raw).into_owned();
        CapturedRequest {
            request_line: text.lines().next().unwrap_or_default().to_owned(),
            body: text[head_end..].to_owned(),
        }
    });

    (format!("http://{addr}"), handle)
}

fn config_for(backend: LlmBackendType, base_url: String) -> ModelConfig {
    ModelConfig {
        base_url,
        request_timeout: Duration::from_secs(5),
        ..ModelConfig::for_backend(backend)
    }
}

// =============================================================================
// Generation Presets
// =============================================================================

#[test]
fn test_generation_presets() {
    let chat = GenerationConfig::chat();
    assert_eq!(chat.max_new_tokens, 180);
    assert_eq!(chat.top_k, Some(40));
    assert!(chat.do_sample);
    assert!((chat.repetition_penalty - 1.3).abs() < f32::EPSILON);

    let plan = GenerationConfig::plan();
    assert_eq!(plan.max_new_tokens, 280);
    assert_eq!(plan.top_k, None);
    assert!((plan.top_p - 0.9).abs() < f32::EPSILON);
}

#[test]
fn test_greedy_decoding_zeroes_temperature() {
    let greedy = GenerationConfig::chat().with_sampling(false);

    assert!(greedy.effective_temperature().abs() < f32::EPSILON);
    assert!((GenerationConfig::chat().effective_temperature() - 0.7).abs() < f32::EPSILON);
}

// =============================================================================
// Ollama
// =============================================================================

#[tokio::test]
async fn test_ollama_generate_echoes_prompt() {
    let (base_url, server) =
        serve_once(200, r#"{"response":" Start with squats.","done":true,"eval_count":5}"#).await;
    let generator =
        OllamaGenerator::new(&config_for(LlmBackendType::Ollama, base_url)).unwrap();

    let output = generator
        .generate(PROMPT, &GenerationConfig::chat())
        .await
        .unwrap();

    assert_eq!(output, format!("{PROMPT} Start with squats."));

    let request = server.await.unwrap();
    assert!(request.request_line.starts_with("POST /api/generate"));
    let body = request.json();
    assert_eq!(body["prompt"], PROMPT);
    assert_eq!(body["raw"], true);
    assert_eq!(body["stream"], false);
    assert_eq!(body["model"], "mistral:7b-instruct-v0.3");
    assert_eq!(body["options"]["num_predict"], 180);
    assert_eq!(body["options"]["top_k"], 40);
    assert!(body["options"].get("seed").is_none());
}

#[tokio::test]
async fn test_ollama_request_seed_overrides_config_seed() {
    let (base_url, server) = serve_once(200, r#"{"response":""}"#).await;
    let mut config = config_for(LlmBackendType::Ollama, base_url);
    config.seed = Some(11);
    let generator = OllamaGenerator::new(&config).unwrap();

    generator
        .generate(PROMPT, &GenerationConfig::plan().with_seed(Some(99)))
        .await
        .unwrap();

    let body = server.await.unwrap().json();
    assert_eq!(body["options"]["seed"], 99);
    assert!(body["options"].get("top_k").is_none());
}

#[tokio::test]
async fn test_ollama_missing_model_is_unavailable() {
    let (base_url, _server) = serve_once(404, r#"{"error":"model not found"}"#).await;
    let generator =
        OllamaGenerator::new(&config_for(LlmBackendType::Ollama, base_url)).unwrap();

    let err = generator
        .generate(PROMPT, &GenerationConfig::chat())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelUnavailable);
    assert!(err.message.contains("model not found"));
}

#[tokio::test]
async fn test_ollama_unreadable_body_is_invalid_response() {
    let (base_url, _server) = serve_once(200, "not json").await;
    let generator =
        OllamaGenerator::new(&config_for(LlmBackendType::Ollama, base_url)).unwrap();

    let err = generator
        .generate(PROMPT, &GenerationConfig::chat())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelResponseInvalid);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_ollama_health_check() {
    let (base_url, server) = serve_once(200, r#"{"models":[]}"#).await;
    let generator =
        OllamaGenerator::new(&config_for(LlmBackendType::Ollama, base_url)).unwrap();

    assert!(generator.health_check().await.unwrap());
    assert!(server
        .await
        .unwrap()
        .request_line
        .starts_with("GET /api/tags"));
}

// =============================================================================
// llama.cpp
// =============================================================================

#[tokio::test]
async fn test_llama_cpp_generate_echoes_prompt() {
    let (base_url, server) =
        serve_once(200, r#"{"content":" Try lunges.","tokens_predicted":4}"#).await;
    let generator =
        LlamaCppGenerator::new(&config_for(LlmBackendType::LlamaCpp, base_url)).unwrap();

    let output = generator
        .generate(PROMPT, &GenerationConfig::chat().with_sampling(false))
        .await
        .unwrap();

    assert_eq!(output, format!("{PROMPT} Try lunges."));

    let request = server.await.unwrap();
    assert!(request.request_line.starts_with("POST /completion"));
    let body = request.json();
    assert_eq!(body["prompt"], PROMPT);
    assert_eq!(body["n_predict"], 180);
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["stream"], false);
}

#[tokio::test]
async fn test_llama_cpp_server_error_is_unavailable() {
    let (base_url, _server) = serve_once(503, r#"{"error":"loading model"}"#).await;
    let generator =
        LlamaCppGenerator::new(&config_for(LlmBackendType::LlamaCpp, base_url)).unwrap();

    let err = generator
        .generate(PROMPT, &GenerationConfig::chat())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelUnavailable);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_llama_cpp_unhealthy_status() {
    let (base_url, _server) = serve_once(500, "{}").await;
    let generator =
        LlamaCppGenerator::new(&config_for(LlmBackendType::LlamaCpp, base_url)).unwrap();

    assert!(!generator.health_check().await.unwrap());
}

// =============================================================================
// Provider Selection and Connection Failures
// =============================================================================

#[tokio::test]
async fn test_provider_follows_configured_backend() {
    let ollama = GeneratorProvider::from_config(&ModelConfig::default()).unwrap();
    let llama = GeneratorProvider::from_config(&ModelConfig::for_backend(
        LlmBackendType::LlamaCpp,
    ))
    .unwrap();

    assert_eq!(ollama.backend(), LlmBackendType::Ollama);
    assert_eq!(ollama.name(), "ollama");
    assert_eq!(llama.backend(), LlmBackendType::LlamaCpp);
    assert_eq!(llama.name(), "llamacpp");
    assert_eq!(llama.model(), "mistral:7b-instruct-v0.3");
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    // Bind then drop to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = config_for(LlmBackendType::Ollama, format!("http://127.0.0.1:{port}"));
    let provider = GeneratorProvider::from_config(&config).unwrap();

    let err = provider
        .generate(PROMPT, &GenerationConfig::chat())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelUnavailable);
    assert!(err.message.contains("Cannot connect"));
}
