//! Mock HTTP server tests for the Hugging Face client and the router.
//!
//! Coverage:
//! - Sequence and single-object response bodies
//! - Echoed prompt stripping
//! - Missing `generated_text` field
//! - Non-200 status codes
//! - Request timeout
//! - Router fall-through to the rule-based report

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use archadvisor::ai::huggingface::HuggingFaceClient;
use archadvisor::ai::prompts::build_architecture_prompt;
use archadvisor::prelude::*;
use archadvisor::{AIProvider, CredentialSet, ProviderError, SilentRenderer};

const GENERATE_PATH: &str = "/models/test-model";

fn client_for(server: &MockServer) -> HuggingFaceClient {
    HuggingFaceClient::new("hf-test-key".to_string())
        .with_url(format!("{}{}", server.uri(), GENERATE_PATH))
}

fn router_for(server: &MockServer) -> ProviderRouter {
    let config = AdvisorConfig {
        credentials: CredentialSet::from_lookup(|var: &str| {
            (var == "HF_API_KEY").then(|| "hf-test-key".to_string())
        }),
        huggingface_url: format!("{}{}", server.uri(), GENERATE_PATH),
        ..AdvisorConfig::default()
    };
    ProviderRouter::from_config(&config)
}

// ── Client ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn sequence_body_strips_echoed_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("Authorization", "Bearer hf-test-key"))
        .and(body_partial_json(json!({
            "inputs": "PROMPT_TEXT",
            "parameters": { "max_new_tokens": 600 }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "generated_text": "PROMPT_TEXT answer body" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server).generate("PROMPT_TEXT").await.unwrap();
    assert_eq!(text, "answer body");
}

#[tokio::test]
async fn single_object_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "generated_text": "\n  ## Architecture\n\nUse queues.  " })),
        )
        .mount(&server)
        .await;

    let text = client_for(&server).generate("unrelated prompt").await.unwrap();
    assert_eq!(text, "## Architecture\n\nUse queues.");
}

#[tokio::test]
async fn missing_generated_text_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "text": "nope" }])))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("p").await.unwrap_err();
    assert!(matches!(err, ProviderError::ParseError(_)), "got {:?}", err);
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("model is loading"))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("p").await.unwrap_err();
    match err {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "model is loading");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "generated_text": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = HuggingFaceClient::with_timeout("hf-test-key".to_string(), Duration::from_millis(200))
        .with_url(format!("{}{}", server.uri(), GENERATE_PATH));

    let err = client.generate("p").await.unwrap_err();
    match err {
        ProviderError::RequestFailed(e) => assert!(e.is_timeout()),
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

// ── Router ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn router_uses_huggingface_answer() {
    let server = MockServer::start().await;
    let input = "An ecommerce checkout";
    let prompt = build_architecture_prompt(input);

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({ "inputs": prompt })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "generated_text": format!("{}\n## Design\nShard carts.", prompt) }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = router_for(&server).route(input).await;
    assert_eq!(response.source_label, "Hugging Face");
    assert_eq!(response.text, "## Design\nShard carts.");
}

#[tokio::test]
async fn router_falls_back_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let input = "fintech ledger";
    let response = router_for(&server).route(input).await;
    assert_eq!(response.source_label, "Auto-Fallback");
    assert_eq!(response.text, fallback(input));
}

#[tokio::test]
async fn session_records_provider_turn() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "generated_text": "Use an event bus." })),
        )
        .mount(&server)
        .await;

    let router = router_for(&server);
    let mut session = Session::new();
    session
        .submit("chat backend", &router, &mut SilentRenderer, Duration::ZERO)
        .await
        .unwrap();

    let turns = session.turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[1].content, "Use an event bus.");
    assert_eq!(turns[1].source.as_deref(), Some("Hugging Face"));
}
