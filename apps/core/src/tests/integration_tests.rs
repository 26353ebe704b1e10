//! Integration Tests
//!
//! End-to-end flows: controller -> Gemini client -> mock HTTP server -> rendered card.

use super::controller_tests::RecordingNotifier;
use crate::cli::{run_analyze, run_interactive, OutputFormat};
use crate::client::GeminiClient;
use crate::config::AnalyzerConfig;
use crate::controller::AnalysisController;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Fixtures
// ============================================================================

const ENDPOINT_PATH: &str = "/v1beta/models/gemini-test:generateContent";
const LEVEL_FIVE: &str = "Level five listens to other views and explains own goals.";

fn gemini_reply(inner: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": inner.to_string() }] },
            "finishReason": "STOP"
        }]
    }))
}

fn setup(server: &MockServer) -> (AnalysisController<GeminiClient>, Arc<RecordingNotifier>) {
    let config = AnalyzerConfig {
        api_key: "integration-key".to_string(),
        model: "gemini-test".to_string(),
        api_base: server.uri(),
        timeout_secs: 5,
        temperature: 0.0,
    }
    .validated()
    .expect("test config is valid");

    let client = Arc::new(GeminiClient::new(&config).expect("client builds"));
    let notifier = Arc::new(RecordingNotifier::default());
    (AnalysisController::new(client, notifier.clone()), notifier)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_level_five_renders_card() {
    colored::control::set_override(false);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(gemini_reply(json!({
            "score": 5,
            "category": "dignity",
            "explanation": "States own goals and acknowledges the other view."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, notifier) = setup(&server);
    let mut out = Vec::new();
    let rendered = run_analyze(
        &controller,
        "I understand your concern, and here is what I hope for.".to_string(),
        OutputFormat::Text,
        &mut out,
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(rendered);
    assert!(text.contains("Score: 5/8"));
    assert!(text.contains(" Dignity "));
    assert!(text.contains(LEVEL_FIVE));
    assert!(text.contains("States own goals and acknowledges the other view."));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_level_five_json_uses_secondary_badge() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(gemini_reply(json!({
            "score": 5,
            "category": "dignity",
            "explanation": "..."
        })))
        .mount(&server)
        .await;

    let (controller, _notifier) = setup(&server);
    let mut out = Vec::new();
    run_analyze(&controller, "text".to_string(), OutputFormat::Json, &mut out)
        .await
        .unwrap();

    let card: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(card["score_label"], "5/8");
    assert_eq!(card["badge"]["variant"], "secondary");
    assert_eq!(card["badge"]["label"], "Dignity");
    assert_eq!(card["description"], LEVEL_FIVE);
}

#[tokio::test]
async fn test_missing_score_surfaces_analysis_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(gemini_reply(json!({
            "category": "contempt",
            "explanation": "no score here"
        })))
        .mount(&server)
        .await;

    let (controller, notifier) = setup(&server);
    let mut out = Vec::new();
    let rendered = run_analyze(&controller, "text".to_string(), OutputFormat::Text, &mut out)
        .await
        .unwrap();

    assert!(!rendered);
    assert!(out.is_empty());
    assert!(controller.current_result().is_none());
    assert_eq!(
        notifier.messages(),
        vec!["Failed to analyze text. Please try again.".to_string()]
    );
}

#[tokio::test]
async fn test_out_of_range_score_surfaces_analysis_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(gemini_reply(json!({
            "score": 11,
            "category": "dignity",
            "explanation": "too high"
        })))
        .mount(&server)
        .await;

    let (controller, notifier) = setup(&server);
    let mut out = Vec::new();
    let rendered = run_analyze(&controller, "text".to_string(), OutputFormat::Text, &mut out)
        .await
        .unwrap();

    assert!(!rendered);
    assert!(controller.current_result().is_none());
    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_blank_input_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (controller, notifier) = setup(&server);
    let mut out = Vec::new();
    let rendered = run_analyze(&controller, " \n ".to_string(), OutputFormat::Text, &mut out)
        .await
        .unwrap();

    assert!(!rendered);
    assert_eq!(
        notifier.messages(),
        vec!["Please enter some text to analyze".to_string()]
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_interactive_session() {
    colored::control::set_override(false);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(gemini_reply(json!({
            "score": 2,
            "category": "contempt",
            "explanation": "Calls the other side evil."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, notifier) = setup(&server);
    let input = ":last\nThey are evil people.\n\n:last\n:quit\nnever read\n";
    let reader = tokio::io::BufReader::new(input.as_bytes());
    let mut out = Vec::new();

    run_interactive(&controller, reader, OutputFormat::Text, &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("No analysis yet."));
    // Once after the submit, once for `:last`.
    assert_eq!(text.matches("Score: 2/8").count(), 2);
    assert!(text.contains("Level two accuses the other side of promoting evil."));
    assert_eq!(
        notifier.messages(),
        vec!["Please enter some text to analyze".to_string()]
    );
    assert_eq!(
        controller.current_result().map(|r| r.score),
        Some(2)
    );
}
