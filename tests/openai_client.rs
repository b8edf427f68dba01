//! OpenAI 翻译客户端集成测试
//!
//! 在本地启动一个模拟的 chat completions 服务

#![cfg(feature = "web")]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};

use flashcards::translation::{OpenAiConfig, OpenAiTranslator, TranslationError, Translator};

async fn ok_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer test-key");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
    }

    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    let content = if prompt.contains("from English to Greek") && prompt.ends_with("Text: hello") {
        "  γεια σας \n"
    } else {
        "unexpected prompt"
    };

    (
        StatusCode::OK,
        Json(json!({
            "model": body["model"],
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })),
    )
}

async fn slow_completion() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"choices": [{"message": {"content": "too late"}}]}))
}

async fn error_completion() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "boom"})),
    )
}

async fn empty_completion() -> Json<Value> {
    Json(json!({"choices": []}))
}

async fn start_mock_server() -> SocketAddr {
    let app = Router::new()
        .route("/ok/chat/completions", post(ok_completion))
        .route("/slow/chat/completions", post(slow_completion))
        .route("/error/chat/completions", post(error_completion))
        .route("/empty/chat/completions", post(empty_completion));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn translator(addr: SocketAddr, path: &str, timeout: Duration) -> OpenAiTranslator {
    let config = OpenAiConfig {
        base_url: format!("http://{}/{}", addr, path),
        timeout,
        ..OpenAiConfig::new("test-key")
    };
    OpenAiTranslator::new(config).unwrap()
}

#[tokio::test]
async fn test_successful_translation_is_trimmed() {
    let addr = start_mock_server().await;
    let client = translator(addr, "ok", Duration::from_secs(5));

    let result = client.translate("hello", "en", "el").await.unwrap();
    assert_eq!(result, "γεια σας");
}

#[tokio::test]
async fn test_timeout_is_failure() {
    let addr = start_mock_server().await;
    let client = translator(addr, "slow", Duration::from_millis(200));

    let err = client.translate("hello", "en", "el").await.unwrap_err();
    assert!(matches!(err, TranslationError::Failed(_)));
}

#[tokio::test]
async fn test_error_status_is_failure() {
    let addr = start_mock_server().await;
    let client = translator(addr, "error", Duration::from_secs(5));

    let err = client.translate("hello", "en", "el").await.unwrap_err();
    assert!(matches!(err, TranslationError::Failed(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_empty_completion_is_failure() {
    let addr = start_mock_server().await;
    let client = translator(addr, "empty", Duration::from_secs(5));

    let err = client.translate("hello", "en", "el").await.unwrap_err();
    assert!(matches!(err, TranslationError::Failed(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_failure() {
    // 绑定后立即释放，得到一个无人监听的端口
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = translator(addr, "ok", Duration::from_secs(2));
    let err = client.translate("hello", "en", "el").await.unwrap_err();
    assert!(matches!(err, TranslationError::Failed(_)));
}
