//! 生成式 API 客户端测试

use cinesearch::domain::traits::Generator;
use cinesearch::infrastructure::network::generative::GeminiGenerator;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn generator(server: &MockServer) -> GeminiGenerator {
    GeminiGenerator::new(
        reqwest::Client::new(),
        format!("{}{}", server.uri(), ENDPOINT_PATH),
        "gem-key".to_string(),
        0.7,
    )
}

#[tokio::test]
async fn test_request_carries_key_prompt_and_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(header("x-goog-api-key", "gem-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "find me heist movies"}]}],
            "generationConfig": {"temperature": 0.7}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "[]"}], "role": "model"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = generator(&server)
        .generate("find me heist movies")
        .await
        .unwrap();
    assert_eq!(answer.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_missing_candidates_is_no_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let answer = generator(&server).generate("anything").await.unwrap();
    assert_eq!(answer, None);
}

#[tokio::test]
async fn test_service_unavailable_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(generator(&server).generate("anything").await.is_err());
}
