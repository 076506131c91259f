use std::time::Duration;

use clausewise_assistant::{
    Answer, AssistantConfig, Embedder, LlmClient, LlmRequest, Message, OpenAiClient, QaEngine, Summarizer,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
    })
}

fn config(server: &MockServer) -> AssistantConfig {
    AssistantConfig::builder()
        .api_key("test-key")
        .api_base_url(server.uri())
        .timeout_secs(5)
        .build()
}

fn client(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(&config(server))
        .expect("client creation")
        .with_retry_delays(vec![Duration::from_millis(10); 2])
}

fn request(prompt: &str) -> LlmRequest {
    LlmRequest {
        messages: vec![Message::user(prompt)],
        max_tokens: 64,
        temperature: 0.0,
    }
}

#[tokio::test]
async fn test_chat_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Thirty days.")))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server).complete(&request("How long?")).await.expect("completion");
    assert_eq!(response.content, "Thirty days.");
    assert_eq!(response.input_tokens, 42);
    assert_eq!(response.output_tokens, 7);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"message": "Invalid model specified", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&request("hi"))
        .await
        .expect_err("should fail")
        .to_string();
    assert!(err.contains("status 400"), "unexpected error: {err}");
    assert!(err.contains("Invalid model"), "unexpected error: {err}");
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("ok")))
        .mount(&server)
        .await;

    let response = client(&server).complete(&request("hi")).await.expect("completion");
    assert_eq!(response.content, "ok");
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server).complete(&request("hi")).await.expect_err("should fail");
    assert!(err.to_string().contains("internal error"));
}

#[tokio::test]
async fn test_rate_limit_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("after wait")))
        .mount(&server)
        .await;

    let response = client(&server).complete(&request("hi")).await.expect("completion");
    assert_eq!(response.content, "after wait");
}

#[tokio::test]
async fn test_embeddings_are_reordered_by_index() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.0, 1.0]},
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
            ],
            "model": "text-embedding-3-small"
        })))
        .mount(&server)
        .await;

    let vectors = client(&server)
        .embed(&["first".to_string(), "second".to_string()])
        .await
        .expect("embeddings");
    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn test_summarize_document_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("- Rent is monthly.")))
        .mount(&server)
        .await;

    let config = config(&server);
    let client = client(&server);
    let summary = Summarizer::new(&client, &config)
        .summarize_document("The tenant pays rent every month.")
        .await;
    assert_eq!(summary, "- Rent is monthly.");
}

#[tokio::test]
async fn test_question_falls_back_to_embeddings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"index": 0, "embedding": [1.0, 0.0]},
                {"index": 1, "embedding": [0.0, 1.0]}
            ]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"index": 0, "embedding": [0.1, 0.9]}]
        })))
        .mount(&server)
        .await;

    let config = config(&server);
    let client = client(&server);
    let engine = QaEngine::new(Some(&client), Some(&client), &config);
    let clauses = vec!["Fees are monthly.".to_string(), "Either party may terminate.".to_string()];

    let answer = engine.answer("Can I terminate?", "document", &clauses).await;
    match answer {
        Answer::Related { clauses: hits } => {
            assert_eq!(hits.len(), 2);
            assert_eq!(hits[0].clause, "Either party may terminate.");
        }
        other => panic!("expected related clauses, got {other:?}"),
    }
}
