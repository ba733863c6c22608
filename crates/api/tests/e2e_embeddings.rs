mod common;

use api::models::{EmbeddingsResponse, ErrorResponse};
use common::*;
use serde_json::{json, Value};

#[tokio::test]
async fn test_embeddings_example_response() {
    let server = setup_test_server();

    let response = server
        .post(&path("/embeddings"))
        .json(&json!({"model": "embed-1", "input": "hello"}))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "object": "list",
            "model": "embed-1",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.1, 0.1, 0.1]}],
            "usage": {"prompt_tokens": 0, "total_tokens": 0}
        })
    );
}

#[tokio::test]
async fn test_embeddings_echo_requested_model() {
    let server = setup_test_server();

    for model in ["text-embedding-3-small", "m", "some/org-model:latest"] {
        let response = server
            .post(&path("/embeddings"))
            .json(&json!({"model": model, "input": "anything", "user": "u-1"}))
            .await;

        assert_eq!(response.status_code(), 200);
        let body = response.json::<EmbeddingsResponse>();
        assert_eq!(body.model, model);
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].index, 0);
    }
}

#[tokio::test]
async fn test_embeddings_vector_does_not_depend_on_input() {
    let server = setup_test_server();

    let short = server
        .post(&path("/embeddings"))
        .json(&json!({"model": "e", "input": ""}))
        .await
        .json::<EmbeddingsResponse>();
    let long = server
        .post(&path("/embeddings"))
        .json(&json!({"model": "e", "input": "a much longer input ".repeat(50)}))
        .await
        .json::<EmbeddingsResponse>();

    assert_eq!(short.data, long.data);
}

#[tokio::test]
async fn test_embeddings_missing_model() {
    let server = setup_test_server();

    let response = server
        .post(&path("/embeddings"))
        .json(&json!({"input": "hello"}))
        .await;

    assert_eq!(response.status_code(), 422);
    let err = response.json::<ErrorResponse>();
    assert_eq!(err.error.param.as_deref(), Some("model"));
    assert_eq!(err.error.code.as_deref(), Some("missing_field"));
}

#[tokio::test]
async fn test_embeddings_rejects_list_input() {
    let server = setup_test_server();

    let response = server
        .post(&path("/embeddings"))
        .json(&json!({"model": "e", "input": ["a", "b"]}))
        .await;

    assert_eq!(response.status_code(), 422);
    let err = response.json::<ErrorResponse>();
    assert_eq!(err.error.param.as_deref(), Some("input"));
    assert_eq!(err.error.code.as_deref(), Some("invalid_type"));
}

#[tokio::test]
async fn test_embeddings_use_configured_vector() {
    let mut config = test_config();
    config.mock.embedding_dimensions = 5;
    config.mock.embedding_value = 0.5;
    let server = setup_test_server_with_config(config);

    let body = server
        .post(&path("/embeddings"))
        .json(&json!({"model": "e", "input": "x"}))
        .await
        .json::<EmbeddingsResponse>();

    assert_eq!(body.data[0].embedding, vec![0.5; 5]);
}

#[tokio::test]
async fn test_embeddings_echo_empty_model() {
    let server = setup_test_server();

    let response = server
        .post(&path("/embeddings"))
        .json(&json!({"model": "", "input": "x"}))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<EmbeddingsResponse>().model, "");
}
