use crate::{models::*, routes::health::HealthResponse};
use utoipa::openapi::{server::Server, OpenApi as OpenApiDocument};
use utoipa::OpenApi;

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mock Inference API",
        description = "Emulates the chat completion and embedding endpoints of an LLM inference provider.\n\nResponses are synthesized placeholders: no model is ever called. Use it to exercise request construction and response parsing in client code.",
        version = "0.0.1",
        license(
            name = "MIT",
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::completions::chat_completions,
        crate::routes::embeddings::embeddings,
    ),
    components(
        schemas(
            HealthResponse,
            ChatCompletionRequest, StopSequences, ChatCompletionResponse, ChatChoice, Message, Usage,
            EmbeddingsRequest, EmbeddingsResponse, EmbeddingObject, EmbeddingUsage,
            ErrorResponse, ErrorDetail,
        ),
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Chat", description = "Chat completions"),
        (name = "Embeddings", description = "Text embeddings"),
    )
)]
pub struct ApiDoc;

/// The generated document with the emulated routes' prefix as its only server
pub fn openapi_for_prefix(prefix: &str) -> OpenApiDocument {
    let mut doc = ApiDoc::openapi();
    let url = if prefix.is_empty() { "/" } else { prefix };
    doc.servers = Some(vec![Server::new(url)]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generation() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Mock Inference API");
        assert!(doc.paths.paths.contains_key("/chat/completions"));
        assert!(doc.paths.paths.contains_key("/embeddings"));
        assert!(doc.paths.paths.contains_key("/"));

        let components = doc.components.as_ref().unwrap();
        assert!(components.schemas.contains_key("ChatCompletionRequest"));
        assert!(components.schemas.contains_key("EmbeddingsResponse"));
        assert!(components.schemas.contains_key("ErrorResponse"));
    }

    #[test]
    fn test_request_schemas_mark_only_mandatory_fields_required() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        let chat = &schemas["ChatCompletionRequest"];
        assert_eq!(chat["required"], serde_json::json!(["model", "messages"]));
        assert!(chat["properties"]["frequence_penalty"].is_object());
        assert_eq!(chat["properties"]["frequence_penalty"]["deprecated"], true);

        let embeddings = &schemas["EmbeddingsRequest"];
        assert_eq!(embeddings["required"], serde_json::json!(["model", "input"]));

        let stop = &schemas["StopSequences"];
        assert_eq!(stop["oneOf"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_openapi_server_uses_prefix() {
        let doc = openapi_for_prefix("/api/v1");
        let servers = doc.servers.unwrap();

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "/api/v1");
    }
}
