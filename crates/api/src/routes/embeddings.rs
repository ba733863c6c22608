use crate::{
    models::*,
    routes::{
        api::AppState,
        common::{json_response, ApiError},
    },
    validation::ValidatedJson,
};
use axum::{extract::State, response::Response};
use services::embeddings::ports::EmbeddingParams;
use tracing::debug;

/// Create embeddings
///
/// Returns one constant placeholder vector and echoes the requested model.
#[utoipa::path(
    post,
    path = "/embeddings",
    tag = "Embeddings",
    request_body = EmbeddingsRequest,
    responses(
        (status = 200, description = "Embedding created", body = EmbeddingsResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Request failed schema validation", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn embeddings(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<EmbeddingsRequest>,
) -> Result<Response, ApiError> {
    debug!(
        "Embeddings request model: {}, input length: {} chars",
        request.model,
        request.input.len()
    );

    let params = EmbeddingParams::from(request);
    let result = app_state.embedding_service.create_embeddings(&params);

    json_response(&EmbeddingsResponse::from(result))
}
