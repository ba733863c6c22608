use crate::{
    models::*,
    routes::{
        api::AppState,
        common::{json_response, ApiError},
    },
    validation::ValidatedJson,
};
use axum::{extract::State, response::Response};
use services::completions::ports::ChatCompletionParams;
use tracing::debug;

/// Create a chat completion
///
/// Returns a fixed assistant reply for any conversation. The reported model is
/// the mock model name, not the requested one.
#[utoipa::path(
    post,
    path = "/chat/completions",
    tag = "Chat",
    request_body = ChatCompletionRequest,
    responses(
        (status = 200, description = "Successful completion", body = ChatCompletionResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Request failed schema validation", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn chat_completions(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatCompletionRequest>,
) -> Result<Response, ApiError> {
    let params = ChatCompletionParams::from(request);
    debug!(
        "Chat completions request model: {}, stream: {}, messages: {}",
        params.model,
        params.stream,
        params.messages.len()
    );

    let completion = app_state.completion_service.create_chat_completion(&params);

    json_response(&ChatCompletionResponse::from(completion))
}
