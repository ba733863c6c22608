use crate::{models::ErrorResponse, validation::ValidationError};
use axum::{
    extract::rejection::BytesRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;

/// Errors surfaced by the emulated endpoints
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The body could not be read, e.g. it exceeds the size limit
    #[error(transparent)]
    Body(#[from] BytesRejection),

    /// A synthesized response could not be encoded; always a defect
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Map API errors to HTTP status codes
pub fn map_api_error_to_status(error: &ApiError) -> StatusCode {
    match error {
        ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::Body(rejection) => rejection.status(),
        ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = map_api_error_to_status(&self);
        let body = match &self {
            ApiError::Validation(err) => {
                tracing::debug!(error = %err, "Rejected request payload");
                ErrorResponse::from(err)
            }
            ApiError::Body(rejection) => {
                tracing::debug!(error = %rejection, "Failed to read request body");
                let mut response = ErrorResponse::new(
                    rejection.body_text(),
                    "invalid_request_error".to_string(),
                );
                response.error.code = Some("unreadable_body".to_string());
                response
            }
            ApiError::Serialization(err) => {
                tracing::error!(error = %err, "Failed to serialize synthesized response");
                ErrorResponse::new(
                    "internal error while encoding the response".to_string(),
                    "internal_error".to_string(),
                )
            }
        };
        (status, ResponseJson(body)).into_response()
    }
}

/// Encode a success body up front so encoding failures become [`ApiError::Serialization`]
pub fn json_response<T: Serialize>(body: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response())
}
