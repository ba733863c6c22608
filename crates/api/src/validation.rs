//! Request schema validation.
//!
//! Bodies are decoded to a JSON object first and every field is then checked
//! individually, so failures can name the offending field. Types implementing
//! [`FromPayload`] are extracted with [`ValidatedJson`].

use crate::{models::ErrorResponse, routes::common::ApiError};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("field required: {field}")]
    MissingField { field: &'static str },

    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    /// Field the error refers to, `None` for body-level failures
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MalformedJson(_) | ValidationError::NotAnObject => None,
            ValidationError::MissingField { field }
            | ValidationError::InvalidType { field, .. }
            | ValidationError::EmptyField { field } => Some(*field),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MalformedJson(_) => "invalid_json",
            ValidationError::NotAnObject => "invalid_body",
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::InvalidType { .. } => "invalid_type",
            ValidationError::EmptyField { .. } => "empty_field",
        }
    }
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        let mut response = match err.field() {
            Some(field) => ErrorResponse::with_param(
                err.to_string(),
                "invalid_request_error".to_string(),
                field.to_string(),
            ),
            None => ErrorResponse::new(err.to_string(), "invalid_request_error".to_string()),
        };
        response.error.code = Some(err.code().to_string());
        response
    }
}

/// Parse-and-normalize from an untyped JSON payload
pub trait FromPayload: Sized {
    fn from_payload(payload: Value) -> Result<Self, ValidationError>;
}

/// Decode a raw body into a typed request
pub fn parse_body<T: FromPayload>(body: &[u8]) -> Result<T, ValidationError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::MalformedJson(e.to_string()))?;
    T::from_payload(payload)
}

/// Typed view over a JSON object payload
pub(crate) struct Fields {
    map: Map<String, Value>,
}

impl Fields {
    pub(crate) fn from_value(payload: Value) -> Result<Self, ValidationError> {
        match payload {
            Value::Object(map) => Ok(Self { map }),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    /// A field that must be present and non-null
    pub(crate) fn required<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        expected: &'static str,
    ) -> Result<T, ValidationError> {
        match self.map.remove(field) {
            None => Err(ValidationError::MissingField { field }),
            Some(value) => decode(value, field, expected),
        }
    }

    /// A field that may be absent; an explicit `null` is a type error
    pub(crate) fn optional<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        expected: &'static str,
    ) -> Result<Option<T>, ValidationError> {
        self.map
            .remove(field)
            .map(|value| decode(value, field, expected))
            .transpose()
    }

    /// An optional integer. Integral floats such as `16.0` are accepted.
    pub(crate) fn optional_integer(
        &mut self,
        field: &'static str,
    ) -> Result<Option<i64>, ValidationError> {
        self.map
            .remove(field)
            .map(|value| integer(&value, field))
            .transpose()
    }

    /// A field that may be absent or `null`
    pub(crate) fn nullable<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        expected: &'static str,
    ) -> Result<Option<T>, ValidationError> {
        match self.map.remove(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode(value, field, expected).map(Some),
        }
    }

    /// Remove and return the raw value, leaving interpretation to the caller
    pub(crate) fn take(&mut self, field: &str) -> Option<Value> {
        self.map.remove(field)
    }
}

fn decode<T: DeserializeOwned>(
    value: Value,
    field: &'static str,
    expected: &'static str,
) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|_| ValidationError::InvalidType { field, expected })
}

fn integer(value: &Value, field: &'static str) -> Result<i64, ValidationError> {
    let invalid = ValidationError::InvalidType {
        field,
        expected: "an integer",
    };

    let Value::Number(number) = value else {
        return Err(invalid);
    };
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(invalid),
    }
}

/// Require a non-empty string, as with the chat `model` field
pub(crate) fn non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value)
}

/// Extractor running [`FromPayload`] over the request body.
///
/// Unlike `axum::Json`, rejections carry the structured error body and do not
/// depend on the `content-type` header. Failures to read the body keep their
/// own status, such as 413 for bodies over the size limit.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: FromPayload,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;

        let value = parse_body(&body).map_err(ApiError::Validation)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        Fields::from_value(value).unwrap()
    }

    #[test]
    fn test_non_object_payload_rejected() {
        assert_eq!(
            Fields::from_value(json!([1, 2])).err(),
            Some(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn test_required_missing_and_wrong_type() {
        let mut f = fields(json!({"model": 42}));

        assert_eq!(
            f.required::<String>("input", "a string"),
            Err(ValidationError::MissingField { field: "input" })
        );
        assert_eq!(
            f.required::<String>("model", "a string"),
            Err(ValidationError::InvalidType {
                field: "model",
                expected: "a string"
            })
        );
    }

    #[test]
    fn test_optional_rejects_null_but_nullable_accepts_it() {
        let mut f = fields(json!({"temperature": null, "stop": null}));

        assert!(f.optional::<f64>("temperature", "a number").is_err());
        assert_eq!(f.nullable::<String>("stop", "a string"), Ok(None));
        assert_eq!(f.optional::<f64>("top_p", "a number"), Ok(None));
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        let mut f = fields(json!({"n": 1.5, "max_tokens": 16}));

        assert!(f.optional_integer("n").is_err());
        assert_eq!(f.optional_integer("max_tokens"), Ok(Some(16)));
    }

    #[test]
    fn test_integer_fields_accept_integral_floats() {
        let mut f = fields(json!({"n": 1.0, "max_tokens": 16.0, "big": 1e300, "neg": -2.0}));

        assert_eq!(f.optional_integer("n"), Ok(Some(1)));
        assert_eq!(f.optional_integer("max_tokens"), Ok(Some(16)));
        assert_eq!(f.optional_integer("neg"), Ok(Some(-2)));
        assert!(f.optional_integer("big").is_err());
        assert_eq!(f.optional_integer("absent"), Ok(None));
    }

    #[test]
    fn test_integer_fields_reject_non_numbers() {
        let mut f = fields(json!({"n": "1", "max_tokens": null, "best_of": 2.5}));

        for field in ["n", "max_tokens", "best_of"] {
            assert_eq!(
                f.optional_integer(field),
                Err(ValidationError::InvalidType {
                    field,
                    expected: "an integer"
                })
            );
        }
    }

    #[test]
    fn test_non_empty_only_rejects_the_empty_string() {
        assert_eq!(
            non_empty(String::new(), "model"),
            Err(ValidationError::EmptyField { field: "model" })
        );
        assert_eq!(non_empty(" ".to_string(), "model"), Ok(" ".to_string()));
    }

    #[test]
    fn test_parse_body_reports_malformed_json() {
        struct Anything;
        impl FromPayload for Anything {
            fn from_payload(_: Value) -> Result<Self, ValidationError> {
                Ok(Anything)
            }
        }

        let err = parse_body::<Anything>(b"{not json").err().unwrap();
        assert_eq!(err.code(), "invalid_json");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_error_response_names_field() {
        let err = ValidationError::MissingField { field: "model" };
        let response = ErrorResponse::from(&err);

        assert_eq!(response.error.r#type, "invalid_request_error");
        assert_eq!(response.error.param.as_deref(), Some("model"));
        assert_eq!(response.error.code.as_deref(), Some("missing_field"));
        assert_eq!(response.error.message, "field required: model");
    }
}
