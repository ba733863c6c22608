use crate::validation::{non_empty, Fields, FromPayload, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

// ============================================
// Chat Completions
// ============================================

/// Chat completion request as sent by the client.
///
/// Omitted optional fields take provider defaults when the request is handed
/// to the completion service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatCompletionRequest {
    /// Model identifier; must not be empty
    pub model: String,
    /// Role/content mappings; any keys are accepted
    #[schema(value_type = Vec<Object>)]
    pub messages: Vec<Map<String, Value>>,
    /// Defaults to 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Defaults to 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Defaults to 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopSequences>,
    /// Defaults to 7
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    /// Legacy spelling of `frequency_penalty`, used only when that field is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(deprecated)]
    pub frequence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub logit_bias: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// `stop` accepts a single sequence or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StopSequences {
    Single(String),
    Multiple(Vec<String>),
}

impl StopSequences {
    /// List form; a single empty string means no stop sequences
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StopSequences::Single(s) if s.is_empty() => Vec::new(),
            StopSequences::Single(s) => vec![s],
            StopSequences::Multiple(items) => items,
        }
    }
}

pub const DEFAULT_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_TOP_P: f64 = 1.0;
pub const DEFAULT_N: i64 = 1;
pub const DEFAULT_MAX_TOKENS: i64 = 7;

impl FromPayload for ChatCompletionRequest {
    fn from_payload(payload: Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::from_value(payload)?;

        Ok(Self {
            model: non_empty(fields.required("model", "a string")?, "model")?,
            messages: fields.required("messages", "a list of objects")?,
            temperature: fields.optional("temperature", "a number")?,
            top_p: fields.optional("top_p", "a number")?,
            n: fields.optional_integer("n")?,
            stream: fields.optional("stream", "a boolean")?,
            stop: parse_stop(fields.take("stop"))?,
            max_tokens: fields.optional_integer("max_tokens")?,
            presence_penalty: fields.optional("presence_penalty", "a number")?,
            frequency_penalty: fields.optional("frequency_penalty", "a number")?,
            frequence_penalty: fields.optional("frequence_penalty", "a number")?,
            logit_bias: fields.nullable("logit_bias", "an object")?,
            user: fields.optional("user", "a string")?,
        })
    }
}

/// Absent and null both mean no stop sequences
fn parse_stop(value: Option<Value>) -> Result<Option<StopSequences>, ValidationError> {
    let invalid = ValidationError::InvalidType {
        field: "stop",
        expected: "a string or a list of strings",
    };

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(StopSequences::Single(s))),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(invalid.clone()),
            })
            .collect::<Result<_, _>>()
            .map(|items| Some(StopSequences::Multiple(items))),
        Some(_) => Err(invalid),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub role: String, // "assistant"
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatChoice {
    pub index: i64,
    /// Role of the choice author, repeated from `message.role`
    pub role: String,
    pub message: Message,
    pub finish_reason: String, // "stop"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Usage {
    pub prompt_tokens: i32,
    pub completion_tokens: i32,
    pub total_tokens: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub object: String, // "chat.completion"
    pub created: i64,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

// ============================================
// Embeddings
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbeddingsRequest {
    pub model: String,
    pub input: String,
    /// Defaults to ""
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl FromPayload for EmbeddingsRequest {
    fn from_payload(payload: Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::from_value(payload)?;

        Ok(Self {
            model: fields.required("model", "a string")?,
            input: fields.required("input", "a string")?,
            user: fields.optional("user", "a string")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbeddingObject {
    pub object: String, // "embedding"
    pub index: i64,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmbeddingUsage {
    pub prompt_tokens: i32,
    pub total_tokens: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbeddingsResponse {
    pub object: String, // "list"
    pub data: Vec<EmbeddingObject>,
    pub model: String,
    pub usage: EmbeddingUsage,
}

// ============================================
// Errors
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub param: Option<String>,
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: String, error_type: String) -> Self {
        Self {
            error: ErrorDetail {
                message,
                r#type: error_type,
                param: None,
                code: None,
            },
        }
    }

    pub fn with_param(message: String, error_type: String, param: String) -> Self {
        Self {
            error: ErrorDetail {
                message,
                r#type: error_type,
                param: Some(param),
                code: None,
            },
        }
    }
}
