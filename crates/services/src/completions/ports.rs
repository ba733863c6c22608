use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Domain types defined directly here (following dependency inversion)

/// A validated chat completion request with every default applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionParams {
    pub model: String,
    /// Open key/value messages; never inspected by the emulator
    pub messages: Vec<Map<String, Value>>,
    pub temperature: f64,
    pub top_p: f64,
    pub n: i64,
    pub stream: bool,
    pub stop: Vec<String>,
    pub max_tokens: i64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub logit_bias: Map<String, Value>,
    pub user: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Stop => "stop",
        }
    }
}

/// One synthesized reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub index: i64,
    pub content: String,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: i32,
    pub completion_tokens: i32,
    pub total_tokens: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: TokenUsage,
}

pub trait CompletionServiceTrait: Send + Sync {
    /// Synthesize a chat completion. Infallible once the request has been validated.
    fn create_chat_completion(&self, params: &ChatCompletionParams) -> ChatCompletion;
}
