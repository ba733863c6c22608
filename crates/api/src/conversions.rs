use crate::models::*;
use services::{
    completions::ports::{ChatCompletion, ChatCompletionParams, TokenUsage},
    embeddings::ports::{EmbeddingParams, EmbeddingResult},
};

// ============================================================================
// HTTP to Service Conversions
// ============================================================================

impl From<ChatCompletionRequest> for ChatCompletionParams {
    fn from(req: ChatCompletionRequest) -> Self {
        Self {
            model: req.model,
            messages: req.messages,
            temperature: req.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: req.top_p.unwrap_or(DEFAULT_TOP_P),
            n: req.n.unwrap_or(DEFAULT_N),
            stream: req.stream.unwrap_or(false),
            stop: req.stop.map(StopSequences::into_vec).unwrap_or_default(),
            max_tokens: req.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            presence_penalty: req.presence_penalty.unwrap_or(0.0),
            // The correct spelling wins over the legacy one
            frequency_penalty: req
                .frequency_penalty
                .or(req.frequence_penalty)
                .unwrap_or(0.0),
            logit_bias: req.logit_bias.unwrap_or_default(),
            user: req.user.unwrap_or_default(),
        }
    }
}

impl From<EmbeddingsRequest> for EmbeddingParams {
    fn from(req: EmbeddingsRequest) -> Self {
        Self {
            model: req.model,
            input: req.input,
            user: req.user.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Service to HTTP Conversions
// ============================================================================

const ASSISTANT_ROLE: &str = "assistant";

impl From<TokenUsage> for Usage {
    fn from(usage: TokenUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

impl From<ChatCompletion> for ChatCompletionResponse {
    fn from(completion: ChatCompletion) -> Self {
        Self {
            id: completion.id,
            model: completion.model,
            object: "chat.completion".to_string(),
            created: completion.created,
            choices: completion
                .choices
                .into_iter()
                .map(|choice| ChatChoice {
                    index: choice.index,
                    role: ASSISTANT_ROLE.to_string(),
                    message: Message {
                        role: ASSISTANT_ROLE.to_string(),
                        content: choice.content,
                    },
                    finish_reason: choice.finish_reason.as_str().to_string(),
                })
                .collect(),
            usage: completion.usage.into(),
        }
    }
}

impl From<EmbeddingResult> for EmbeddingsResponse {
    fn from(result: EmbeddingResult) -> Self {
        Self {
            object: "list".to_string(),
            data: result
                .data
                .into_iter()
                .map(|embedding| EmbeddingObject {
                    object: "embedding".to_string(),
                    index: embedding.index,
                    embedding: embedding.vector,
                })
                .collect(),
            model: result.model,
            usage: EmbeddingUsage {
                prompt_tokens: result.usage.prompt_tokens,
                total_tokens: result.usage.total_tokens,
            },
        }
    }
}
