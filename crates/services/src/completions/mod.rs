pub mod ports;

use crate::common::{Clock, IdGenerator};
use ports::{
    ChatCompletion, ChatCompletionParams, CompletionChoice, CompletionServiceTrait, FinishReason,
    TokenUsage,
};
use std::sync::Arc;

/// Synthesizes chat completions without consulting any model.
///
/// Every response carries exactly one choice with the configured placeholder
/// content. The reported model is the configured mock name, never the requested
/// one, so callers can tell mock traffic apart.
pub struct CompletionServiceImpl {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    model: String,
    content: String,
}

impl CompletionServiceImpl {
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        model: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            clock,
            ids,
            model: model.into(),
            content: content.into(),
        }
    }
}

impl CompletionServiceTrait for CompletionServiceImpl {
    fn create_chat_completion(&self, params: &ChatCompletionParams) -> ChatCompletion {
        tracing::debug!(
            requested_model = %params.model,
            messages = params.messages.len(),
            n = params.n,
            stream = params.stream,
            "Synthesizing chat completion"
        );

        let choices = vec![CompletionChoice {
            index: 0,
            content: self.content.clone(),
            finish_reason: FinishReason::Stop,
        }];

        ChatCompletion {
            id: self.ids.generate_id(),
            created: self.clock.now_unix_seconds(),
            model: self.model.clone(),
            choices,
            // No tokenization happens here
            usage: TokenUsage::default(),
        }
    }
}
