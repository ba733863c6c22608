use services::{
    completions::ports::CompletionServiceTrait, embeddings::ports::EmbeddingServiceTrait,
};
use std::sync::Arc;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub completion_service: Arc<dyn CompletionServiceTrait>,
    pub embedding_service: Arc<dyn EmbeddingServiceTrait>,
}
