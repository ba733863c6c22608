pub mod api;
pub mod common;
pub mod completions;
pub mod embeddings;
pub mod health;

pub use completions::chat_completions;
pub use embeddings::embeddings;
pub use health::health_check;
