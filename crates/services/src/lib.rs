pub mod common;
pub mod completions;
pub mod embeddings;

pub use common::{Clock, IdGenerator, SystemClock, UuidGenerator};
pub use completions::CompletionServiceImpl;
pub use embeddings::EmbeddingServiceImpl;
