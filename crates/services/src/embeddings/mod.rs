pub mod ports;

use ports::{Embedding, EmbeddingParams, EmbeddingResult, EmbeddingServiceTrait, EmbeddingUsage};

/// Returns a constant placeholder vector for any input.
///
/// The vector is built once; it is never derived from the input text.
pub struct EmbeddingServiceImpl {
    vector: Vec<f32>,
}

impl EmbeddingServiceImpl {
    pub fn new(dimensions: usize, value: f32) -> Self {
        Self {
            vector: vec![value; dimensions],
        }
    }
}

impl EmbeddingServiceTrait for EmbeddingServiceImpl {
    fn create_embeddings(&self, params: &EmbeddingParams) -> EmbeddingResult {
        tracing::debug!(
            model = %params.model,
            input_len = params.input.len(),
            "Synthesizing embedding"
        );

        EmbeddingResult {
            model: params.model.clone(),
            data: vec![Embedding {
                index: 0,
                vector: self.vector.clone(),
            }],
            usage: EmbeddingUsage::default(),
        }
    }
}
