use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::GeminiResult;

/// Stateless text generation, the only thing the coaching pipeline needs
/// from the model. Each call is independent: no conversation memory is
/// kept on the service side.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Text-only completion
    async fn generate_text(&self, prompt: &str) -> GeminiResult<String>;

    /// Completion over one instruction plus one JPEG image
    async fn generate_with_image(&self, prompt: &str, jpeg_bytes: &[u8]) -> GeminiResult<String>;

    /// Model name, for logging
    fn model_name(&self) -> &str;
}

/// Type alias for Arc-wrapped TextGenerator trait objects
pub type TextGeneratorRef = Arc<dyn TextGenerator>;
