use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::media::{ImageResource, VideoResource};
use crate::phase::SwingPhase;

/// Error type for a single frame extraction
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("video file not found: {0}")]
    VideoNotFound(String),

    #[error("frame extractor binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("frame extraction failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pulls one still JPEG out of a video. Implemented by the ffmpeg
/// extractor in production and by fakes in tests.
#[async_trait]
pub trait FrameExtractor: Send + Sync + std::fmt::Debug {
    /// `quality` is nominally 0.0..=1.0; implementations clamp it
    async fn extract_frame(
        &self,
        video: &VideoResource,
        offset_ms: u64,
        quality: f32,
    ) -> Result<ImageResource, FrameError>;
}

pub type FrameExtractorRef = Arc<dyn FrameExtractor>;

/// A still frame tagged with the swing phase its offset falls into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub image: ImageResource,
    pub offset_ms: u64,
    pub phase: SwingPhase,
}

impl FrameSample {
    pub fn new(image: ImageResource, offset_ms: u64) -> Self {
        Self {
            image,
            offset_ms,
            phase: SwingPhase::from_offset_ms(offset_ms),
        }
    }
}

/// Extracts frames at fixed offsets, one at a time.
#[derive(Debug, Clone)]
pub struct FrameSampler {
    extractor: FrameExtractorRef,
    quality: f32,
}

impl FrameSampler {
    pub fn new(extractor: FrameExtractorRef, quality: f32) -> Self {
        Self { extractor, quality }
    }

    /// Samples `video` at every offset, in ascending offset order.
    ///
    /// Offsets that fail to extract are logged and left out; if all of them
    /// fail the result is empty rather than an error.
    pub async fn sample(&self, video: &VideoResource, offsets: &[u64]) -> Vec<FrameSample> {
        let mut offsets = offsets.to_vec();
        offsets.sort_unstable();
        offsets.dedup();

        let mut samples = Vec::with_capacity(offsets.len());
        for offset_ms in offsets {
            match self
                .extractor
                .extract_frame(video, offset_ms, self.quality)
                .await
            {
                Ok(image) => {
                    debug!(offset_ms, image = %image, "Extracted frame");
                    samples.push(FrameSample::new(image, offset_ms));
                }
                Err(e) => {
                    warn!(offset_ms, error = %e, "Failed to extract frame");
                }
            }
        }

        info!(video = %video, extracted = samples.len(), "Frame sampling finished");
        samples
    }
}
