use serde::{Deserialize, Serialize};
use swingcoach_core::{GeminiError, GeminiResult, TextGeneratorRef};
use tracing::{debug, error};

use crate::phase::SwingPhase;
use crate::sampler::FrameSample;

/// One coaching tip for one sampled frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub sample: FrameSample,
    pub tip: String,
    pub sequence_index: usize,
}

/// Tip used whenever the model cannot be reached or returns nothing usable
pub fn fallback_tip(phase: SwingPhase) -> String {
    format!(
        "Focus on maintaining good posture and balance during your {}.",
        phase.label().to_lowercase()
    )
}

/// Instruction sent alongside a frame
pub fn frame_prompt(sample: &FrameSample) -> String {
    format!(
        "Analyze this specific frame from a golf swing video.\n\
         \n\
         Frame context: {phase} ({offset}ms into the swing)\n\
         \n\
         Look at the golfer's:\n\
         - Body position and posture\n\
         - Club position and angle\n\
         - Balance and weight distribution\n\
         - Alignment and setup\n\
         \n\
         Provide ONE specific, actionable tip for this swing phase. Keep it concise (1-2 sentences max).\n\
         Address the golfer directly using \"you\".\n\
         \n\
         Format: Give just the tip, no extra formatting or explanations.",
        phase = sample.phase.label(),
        offset = sample.offset_ms,
    )
}

/// Asks the model for one tip per frame. Never fails outward.
#[derive(Debug, Clone)]
pub struct FrameAnalyzer {
    generator: TextGeneratorRef,
}

impl FrameAnalyzer {
    pub fn new(generator: TextGeneratorRef) -> Self {
        Self { generator }
    }

    /// Single attempt; any failure becomes the phase's fallback tip
    pub async fn analyze(&self, sample: &FrameSample, index: usize) -> String {
        match self.request_tip(sample).await {
            Ok(tip) => {
                debug!(index, phase = %sample.phase, "Frame analyzed");
                tip
            }
            Err(e) => {
                error!(index, phase = %sample.phase, error = %e, "Error analyzing frame");
                fallback_tip(sample.phase)
            }
        }
    }

    /// Runs `analyze` and keeps the sample alongside its tip
    pub async fn analyze_sample(&self, sample: FrameSample, index: usize) -> FrameAnalysis {
        let tip = self.analyze(&sample, index).await;
        FrameAnalysis {
            sample,
            tip,
            sequence_index: index,
        }
    }

    async fn request_tip(&self, sample: &FrameSample) -> GeminiResult<String> {
        let bytes = sample.image.read_bytes().await.map_err(|e| {
            GeminiError::EncodingError(format!("Failed to read frame {}: {}", sample.image, e))
        })?;

        let tip = self
            .generator
            .generate_with_image(&frame_prompt(sample), &bytes)
            .await?;

        let tip = tip.trim();
        if tip.is_empty() {
            return Err(GeminiError::ResponseError("Empty tip".to_string()));
        }
        Ok(tip.to_string())
    }
}
