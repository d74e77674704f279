//! Frame extraction by shelling out to `ffmpeg`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::media::{ImageResource, VideoResource};
use crate::sampler::{FrameError, FrameExtractor};

/// Writes one JPEG per requested offset into `output_dir`.
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    ffmpeg_bin: PathBuf,
    output_dir: PathBuf,
    /// Keeps frames of different sessions apart when they share a directory
    run_id: Uuid,
}

impl FfmpegFrameExtractor {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            output_dir: output_dir.into(),
            run_id: Uuid::new_v4(),
        }
    }

    pub fn with_binary(mut self, ffmpeg_bin: impl Into<PathBuf>) -> Self {
        self.ffmpeg_bin = ffmpeg_bin.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn frame_path(&self, offset_ms: u64) -> PathBuf {
        self.output_dir
            .join(format!("frame_{}_{:06}.jpg", self.run_id.simple(), offset_ms))
    }
}

/// Maps a 0.0..=1.0 quality to ffmpeg's JPEG `-q:v` scale (2 best, 31 worst).
/// Out-of-range values are clamped here and nowhere else.
pub fn qscale_for_quality(quality: f32) -> u8 {
    let quality = quality.clamp(0.0, 1.0);
    (2.0 + ((1.0 - quality) * 29.0).round()) as u8
}

#[async_trait]
impl FrameExtractor for FfmpegFrameExtractor {
    async fn extract_frame(
        &self,
        video: &VideoResource,
        offset_ms: u64,
        quality: f32,
    ) -> Result<ImageResource, FrameError> {
        let video_path = video.to_path();
        if !video_path.exists() {
            return Err(FrameError::VideoNotFound(
                video_path.to_string_lossy().to_string(),
            ));
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let output_path = self.frame_path(offset_ms);
        let timestamp_secs = offset_ms as f64 / 1000.0;

        let output = tokio::process::Command::new(&self.ffmpeg_bin)
            .args(["-y", "-v", "error", "-ss", &format!("{timestamp_secs:.3}"), "-i"])
            .arg(&video_path)
            .args([
                "-frames:v",
                "1",
                "-q:v",
                &qscale_for_quality(quality).to_string(),
            ])
            .arg(&output_path)
            .output()
            .await
            .map_err(FrameError::NotFound)?;

        if !output.status.success() {
            return Err(FrameError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        // ffmpeg exits 0 without writing anything when seeking past the end
        if !output_path.exists() {
            return Err(FrameError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: format!("no frame at {offset_ms}ms"),
            });
        }

        debug!(offset_ms, path = %output_path.display(), "ffmpeg wrote frame");
        Ok(ImageResource::from_path(&output_path))
    }
}
