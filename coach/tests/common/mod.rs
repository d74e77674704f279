#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use swingcoach::{FrameError, FrameExtractor, ImageResource, VideoResource};
use swingcoach_core::{GeminiError, GeminiResult, TextGenerator};
use tokio::sync::Notify;

/// Writes a tiny fake JPEG per offset, or fails every extraction
#[derive(Debug)]
pub struct DiskExtractor {
    dir: PathBuf,
    fail_all: bool,
    pub calls: Mutex<Vec<u64>>,
}

impl DiskExtractor {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            fail_all: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn broken(dir: PathBuf) -> Self {
        Self {
            fail_all: true,
            ..Self::new(dir)
        }
    }
}

#[async_trait]
impl FrameExtractor for DiskExtractor {
    async fn extract_frame(
        &self,
        _video: &VideoResource,
        offset_ms: u64,
        _quality: f32,
    ) -> Result<ImageResource, FrameError> {
        self.calls.lock().unwrap().push(offset_ms);
        if self.fail_all {
            return Err(FrameError::VideoNotFound("swing.mp4".to_string()));
        }
        let path = self.dir.join(format!("frame_{offset_ms}.jpg"));
        std::fs::write(&path, [0xff, 0xd8, 0xff, 0xe0])?;
        Ok(ImageResource::from_path(&path))
    }
}

/// Every call fails as if the service were down
#[derive(Debug, Default)]
pub struct DownGenerator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for DownGenerator {
    async fn generate_text(&self, _prompt: &str) -> GeminiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GeminiError::HttpError {
            status_code: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn generate_with_image(&self, prompt: &str, _jpeg_bytes: &[u8]) -> GeminiResult<String> {
        self.generate_text(prompt).await
    }

    fn model_name(&self) -> &str {
        "down"
    }
}

/// Holds each text call open until released
#[derive(Debug, Default)]
pub struct GatedGenerator {
    pub entered: Notify,
    pub release: Notify,
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate_text(&self, _prompt: &str) -> GeminiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok("Keep your tempo smooth.".to_string())
    }

    async fn generate_with_image(&self, _prompt: &str, _jpeg_bytes: &[u8]) -> GeminiResult<String> {
        Ok("Nice position.".to_string())
    }

    fn model_name(&self) -> &str {
        "gated"
    }
}
