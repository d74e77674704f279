//! Opaque handles to media produced by capture and frame extraction.

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const FILE_SCHEME: &str = "file://";

/// Strips a `file://` scheme so the URI can be opened from disk
fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix(FILE_SCHEME).unwrap_or(uri))
}

/// A recorded or picked swing video. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResource {
    uri: String,
}

impl VideoResource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy().to_string())
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn to_path(&self) -> PathBuf {
        uri_to_path(&self.uri)
    }
}

impl Display for VideoResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// A still JPEG frame pulled out of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResource {
    uri: String,
}

impl ImageResource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy().to_string())
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn to_path(&self) -> PathBuf {
        uri_to_path(&self.uri)
    }

    /// Reads the encoded image bytes
    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.to_path()).await
    }
}

impl Display for ImageResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}
