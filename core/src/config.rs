use crate::errors::{GeminiError, GeminiResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Public Gemini endpoint used when no proxy is configured
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Millisecond offsets sampled from every swing video
pub const DEFAULT_FRAME_OFFSETS_MS: [u64; 7] = [0, 500, 1000, 1500, 2000, 2500, 3000];
pub const DEFAULT_FRAME_QUALITY: f32 = 0.8;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "SWINGCOACH_MODEL";

/// Configuration for the swing coach: Gemini access plus pipeline knobs.
///
/// Every field is optional so that file, environment and command line
/// layers can be merged on top of each other.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CoachConfig {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub model_name: Option<String>,
    pub temperature: Option<f32>,
    pub frame_offsets_ms: Option<Vec<u64>>,
    pub frame_quality: Option<f32>,
    pub frames_dir: Option<PathBuf>,
    pub ffmpeg_path: Option<PathBuf>,
    /// Transcript messages quoted into follow-up prompts. 0 keeps each call stateless.
    pub conversation_history_turns: Option<usize>,
    pub log_level: Option<String>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            model_name: Some(DEFAULT_MODEL.to_string()),
            temperature: Some(0.7),
            frame_offsets_ms: Some(DEFAULT_FRAME_OFFSETS_MS.to_vec()),
            frame_quality: Some(DEFAULT_FRAME_QUALITY),
            frames_dir: None,
            ffmpeg_path: None,
            conversation_history_turns: Some(0),
            log_level: Some("info".to_string()),
        }
    }
}

impl CoachConfig {
    /// A config with every field unset, used as an override layer
    pub fn empty() -> Self {
        Self {
            api_key: None,
            api_base_url: None,
            model_name: None,
            temperature: None,
            frame_offsets_ms: None,
            frame_quality: None,
            frames_dir: None,
            ffmpeg_path: None,
            conversation_history_turns: None,
            log_level: None,
        }
    }

    /// Loads configuration from a file if it exists, otherwise returns the default config.
    ///
    /// Values missing from the file fall back to the defaults.
    pub fn load_from_file(path: &Path) -> GeminiResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            GeminiError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            GeminiError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        Ok(Self::default().merge(&config))
    }

    /// Saves configuration to a file
    pub fn save_to_file(&self, path: &Path) -> GeminiResult<()> {
        let content = toml::to_string(self).map_err(|e| {
            GeminiError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        // Ensure the directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GeminiError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            GeminiError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            api_base_url: other
                .api_base_url
                .clone()
                .or_else(|| self.api_base_url.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            temperature: other.temperature.or(self.temperature),
            frame_offsets_ms: other
                .frame_offsets_ms
                .clone()
                .or_else(|| self.frame_offsets_ms.clone()),
            frame_quality: other.frame_quality.or(self.frame_quality),
            frames_dir: other.frames_dir.clone().or_else(|| self.frames_dir.clone()),
            ffmpeg_path: other.ffmpeg_path.clone().or_else(|| self.ffmpeg_path.clone()),
            conversation_history_turns: other
                .conversation_history_turns
                .or(self.conversation_history_turns),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }

    /// Applies `GEMINI_API_KEY` and `SWINGCOACH_MODEL` on top of this config
    pub fn with_env_overrides(&self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    fn with_overrides_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let env_layer = Self {
            api_key: non_empty(API_KEY_ENV),
            model_name: non_empty(MODEL_ENV),
            ..Self::empty()
        };
        self.merge(&env_layer)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// True when requests go to Google directly rather than through a proxy
    pub fn uses_public_endpoint(&self) -> bool {
        self.api_base_url().trim_end_matches('/') == DEFAULT_API_BASE_URL
    }

    pub fn frame_offsets(&self) -> Vec<u64> {
        self.frame_offsets_ms
            .clone()
            .unwrap_or_else(|| DEFAULT_FRAME_OFFSETS_MS.to_vec())
    }

    pub fn frame_quality(&self) -> f32 {
        self.frame_quality.unwrap_or(DEFAULT_FRAME_QUALITY)
    }

    pub fn history_turns(&self) -> usize {
        self.conversation_history_turns.unwrap_or(0)
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> GeminiResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        GeminiError::ConfigError("Could not determine home directory".to_string())
    })?;

    Ok(home_dir.join(".config").join(app_name))
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> GeminiResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = CoachConfig::load_from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, CoachConfig::default());
        assert_eq!(config.frame_offsets(), DEFAULT_FRAME_OFFSETS_MS.to_vec());
        assert!(config.uses_public_endpoint());
    }

    #[test]
    fn test_partial_file_is_layered_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "model_name = \"gemini-2.0-flash\"\nframe_offsets_ms = [0, 1000]\n",
        )
        .unwrap();

        let config = CoachConfig::load_from_file(&path).unwrap();
        assert_eq!(config.model_name.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(config.frame_offsets(), vec![0, 1000]);
        assert_eq!(config.frame_quality(), DEFAULT_FRAME_QUALITY);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "frame_offsets_ms = \"soon\"").unwrap();

        let err = CoachConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, GeminiError::ConfigError(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = CoachConfig {
            conversation_history_turns: Some(4),
            ..CoachConfig::default()
        };

        config.save_to_file(&path).unwrap();
        let loaded = CoachConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.history_turns(), 4);
    }

    #[test]
    fn test_env_overrides_win_but_blank_values_are_ignored() {
        let base = CoachConfig {
            api_key: Some("from-file".to_string()),
            ..CoachConfig::default()
        };

        let overridden = base.with_overrides_from(|name| match name {
            API_KEY_ENV => Some("from-env".to_string()),
            MODEL_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(overridden.api_key.as_deref(), Some("from-env"));
        assert_eq!(overridden.model_name.as_deref(), Some(DEFAULT_MODEL));
    }

    #[test]
    fn test_quality_passes_through_and_proxy_detected() {
        let config = CoachConfig {
            frame_quality: Some(3.0),
            api_base_url: Some("https://coach-proxy.internal/v1beta".to_string()),
            ..CoachConfig::default()
        };
        // Range handling belongs to the extractor
        assert_eq!(config.frame_quality(), 3.0);
        assert!(!config.uses_public_endpoint());
    }
}
