//! Folio configuration system
//!
//! This crate provides centralized configuration for the reveal orchestrator
//! and the demo driver, loading settings from `folio.toml` with `FOLIO_*`
//! environment variables as overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    /// Defaults for discrete scroll reveals
    pub reveal: RevealDefaults,
    /// Defaults for scroll-scrubbed entries
    pub scrub: ScrubDefaults,
    /// Demo driver settings
    pub demo: DemoConfig,
}

/// Defaults applied to page-level reveals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealDefaults {
    /// Tween duration in milliseconds
    pub duration_ms: f32,
    /// Easing name, e.g. `power3.out`, `back.out(1.7)`, `ease-in-out`
    pub ease: String,
    /// Trigger start position, e.g. `top 80%`
    pub start: String,
    /// Trigger end position, e.g. `top 50%`
    pub end: String,
}

/// Defaults for scroll-scrubbed entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubDefaults {
    /// Catch-up time for smoothed scrubbing; `None` follows the scroll exactly
    pub smoothing_ms: Option<f32>,
}

/// Demo driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated viewport height in pixels
    pub viewport_height: f64,
    /// Simulated frame length in milliseconds
    pub frame_ms: f32,
    /// Pixels scrolled per frame
    pub scroll_step: f64,
    /// Frames to run after each scroll pass so tweens can settle
    pub settle_frames: u32,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Default for RevealDefaults {
    fn default() -> Self {
        Self {
            duration_ms: 800.0,
            ease: "power3.out".to_string(),
            start: "top 80%".to_string(),
            end: "top 50%".to_string(),
        }
    }
}

impl Default for ScrubDefaults {
    fn default() -> Self {
        Self {
            smoothing_ms: Some(1000.0),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            viewport_height: 720.0,
            frame_ms: 1000.0 / 60.0,
            scroll_step: 120.0,
            settle_frames: 120,
            log_filter: None,
        }
    }
}

fn env_flag_off(val: &str) -> bool {
    val == "0" || val.eq_ignore_ascii_case("off") || val.eq_ignore_ascii_case("false")
}

impl FolioConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location (folio.toml in the current directory)
    /// or return default configuration if the file doesn't exist or can't be parsed
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable numeric values are ignored.
    pub fn merge_with_env(&mut self) {
        // Reveal defaults
        if let Ok(val) = std::env::var("FOLIO_REVEAL_DURATION_MS") {
            if let Ok(ms) = val.parse::<f32>() {
                self.reveal.duration_ms = ms;
            }
        }
        if let Ok(ease) = std::env::var("FOLIO_REVEAL_EASE") {
            self.reveal.ease = ease;
        }
        if let Ok(start) = std::env::var("FOLIO_REVEAL_START") {
            self.reveal.start = start;
        }
        if let Ok(end) = std::env::var("FOLIO_REVEAL_END") {
            self.reveal.end = end;
        }

        // Scrub defaults
        if let Ok(val) = std::env::var("FOLIO_SCRUB_SMOOTHING_MS") {
            if env_flag_off(&val) {
                self.scrub.smoothing_ms = None;
            } else if let Ok(ms) = val.parse::<f32>() {
                self.scrub.smoothing_ms = Some(ms);
            }
        }

        // Demo settings
        if let Ok(val) = std::env::var("FOLIO_VIEWPORT_HEIGHT") {
            if let Ok(height) = val.parse::<f64>() {
                self.demo.viewport_height = height;
            }
        }
        if let Ok(val) = std::env::var("FOLIO_FRAME_MS") {
            if let Ok(ms) = val.parse::<f32>() {
                self.demo.frame_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("FOLIO_SCROLL_STEP") {
            if let Ok(step) = val.parse::<f64>() {
                self.demo.scroll_step = step;
            }
        }
        if let Ok(val) = std::env::var("FOLIO_SETTLE_FRAMES") {
            if let Ok(frames) = val.parse::<u32>() {
                self.demo.settle_frames = frames;
            }
        }
        if let Ok(filter) = std::env::var("FOLIO_LOG") {
            self.demo.log_filter = Some(filter);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from folio.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
