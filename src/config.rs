use std::path::Path;

use serde::Deserialize;

use crate::error::TrackError;
use crate::types::CueMetadata;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub frame_rate: u32,
    /// Gaps at or below this many seconds are rounding noise.
    pub epsilon_sec: f64,
    pub silence_symbol: String,
    pub defaults: CueMetadata,
    pub lexicon_path: Option<String>,
    pub strip_stress: bool,
    pub silence_window_ms: f64,
}

impl TrackConfig {
    pub const DEFAULT_FRAME_RATE: u32 = 24;
    pub const DEFAULT_EPSILON_SEC: f64 = 0.001;
    pub const DEFAULT_SILENCE_SYMBOL: &'static str = "M";
    pub const DEFAULT_SILENCE_WINDOW_MS: f64 = 10.0;

    pub fn load(path: &Path) -> Result<Self, TrackError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| TrackError::io("read track config", e))?;
        serde_json::from_str(&data).map_err(|e| TrackError::json("parse track config", e))
    }

    pub(crate) fn validate(&self) -> Result<(), TrackError> {
        if self.frame_rate == 0 {
            return Err(TrackError::invalid_config("frame_rate must be > 0"));
        }
        if !self.epsilon_sec.is_finite() || self.epsilon_sec < 0.0 {
            return Err(TrackError::invalid_config(format!(
                "epsilon_sec must be finite and >= 0, got {}",
                self.epsilon_sec
            )));
        }
        if self.silence_symbol.trim().is_empty() {
            return Err(TrackError::invalid_config("silence_symbol must not be blank"));
        }
        if !(self.silence_window_ms > 0.0) {
            return Err(TrackError::invalid_config(format!(
                "silence_window_ms must be > 0, got {}",
                self.silence_window_ms
            )));
        }
        Ok(())
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            frame_rate: Self::DEFAULT_FRAME_RATE,
            epsilon_sec: Self::DEFAULT_EPSILON_SEC,
            silence_symbol: Self::DEFAULT_SILENCE_SYMBOL.to_string(),
            defaults: CueMetadata::default(),
            lexicon_path: None,
            strip_stress: false,
            silence_window_ms: Self::DEFAULT_SILENCE_WINDOW_MS,
        }
    }
}
