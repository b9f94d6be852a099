use std::fmt;

use serde::{Deserialize, Serialize};

/// Head or eye orientation as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "M")]
    Middle,
    #[serde(rename = "R")]
    Right,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Middle => "M",
            Self::Right => "R",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Neutral,
    Sad,
    Angry,
    Surprised,
}

impl Emotion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Surprised => "surprised",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything about a frame's look except the mouth shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueMetadata {
    pub character: String,
    pub head_direction: Direction,
    pub eye_direction: Direction,
    pub emotion: Emotion,
    pub eye_blinking: bool,
    pub body_pose: String,
    pub mode: String,
    pub background: String,
}

impl Default for CueMetadata {
    fn default() -> Self {
        Self {
            character: "character_1".to_string(),
            head_direction: Direction::Middle,
            eye_direction: Direction::Middle,
            emotion: Emotion::Happy,
            eye_blinking: false,
            body_pose: "01".to_string(),
            mode: "1".to_string(),
            background: "Plain".to_string(),
        }
    }
}

/// One transcribed word. Interval is [start_sec, end_sec).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptWord {
    pub text: String,
    #[serde(rename = "start")]
    pub start_sec: f64,
    #[serde(rename = "end")]
    pub end_sec: f64,
}

/// A spoken or silent span. Silence has empty `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechInterval {
    pub text: String,
    pub start_sec: f64,
    pub end_sec: f64,
    pub metadata: CueMetadata,
}

impl SpeechInterval {
    pub fn is_silence(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhonemeInterval {
    pub interval: SpeechInterval,
    /// Never empty.
    pub phonemes: Vec<String>,
}

/// Phoneme interval bound to an inclusive, 1-based frame range.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInterval {
    pub text: String,
    pub metadata: CueMetadata,
    pub phonemes: Vec<String>,
    pub start_frame: u32,
    pub end_frame: u32,
}

impl FrameInterval {
    pub fn total_frames(&self) -> u32 {
        self.end_frame - self.start_frame + 1
    }
}

/// One output frame before hashing.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCue {
    pub frame: u32,
    pub phoneme: String,
    pub metadata: CueMetadata,
}

/// Final table row. Field order is the column order of the written track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRow {
    pub frame: u32,
    pub character: String,
    pub head_direction: Direction,
    pub eye_direction: Direction,
    pub phoneme: String,
    pub emotion: Emotion,
    pub eye_blinking: bool,
    pub body_pose: String,
    pub mode: String,
    pub background: String,
    pub hash: String,
}

/// An interval whose rounded frame bounds collapsed and had to be clamped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantizationIssue {
    pub interval_index: usize,
    pub raw_start_frame: i64,
    pub raw_end_frame: i64,
    pub clamped_frame: u32,
}

/// Recoverable conditions absorbed while building a track.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackDiagnostics {
    pub synthesized_silences: u32,
    pub skipped_trims: u32,
    pub clamped_intervals: Vec<QuantizationIssue>,
    pub dropped_phonemes: u32,
}

#[derive(Debug, Clone)]
pub struct AudioClip {
    pub sample_rate_hz: u32,
    /// Mono samples in [-1, 1].
    pub samples: Vec<f32>,
}

impl AudioClip {
    pub fn duration_sec(&self) -> f64 {
        if self.sample_rate_hz == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate_hz as f64
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrackInput {
    pub words: Vec<TranscriptWord>,
    pub audio: Option<AudioClip>,
    /// Overrides the audio duration as the end of the timeline.
    pub total_duration_sec: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackOutput {
    pub intervals: Vec<FrameInterval>,
    pub rows: Vec<FrameRow>,
    pub diagnostics: TrackDiagnostics,
}
