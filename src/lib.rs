pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod track;
pub mod transcript;
pub mod types;

pub use audio::load_audio;
pub use config::TrackConfig;
pub use error::TrackError;
pub use pipeline::builder::CueTrackBuilder;
pub use pipeline::defaults::{LexiconPhonemizer, RmsSilenceDetector};
pub use pipeline::runtime::CueTrack;
pub use pipeline::traits::{Phonemizer, SilenceDetector};
pub use track::{summarize, SilenceBounds, TrackSummary};
pub use transcript::{load_transcript, parse_transcript};
pub use types::{
    AudioClip, CueMetadata, Direction, Emotion, FrameInterval, FrameRow, TrackDiagnostics,
    TrackInput, TrackOutput, TranscriptWord,
};
