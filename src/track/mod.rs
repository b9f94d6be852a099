pub mod audio_boundaries;
pub mod explode;
pub mod hashing;
pub mod lexicon;
pub mod normalize;
pub mod phonemes;
pub mod quantize;
pub mod summary;
pub mod trim;

pub use audio_boundaries::{detect_silence_bounds, SilenceBounds};
pub use explode::{distribute_frames, explode, explode_interval, ExplodedFrames};
pub use hashing::{cue_hash, hash_rows};
pub use lexicon::{lexicon_phonemes, Lexicon};
pub use normalize::{fill_gaps, speech_intervals, NormalizedIntervals};
pub use phonemes::map_phonemes;
pub use quantize::{frame_boundary, quantize, QuantizedIntervals};
pub use summary::{summarize, TrackSummary};
pub use trim::{trim_to_speech, TrimmedWords};
