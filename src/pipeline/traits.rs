use crate::track::audio_boundaries::SilenceBounds;

pub trait Phonemizer: Send + Sync {
    /// Ordered phoneme symbols for `text`. Should be non-empty for non-empty text.
    fn phonemize(&self, text: &str) -> Vec<String>;
}

pub trait SilenceDetector: Send + Sync {
    /// `None` when the clip holds no audible region.
    fn detect(&self, samples: &[f32], sample_rate_hz: u32) -> Option<SilenceBounds>;
}
