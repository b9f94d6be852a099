use crate::config::TrackConfig;
use crate::pipeline::traits::{Phonemizer, SilenceDetector};
use crate::track::audio_boundaries::{detect_silence_bounds, SilenceBounds};
use crate::track::lexicon::{lexicon_phonemes, Lexicon};

pub struct LexiconPhonemizer {
    lexicon: Lexicon,
    strip_stress: bool,
    silence_symbol: String,
}

impl LexiconPhonemizer {
    pub fn new(lexicon: Lexicon, strip_stress: bool, silence_symbol: impl Into<String>) -> Self {
        Self {
            lexicon,
            strip_stress,
            silence_symbol: silence_symbol.into(),
        }
    }

    /// Spells every word letter by letter.
    pub fn spelling(silence_symbol: impl Into<String>) -> Self {
        Self::new(Lexicon::default(), false, silence_symbol)
    }
}

impl Phonemizer for LexiconPhonemizer {
    fn phonemize(&self, text: &str) -> Vec<String> {
        lexicon_phonemes(&self.lexicon, text, self.strip_stress, &self.silence_symbol)
    }
}

pub struct RmsSilenceDetector {
    window_ms: f64,
}

impl RmsSilenceDetector {
    pub fn new(window_ms: f64) -> Self {
        Self { window_ms }
    }
}

impl Default for RmsSilenceDetector {
    fn default() -> Self {
        Self::new(TrackConfig::DEFAULT_SILENCE_WINDOW_MS)
    }
}

impl SilenceDetector for RmsSilenceDetector {
    fn detect(&self, samples: &[f32], sample_rate_hz: u32) -> Option<SilenceBounds> {
        detect_silence_bounds(samples, sample_rate_hz, self.window_ms)
    }
}
