use std::path::Path;

use crate::config::TrackConfig;
use crate::error::TrackError;
use crate::pipeline::defaults::{LexiconPhonemizer, RmsSilenceDetector};
use crate::pipeline::runtime::{CueTrack, CueTrackParts};
use crate::pipeline::traits::{Phonemizer, SilenceDetector};
use crate::track::lexicon::Lexicon;

pub struct CueTrackBuilder {
    config: TrackConfig,
    phonemizer: Option<Box<dyn Phonemizer>>,
    silence_detector: Option<Box<dyn SilenceDetector>>,
}

impl CueTrackBuilder {
    pub fn new(config: TrackConfig) -> Self {
        Self {
            config,
            phonemizer: None,
            silence_detector: None,
        }
    }

    pub fn with_phonemizer(mut self, phonemizer: Box<dyn Phonemizer>) -> Self {
        self.phonemizer = Some(phonemizer);
        self
    }

    pub fn with_silence_detector(mut self, silence_detector: Box<dyn SilenceDetector>) -> Self {
        self.silence_detector = Some(silence_detector);
        self
    }

    pub fn build(self) -> Result<CueTrack, TrackError> {
        self.config.validate()?;

        let phonemizer = match self.phonemizer {
            Some(phonemizer) => phonemizer,
            None => Box::new(default_phonemizer(&self.config)?),
        };
        let silence_detector = self
            .silence_detector
            .unwrap_or_else(|| Box::new(RmsSilenceDetector::new(self.config.silence_window_ms)));

        Ok(CueTrack::from_parts(CueTrackParts {
            config: self.config,
            phonemizer,
            silence_detector,
        }))
    }
}

fn default_phonemizer(config: &TrackConfig) -> Result<LexiconPhonemizer, TrackError> {
    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::load(Path::new(path))?,
        None => {
            tracing::warn!("no lexicon configured, words will be spelled letter by letter");
            Lexicon::default()
        }
    };
    Ok(LexiconPhonemizer::new(
        lexicon,
        config.strip_stress,
        config.silence_symbol.clone(),
    ))
}
