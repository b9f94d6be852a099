use crate::config::TrackConfig;
use crate::error::TrackError;
use crate::pipeline::traits::{Phonemizer, SilenceDetector};
use crate::track::explode::explode;
use crate::track::hashing::hash_rows;
use crate::track::normalize::{fill_gaps, speech_intervals};
use crate::track::phonemes::map_phonemes;
use crate::track::quantize::quantize;
use crate::track::trim::trim_to_speech;
use crate::types::{TrackDiagnostics, TrackInput, TrackOutput};

pub struct CueTrack {
    config: TrackConfig,
    phonemizer: Box<dyn Phonemizer>,
    silence_detector: Box<dyn SilenceDetector>,
}

pub(crate) struct CueTrackParts {
    pub config: TrackConfig,
    pub phonemizer: Box<dyn Phonemizer>,
    pub silence_detector: Box<dyn SilenceDetector>,
}

impl CueTrack {
    pub(crate) fn from_parts(parts: CueTrackParts) -> Self {
        Self {
            config: parts.config,
            phonemizer: parts.phonemizer,
            silence_detector: parts.silence_detector,
        }
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Runs trim, normalize, phonemize, quantize, explode and hash in order.
    pub fn generate(&self, input: &TrackInput) -> Result<TrackOutput, TrackError> {
        let mut diagnostics = TrackDiagnostics::default();

        let words = match &input.audio {
            Some(audio) => {
                let trimmed = trim_to_speech(&input.words, audio, self.silence_detector.as_ref());
                diagnostics.skipped_trims = trimmed.skipped;
                trimmed.words
            }
            None => input.words.clone(),
        };

        let total_duration_sec = input
            .total_duration_sec
            .or_else(|| input.audio.as_ref().map(|a| a.duration_sec()));
        if let Some(duration) = total_duration_sec {
            if !duration.is_finite() || duration < 0.0 {
                return Err(TrackError::invalid_input(format!(
                    "total duration must be finite and >= 0, got {duration}"
                )));
            }
        }

        let defaults = &self.config.defaults;
        let normalized = fill_gaps(
            &speech_intervals(&words, defaults),
            defaults,
            self.config.epsilon_sec,
            total_duration_sec,
        )?;
        diagnostics.synthesized_silences = normalized.synthesized_silences;

        let phoneme_intervals = map_phonemes(
            normalized.intervals,
            self.phonemizer.as_ref(),
            &self.config.silence_symbol,
        )?;

        let quantized = quantize(
            phoneme_intervals,
            self.config.frame_rate,
            defaults,
            &self.config.silence_symbol,
        )?;
        diagnostics.clamped_intervals = quantized.issues;

        let exploded = explode(&quantized.intervals)?;
        diagnostics.dropped_phonemes = exploded.dropped_phonemes;
        let rows = hash_rows(exploded.cues);

        tracing::info!(
            words = input.words.len(),
            intervals = quantized.intervals.len(),
            frames = rows.len(),
            synthesized_silences = diagnostics.synthesized_silences,
            skipped_trims = diagnostics.skipped_trims,
            clamped_intervals = diagnostics.clamped_intervals.len(),
            dropped_phonemes = diagnostics.dropped_phonemes,
            "cue track generated"
        );

        Ok(TrackOutput {
            intervals: quantized.intervals,
            rows,
            diagnostics,
        })
    }
}
