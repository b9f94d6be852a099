use crate::error::TrackError;
use crate::pipeline::traits::Phonemizer;
use crate::types::{PhonemeInterval, SpeechInterval};

/// Attaches a phoneme sequence to every interval, keeping the order.
///
/// Silence gets `[silence_symbol]`. Blank symbols from the phonemizer are
/// word separators and are dropped.
pub fn map_phonemes(
    intervals: Vec<SpeechInterval>,
    phonemizer: &dyn Phonemizer,
    silence_symbol: &str,
) -> Result<Vec<PhonemeInterval>, TrackError> {
    intervals
        .into_iter()
        .enumerate()
        .map(|(index, interval)| {
            if interval.is_silence() {
                return Ok(PhonemeInterval {
                    interval,
                    phonemes: vec![silence_symbol.to_string()],
                });
            }

            let phonemes: Vec<String> = phonemizer
                .phonemize(interval.text.trim())
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            if phonemes.is_empty() {
                return Err(TrackError::EmptyPhonemeSequence {
                    index,
                    text: interval.text,
                });
            }
            Ok(PhonemeInterval { interval, phonemes })
        })
        .collect()
}
