use crate::pipeline::traits::SilenceDetector;
use crate::types::{AudioClip, TranscriptWord};

#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedWords {
    pub words: Vec<TranscriptWord>,
    /// Words left as transcribed: silent slice, or trimming would empty them.
    pub skipped: u32,
}

/// Tightens every word to the audible part of its audio slice.
pub fn trim_to_speech(
    words: &[TranscriptWord],
    audio: &AudioClip,
    detector: &dyn SilenceDetector,
) -> TrimmedWords {
    let mut skipped = 0u32;
    let trimmed = words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let slice = audio_slice(audio, word.start_sec, word.end_sec);
            let Some(bounds) = detector.detect(slice, audio.sample_rate_hz) else {
                tracing::debug!(
                    index,
                    word = word.text.as_str(),
                    "trim: no speech found, keeping transcript bounds"
                );
                skipped += 1;
                return word.clone();
            };

            let start_sec = word.start_sec + bounds.leading_sec;
            let end_sec = word.end_sec.min(audio.duration_sec()) - bounds.trailing_sec;
            if start_sec >= end_sec {
                tracing::warn!(
                    index,
                    word = word.text.as_str(),
                    leading_sec = bounds.leading_sec,
                    trailing_sec = bounds.trailing_sec,
                    "trim: adjustment would empty the word, keeping transcript bounds"
                );
                skipped += 1;
                return word.clone();
            }

            TranscriptWord {
                text: word.text.clone(),
                start_sec,
                end_sec,
            }
        })
        .collect();

    TrimmedWords {
        words: trimmed,
        skipped,
    }
}

fn audio_slice(audio: &AudioClip, start_sec: f64, end_sec: f64) -> &[f32] {
    let rate = audio.sample_rate_hz as f64;
    let len = audio.samples.len();
    let to_index = |sec: f64| ((sec.max(0.0) * rate).round() as usize).min(len);
    let start = to_index(start_sec);
    let end = to_index(end_sec).max(start);
    &audio.samples[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::audio_boundaries::SilenceBounds;

    struct Fixed(Option<SilenceBounds>);

    impl SilenceDetector for Fixed {
        fn detect(&self, _samples: &[f32], _sample_rate_hz: u32) -> Option<SilenceBounds> {
            self.0
        }
    }

    fn clip() -> AudioClip {
        AudioClip {
            sample_rate_hz: 100,
            samples: vec![0.0; 300],
        }
    }

    fn word(text: &str, start: f64, end: f64) -> TranscriptWord {
        TranscriptWord {
            text: text.to_string(),
            start_sec: start,
            end_sec: end,
        }
    }

    #[test]
    fn bounds_are_applied_to_each_word() {
        let detector = Fixed(Some(SilenceBounds {
            leading_sec: 0.1,
            trailing_sec: 0.2,
        }));
        let out = trim_to_speech(&[word("a", 0.0, 1.0), word("b", 1.0, 2.0)], &clip(), &detector);
        assert_eq!(out.skipped, 0);
        assert!((out.words[0].start_sec - 0.1).abs() < 1e-12);
        assert!((out.words[0].end_sec - 0.8).abs() < 1e-12);
        assert!((out.words[1].start_sec - 1.1).abs() < 1e-12);
        assert_eq!(out.words[1].text, "b");
    }

    #[test]
    fn no_bounds_means_no_adjustment() {
        let input = vec![word("a", 0.5, 1.0)];
        let out = trim_to_speech(&input, &clip(), &Fixed(None));
        assert_eq!(out.words, input);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn over_trimming_keeps_the_original_word() {
        let detector = Fixed(Some(SilenceBounds {
            leading_sec: 0.3,
            trailing_sec: 0.3,
        }));
        let input = vec![word("a", 0.5, 1.0)];
        let out = trim_to_speech(&input, &clip(), &detector);
        assert_eq!(out.words, input);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn trailing_silence_is_measured_from_the_clip_end() {
        let detector = Fixed(Some(SilenceBounds {
            leading_sec: 0.0,
            trailing_sec: 0.5,
        }));
        // Clip ends at 3.0 s, the word claims to run until 4.0 s.
        let out = trim_to_speech(&[word("a", 2.0, 4.0)], &clip(), &detector);
        assert_eq!(out.skipped, 0);
        assert!((out.words[0].start_sec - 2.0).abs() < 1e-12);
        assert!((out.words[0].end_sec - 2.5).abs() < 1e-12);
    }

    #[test]
    fn slice_is_clamped_to_the_clip() {
        let audio = clip();
        assert_eq!(audio_slice(&audio, 2.5, 9.0).len(), 50);
        assert!(audio_slice(&audio, 5.0, 6.0).is_empty());
        assert_eq!(audio_slice(&audio, -1.0, 0.5).len(), 50);
    }
}
