use crate::error::TrackError;
use crate::types::{CueMetadata, SpeechInterval, TranscriptWord};

/// Gap-free interval sequence plus the number of silences that were synthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIntervals {
    pub intervals: Vec<SpeechInterval>,
    pub synthesized_silences: u32,
}

pub fn speech_intervals(words: &[TranscriptWord], metadata: &CueMetadata) -> Vec<SpeechInterval> {
    words
        .iter()
        .map(|w| SpeechInterval {
            text: w.text.clone(),
            start_sec: w.start_sec,
            end_sec: w.end_sec,
            metadata: metadata.clone(),
        })
        .collect()
}

/// Fills every gap wider than `epsilon_sec` with a silence interval.
///
/// Silence spans are padded by `epsilon_sec` on the sides that touch speech,
/// unless the gap is too narrow for both pads, in which case the whole gap is
/// used. With `total_duration_sec` the result also covers the lead-in from 0
/// and the tail up to the end of the timeline.
pub fn fill_gaps(
    intervals: &[SpeechInterval],
    defaults: &CueMetadata,
    epsilon_sec: f64,
    total_duration_sec: Option<f64>,
) -> Result<NormalizedIntervals, TrackError> {
    validate_intervals(intervals)?;

    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        let intervals = match total_duration_sec {
            Some(duration) if duration > epsilon_sec => vec![silence(0.0, duration, defaults)],
            _ => Vec::new(),
        };
        let synthesized_silences = intervals.len() as u32;
        return Ok(NormalizedIntervals {
            intervals,
            synthesized_silences,
        });
    };

    let mut silences = Vec::new();
    if total_duration_sec.is_some() && first.start_sec > epsilon_sec {
        silences.push(silence(0.0, first.start_sec - epsilon_sec, defaults));
    }

    for pair in intervals.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let gap = next.start_sec - current.end_sec;
        if gap <= epsilon_sec {
            continue;
        }
        let (start_sec, end_sec) = if gap > 2.0 * epsilon_sec {
            (current.end_sec + epsilon_sec, next.start_sec - epsilon_sec)
        } else {
            (current.end_sec, next.start_sec)
        };
        silences.push(silence(start_sec, end_sec, defaults));
    }

    if let Some(duration) = total_duration_sec {
        let tail = duration - last.end_sec;
        if tail > 2.0 * epsilon_sec {
            silences.push(silence(last.end_sec + epsilon_sec, duration, defaults));
        } else if tail > epsilon_sec {
            silences.push(silence(last.end_sec, duration, defaults));
        } else if tail < 0.0 {
            tracing::debug!(
                duration_sec = duration,
                last_end_sec = last.end_sec,
                "normalize: last interval ends after the timeline, no trailing silence"
            );
        }
    }

    let synthesized_silences = silences.len() as u32;
    let mut normalized = Vec::with_capacity(intervals.len() + silences.len());
    normalized.extend(intervals.iter().cloned());
    normalized.extend(silences);
    normalized.sort_by(|a, b| a.start_sec.total_cmp(&b.start_sec));

    tracing::debug!(
        input = intervals.len(),
        synthesized_silences,
        output = normalized.len(),
        "normalize: gaps filled"
    );

    Ok(NormalizedIntervals {
        intervals: normalized,
        synthesized_silences,
    })
}

fn silence(start_sec: f64, end_sec: f64, defaults: &CueMetadata) -> SpeechInterval {
    SpeechInterval {
        text: String::new(),
        start_sec,
        end_sec,
        metadata: defaults.clone(),
    }
}

fn validate_intervals(intervals: &[SpeechInterval]) -> Result<(), TrackError> {
    let mut previous_start: Option<f64> = None;
    for (index, interval) in intervals.iter().enumerate() {
        let valid = interval.start_sec.is_finite()
            && interval.end_sec.is_finite()
            && interval.start_sec >= 0.0
            && interval.start_sec < interval.end_sec;
        if !valid {
            return Err(TrackError::InvalidInterval {
                index,
                start_sec: interval.start_sec,
                end_sec: interval.end_sec,
            });
        }
        if let Some(previous_start_sec) = previous_start {
            if interval.start_sec < previous_start_sec {
                return Err(TrackError::InputOrdering {
                    index,
                    start_sec: interval.start_sec,
                    previous_start_sec,
                });
            }
        }
        previous_start = Some(interval.start_sec);
    }
    Ok(())
}
