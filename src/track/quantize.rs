use crate::error::TrackError;
use crate::types::{CueMetadata, FrameInterval, PhonemeInterval, QuantizationIssue};

#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedIntervals {
    pub intervals: Vec<FrameInterval>,
    pub issues: Vec<QuantizationIssue>,
}

/// 0-based frame boundary of a time in seconds. `f64::round` rounds half away
/// from zero, so the same instant always lands on the same boundary.
pub fn frame_boundary(sec: f64, frame_rate: u32) -> i64 {
    (sec * frame_rate as f64).round() as i64
}

/// Converts `[start_sec, end_sec)` intervals into inclusive 1-based frame ranges.
///
/// The first interval keeps its rounded start; a silence interval is inserted
/// ahead of it when that start is past frame 1. Every later interval starts on
/// the frame after its predecessor ends, so rounding can neither open gaps nor
/// create overlaps. Ranges that collapse are clamped to one frame and reported.
/// Fails when a frame index does not fit in `u32`.
pub fn quantize(
    intervals: Vec<PhonemeInterval>,
    frame_rate: u32,
    defaults: &CueMetadata,
    silence_symbol: &str,
) -> Result<QuantizedIntervals, TrackError> {
    let mut out = Vec::with_capacity(intervals.len() + 1);
    let mut issues = Vec::new();
    let mut previous_end: Option<u32> = None;

    for (interval_index, phoneme_interval) in intervals.into_iter().enumerate() {
        let raw_start = frame_boundary(phoneme_interval.interval.start_sec, frame_rate);
        let raw_end = frame_boundary(phoneme_interval.interval.end_sec, frame_rate) - 1;

        let start_frame = match previous_end {
            Some(end) => to_one_based(i64::from(end))?,
            None => {
                let first = to_one_based(raw_start.max(0))?;
                if first > 1 {
                    out.push(FrameInterval {
                        text: String::new(),
                        metadata: defaults.clone(),
                        phonemes: vec![silence_symbol.to_string()],
                        start_frame: 1,
                        end_frame: first - 1,
                    });
                    tracing::debug!(end_frame = first - 1, "quantize: inserted leading silence");
                }
                first
            }
        };

        let mut end_frame = to_one_based(raw_end.max(0))?;
        if raw_end < 0 || end_frame < start_frame {
            tracing::warn!(
                interval_index,
                raw_start,
                raw_end,
                start_frame,
                "quantize: degenerate interval clamped to one frame"
            );
            issues.push(QuantizationIssue {
                interval_index,
                raw_start_frame: raw_start,
                raw_end_frame: raw_end,
                clamped_frame: start_frame,
            });
            end_frame = start_frame;
        }

        out.push(FrameInterval {
            text: phoneme_interval.interval.text,
            metadata: phoneme_interval.interval.metadata,
            phonemes: phoneme_interval.phonemes,
            start_frame,
            end_frame,
        });
        previous_end = Some(end_frame);
    }

    Ok(QuantizedIntervals {
        intervals: out,
        issues,
    })
}

/// 1-based frame for a non-negative 0-based one. `u32::MAX` itself is
/// rejected so the frame after it stays representable.
fn to_one_based(frame: i64) -> Result<u32, TrackError> {
    frame
        .checked_add(1)
        .and_then(|one_based| u32::try_from(one_based).ok())
        .filter(|&one_based| one_based < u32::MAX)
        .ok_or_else(|| {
            TrackError::invalid_input(format!("frame index {frame} exceeds the u32 frame range"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpeechInterval;

    fn interval(text: &str, start: f64, end: f64, phonemes: &[&str]) -> PhonemeInterval {
        PhonemeInterval {
            interval: SpeechInterval {
                text: text.to_string(),
                start_sec: start,
                end_sec: end,
                metadata: CueMetadata::default(),
            },
            phonemes: phonemes.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn bounds(q: &QuantizedIntervals) -> Vec<(u32, u32)> {
        q.intervals
            .iter()
            .map(|i| (i.start_frame, i.end_frame))
            .collect()
    }

    #[test]
    fn boundary_rounds_half_away_from_zero() {
        assert_eq!(frame_boundary(0.5 / 24.0, 24), 1);
        assert_eq!(frame_boundary(1.5 / 24.0, 24), 2);
        assert_eq!(frame_boundary(2.5 / 24.0, 24), 3);
        assert_eq!(frame_boundary(1.0, 24), 24);
        assert_eq!(frame_boundary(0.0, 30), 0);
    }

    #[test]
    fn covered_timeline_maps_to_one_based_frames() {
        let input = vec![
            interval("", 0.0, 0.999, &["M"]),
            interval("hi", 1.0, 1.5, &["HH", "AY1"]),
            interval("", 1.501, 2.0, &["M"]),
        ];
        let q = quantize(input, 24, &CueMetadata::default(), "M").unwrap();
        assert_eq!(bounds(&q), vec![(1, 24), (25, 36), (37, 48)]);
        assert!(q.issues.is_empty());
    }

    #[test]
    fn late_first_interval_gets_leading_silence() {
        let input = vec![interval("hi", 1.0, 1.5, &["HH", "AY1"])];
        let q = quantize(input, 24, &CueMetadata::default(), "M").unwrap();
        assert_eq!(bounds(&q), vec![(1, 24), (25, 36)]);
        assert_eq!(q.intervals[0].phonemes, vec!["M"]);
        assert!(q.intervals[0].text.is_empty());
    }

    #[test]
    fn first_interval_at_zero_gets_no_leading_silence() {
        let input = vec![interval("a", 0.01, 0.5, &["AH0"])];
        let q = quantize(input, 24, &CueMetadata::default(), "M").unwrap();
        assert_eq!(bounds(&q), vec![(1, 12)]);
    }

    #[test]
    fn rounding_gaps_and_overlaps_are_absorbed() {
        // 0.52 * 24 = 12.48 -> 12, 0.53 * 24 = 12.72 -> 13: one-frame gap before "b".
        let input = vec![
            interval("a", 0.0, 0.52, &["A"]),
            interval("b", 0.53, 1.0, &["B"]),
            interval("c", 0.99, 1.5, &["C"]),
        ];
        let q = quantize(input, 24, &CueMetadata::default(), "M").unwrap();
        assert_eq!(bounds(&q), vec![(1, 12), (13, 24), (25, 36)]);
        assert!(q.issues.is_empty());
    }

    #[test]
    fn sub_frame_interval_is_clamped_and_reported() {
        let input = vec![
            interval("a", 0.0, 0.5, &["A"]),
            interval("blip", 0.5, 0.51, &["B"]),
            interval("c", 0.51, 1.0, &["C"]),
        ];
        let q = quantize(input, 24, &CueMetadata::default(), "M").unwrap();
        assert_eq!(bounds(&q), vec![(1, 12), (13, 13), (14, 24)]);
        assert_eq!(q.issues.len(), 1);
        assert_eq!(q.issues[0].interval_index, 1);
        assert_eq!(q.issues[0].clamped_frame, 13);
    }

    #[test]
    fn frames_beyond_u32_are_rejected() {
        let far = u32::MAX as f64;
        let input = vec![
            interval("a", 0.0, 1.0, &["A"]),
            interval("b", 1.0, far, &["B"]),
        ];
        let err = quantize(input, 24, &CueMetadata::default(), "M").unwrap_err();
        assert!(matches!(err, TrackError::InvalidInput { .. }));

        let late_start = vec![interval("a", far, far + 1.0, &["A"])];
        let err = quantize(late_start, 24, &CueMetadata::default(), "M").unwrap_err();
        assert!(matches!(err, TrackError::InvalidInput { .. }));
    }

    #[test]
    fn last_representable_frame_is_accepted() {
        // 0-based end u32::MAX - 2 -> 1-based u32::MAX - 1.
        let end_sec = (u32::MAX - 1) as f64 / 24.0;
        let input = vec![interval("a", 0.0, end_sec, &["A"])];
        let q = quantize(input, 24, &CueMetadata::default(), "M").unwrap();
        assert_eq!(q.intervals[0].end_frame, u32::MAX - 1);
    }

    #[test]
    fn ranges_are_contiguous_from_one() {
        let input = vec![
            interval("a", 0.3, 0.61, &["A"]),
            interval("b", 0.7, 0.74, &["B"]),
            interval("c", 0.8, 2.33, &["C"]),
        ];
        let q = quantize(input, 25, &CueMetadata::default(), "M").unwrap();
        assert_eq!(q.intervals[0].start_frame, 1);
        for pair in q.intervals.windows(2) {
            assert_eq!(pair[1].start_frame, pair[0].end_frame + 1);
        }
        for i in &q.intervals {
            assert!(i.end_frame >= i.start_frame);
        }
    }
}
