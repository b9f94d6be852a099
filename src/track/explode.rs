use crate::error::TrackError;
use crate::types::{FrameCue, FrameInterval};

#[derive(Debug, Clone, PartialEq)]
pub struct ExplodedFrames {
    pub cues: Vec<FrameCue>,
    /// Phonemes that received zero frames because the interval was too short.
    pub dropped_phonemes: u32,
}

/// Splits `total_frames` across `phoneme_count` phonemes.
///
/// Every phoneme gets `total_frames / phoneme_count`; the whole remainder goes
/// to the phoneme at `phoneme_count / 2`. With more phonemes than frames the
/// others get zero.
pub fn distribute_frames(total_frames: u32, phoneme_count: usize) -> Vec<u32> {
    if phoneme_count == 0 {
        return Vec::new();
    }
    let count = phoneme_count as u32;
    let base = total_frames / count;
    let remainder = total_frames % count;

    let mut frames_list = vec![base; phoneme_count];
    if remainder > 0 {
        frames_list[phoneme_count / 2] += remainder;
    }
    frames_list
}

/// One cue per frame of `interval`, in frame order.
pub fn explode_interval(interval: &FrameInterval) -> Vec<FrameCue> {
    let frames_list = distribute_frames(interval.total_frames(), interval.phonemes.len());

    let mut cues = Vec::with_capacity(interval.total_frames() as usize);
    let mut frame = interval.start_frame;
    for (phoneme, &frames) in interval.phonemes.iter().zip(&frames_list) {
        for _ in 0..frames {
            cues.push(FrameCue {
                frame,
                phoneme: phoneme.clone(),
                metadata: interval.metadata.clone(),
            });
            frame += 1;
        }
    }
    debug_assert_eq!(frame, interval.end_frame + 1, "frame allocation must cover the interval");
    cues
}

pub fn explode(intervals: &[FrameInterval]) -> Result<ExplodedFrames, TrackError> {
    let total: usize = intervals.iter().map(|i| i.total_frames() as usize).sum();
    let mut cues = Vec::with_capacity(total);
    let mut dropped_phonemes = 0u32;

    for (index, interval) in intervals.iter().enumerate() {
        if interval.phonemes.is_empty() {
            return Err(TrackError::EmptyPhonemeSequence {
                index,
                text: interval.text.clone(),
            });
        }

        let total_frames = interval.total_frames();
        let phoneme_count = interval.phonemes.len();
        let dropped = distribute_frames(total_frames, phoneme_count)
            .iter()
            .filter(|&&frames| frames == 0)
            .count() as u32;
        if dropped > 0 {
            tracing::debug!(
                text = interval.text.as_str(),
                start_frame = interval.start_frame,
                total_frames,
                phoneme_count,
                dropped,
                "explode: interval shorter than its phoneme sequence"
            );
            dropped_phonemes += dropped;
        }
        cues.extend(explode_interval(interval));
    }

    if dropped_phonemes > 0 {
        tracing::warn!(dropped_phonemes, "explode: phonemes dropped from short intervals");
    }

    Ok(ExplodedFrames {
        cues,
        dropped_phonemes,
    })
}
