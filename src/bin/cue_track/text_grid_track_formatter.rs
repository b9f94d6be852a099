use std::fs;
use std::path::Path;

use cue_track::{FrameRow, TrackOutput};
use textgrid::{Interval, TextGrid, Tier, TierType};

pub fn write_textgrid(path: &Path, output: &TrackOutput, frame_rate: u32) -> Result<(), String> {
    let last_frame = output.rows.last().map(|row| row.frame).unwrap_or(0);
    let xmax = frame_to_seconds(last_frame.max(1), frame_rate);

    let mut textgrid = TextGrid::new(0.0, xmax).map_err(|err| {
        format!(
            "Failed to build TextGrid structure '{}': {err}",
            path.display()
        )
    })?;

    let word_intervals = output
        .intervals
        .iter()
        .map(|interval| Interval {
            xmin: frame_to_seconds(interval.start_frame - 1, frame_rate),
            xmax: frame_to_seconds(interval.end_frame, frame_rate),
            text: interval.text.clone(),
        })
        .collect();
    let words_tier = Tier {
        name: "words".to_string(),
        tier_type: TierType::IntervalTier,
        xmin: 0.0,
        xmax,
        intervals: word_intervals,
        points: Vec::new(),
    };
    let phonemes_tier = Tier {
        name: "phonemes".to_string(),
        tier_type: TierType::IntervalTier,
        xmin: 0.0,
        xmax,
        intervals: phoneme_runs(&output.rows, frame_rate),
        points: Vec::new(),
    };

    textgrid
        .add_tier(words_tier)
        .map_err(|err| format!("Failed to add words tier for '{}': {err}", path.display()))?;
    textgrid.add_tier(phonemes_tier).map_err(|err| {
        format!(
            "Failed to add phonemes tier for '{}': {err}",
            path.display()
        )
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create TextGrid output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    textgrid
        .to_file(path, false)
        .map_err(|err| format!("Failed to write TextGrid '{}': {err}", path.display()))?;
    Ok(())
}

/// Merges consecutive rows with the same phoneme into one interval.
fn phoneme_runs(rows: &[FrameRow], frame_rate: u32) -> Vec<Interval> {
    let mut runs: Vec<(u32, u32, &str)> = Vec::new();
    for row in rows {
        match runs.last_mut() {
            Some((_, end, phoneme)) if *phoneme == row.phoneme && *end + 1 == row.frame => {
                *end = row.frame;
            }
            _ => runs.push((row.frame, row.frame, row.phoneme.as_str())),
        }
    }
    runs.into_iter()
        .map(|(start, end, phoneme)| Interval {
            xmin: frame_to_seconds(start - 1, frame_rate),
            xmax: frame_to_seconds(end, frame_rate),
            text: phoneme.to_string(),
        })
        .collect()
}

fn frame_to_seconds(frame: u32, frame_rate: u32) -> f64 {
    frame as f64 / frame_rate as f64
}
