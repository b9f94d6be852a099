use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::types::{TrackDiagnostics, TrackOutput};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub frame_count: u32,
    pub interval_count: u32,
    pub speech_interval_count: u32,
    pub silence_interval_count: u32,
    pub distinct_hash_count: u32,
    pub phoneme_frames: BTreeMap<String, u32>,
    pub diagnostics: TrackDiagnostics,
}

pub fn summarize(output: &TrackOutput) -> TrackSummary {
    let speech_interval_count = output
        .intervals
        .iter()
        .filter(|i| !i.text.trim().is_empty())
        .count() as u32;
    let interval_count = output.intervals.len() as u32;

    let mut phoneme_frames: BTreeMap<String, u32> = BTreeMap::new();
    for row in &output.rows {
        *phoneme_frames.entry(row.phoneme.clone()).or_default() += 1;
    }
    let distinct_hash_count = output
        .rows
        .iter()
        .map(|r| r.hash.as_str())
        .collect::<HashSet<_>>()
        .len() as u32;

    TrackSummary {
        frame_count: output.rows.len() as u32,
        interval_count,
        speech_interval_count,
        silence_interval_count: interval_count - speech_interval_count,
        distinct_hash_count,
        phoneme_frames,
        diagnostics: output.diagnostics.clone(),
    }
}
