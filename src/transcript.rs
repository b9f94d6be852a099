use std::path::Path;

use serde::Deserialize;

use crate::error::TrackError;
use crate::types::TranscriptWord;

/// Accepted transcript layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Words(Vec<TranscriptWord>),
    Segments { segments: Vec<Segment> },
    Chunked { chunks: Vec<TimestampedChunk> },
}

/// whisper_timestamped segment; only its word timings are used.
#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    words: Vec<TranscriptWord>,
}

/// Speech-recognizer chunk: `{"text": "...", "timestamp": [start, end]}`.
/// The last chunk of a stream may carry a `null` end.
#[derive(Debug, Deserialize)]
struct TimestampedChunk {
    text: String,
    timestamp: (f64, Option<f64>),
}

pub fn parse_transcript(data: &str) -> Result<Vec<TranscriptWord>, TrackError> {
    let file: TranscriptFile =
        serde_json::from_str(data).map_err(|e| TrackError::json("parse transcript", e))?;
    let words = match file {
        TranscriptFile::Words(words) => words,
        TranscriptFile::Segments { segments } => segments
            .into_iter()
            .flat_map(|segment| segment.words)
            .collect(),
        TranscriptFile::Chunked { chunks } => chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                let (start_sec, end_sec) = chunk.timestamp;
                let end_sec = end_sec.ok_or_else(|| {
                    TrackError::invalid_input(format!("transcript chunk {index} has no end time"))
                })?;
                Ok(TranscriptWord {
                    text: chunk.text,
                    start_sec,
                    end_sec,
                })
            })
            .collect::<Result<Vec<_>, TrackError>>()?,
    };

    Ok(words
        .into_iter()
        .map(|w| TranscriptWord {
            text: w.text.trim().to_string(),
            ..w
        })
        .collect())
}

pub fn load_transcript(path: &Path) -> Result<Vec<TranscriptWord>, TrackError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| TrackError::io("read transcript", e))?;
    parse_transcript(&data)
}
