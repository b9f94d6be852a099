use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use cue_track::{FrameRow, TrackSummary};
use serde::Serialize;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub transcript_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
    pub frame_rate: u32,
}

#[derive(Debug, Serialize)]
pub struct TrackDocument<'a> {
    pub schema_version: u32,
    pub meta: Meta,
    pub summary: TrackSummary,
    pub rows: &'a [FrameRow],
}

pub fn write_track(path: &Path, document: &TrackDocument<'_>) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create track output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create track file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, document).map_err(|err| {
        format!("Failed to serialize track JSON '{}': {err}", path.display())
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize track file '{}': {err}", path.display()))?;
    Ok(())
}
