use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use cue_track::FrameRow;

const HEADER: [&str; 11] = [
    "frame",
    "character",
    "head_direction",
    "eye_direction",
    "phoneme",
    "emotion",
    "eye_blinking",
    "body_pose",
    "mode",
    "background",
    "hash",
];

pub fn write_track(path: &Path, rows: &[FrameRow]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create track output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let file = File::create(path)
        .map_err(|err| format!("Failed to create track file '{}': {err}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let write_err = |err: std::io::Error| format!("Failed to write track '{}': {err}", path.display());

    writeln!(writer, "{}", HEADER.join(",")).map_err(write_err)?;
    for row in rows {
        let frame = row.frame.to_string();
        let eye_blinking = row.eye_blinking.to_string();
        let fields = [
            frame.as_str(),
            row.character.as_str(),
            row.head_direction.as_str(),
            row.eye_direction.as_str(),
            row.phoneme.as_str(),
            row.emotion.as_str(),
            eye_blinking.as_str(),
            row.body_pose.as_str(),
            row.mode.as_str(),
            row.background.as_str(),
            row.hash.as_str(),
        ];
        let line = fields.map(escape_field).join(",");
        writeln!(writer, "{line}").map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
