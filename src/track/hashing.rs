use sha2::{Digest, Sha256};

use crate::types::{CueMetadata, FrameCue, FrameRow};

/// SHA-256 over the fields that change how a frame looks.
///
/// Field order: character, head direction, eye direction, phoneme, emotion,
/// eye blinking (`True`/`False`), body pose, mode, background. Frame number
/// and text are not part of the digest, so identical poses share a hash.
pub fn cue_hash(metadata: &CueMetadata, phoneme: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(metadata.character.as_bytes());
    hasher.update(metadata.head_direction.as_str().as_bytes());
    hasher.update(metadata.eye_direction.as_str().as_bytes());
    hasher.update(phoneme.as_bytes());
    hasher.update(metadata.emotion.as_str().as_bytes());
    hasher.update(if metadata.eye_blinking { "True" } else { "False" });
    hasher.update(metadata.body_pose.as_bytes());
    hasher.update(metadata.mode.as_bytes());
    hasher.update(metadata.background.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn hash_rows(cues: Vec<FrameCue>) -> Vec<FrameRow> {
    cues.into_iter()
        .map(|cue| {
            let hash = cue_hash(&cue.metadata, &cue.phoneme);
            let CueMetadata {
                character,
                head_direction,
                eye_direction,
                emotion,
                eye_blinking,
                body_pose,
                mode,
                background,
            } = cue.metadata;
            FrameRow {
                frame: cue.frame,
                character,
                head_direction,
                eye_direction,
                phoneme: cue.phoneme,
                emotion,
                eye_blinking,
                body_pose,
                mode,
                background,
                hash,
            }
        })
        .collect()
}
