use std::fs;
use std::path::{Path, PathBuf};

use cue_track::track::cue_hash;
use cue_track::track::lexicon::Lexicon;
use cue_track::{
    CueTrackBuilder, LexiconPhonemizer, Phonemizer, TrackConfig, TrackInput, TrackOutput,
    TranscriptWord,
};
use libtest_mimic::{Arguments, Failed, Trial};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

const SUITE_NAME: &str = "cue_track_fixtures";
const SWEEP_SEED: u64 = 42;
const SWEEP_CASES: usize = 300;

#[derive(Debug, Deserialize)]
struct Fixture {
    id: String,
    frame_rate: u32,
    total_duration_sec: Option<f64>,
    lexicon: String,
    words: Vec<TranscriptWord>,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Expected {
    intervals: Vec<(u32, u32)>,
    /// Consecutive rows sharing a phoneme, as `(phoneme, frame_count)`.
    runs: Vec<(String, u32)>,
    dropped_phonemes: u32,
    clamped_intervals: usize,
}

fn main() {
    let args = Arguments::from_args();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let fixtures = match load_fixtures(&repo_root.join("test-data").join("tracks")) {
        Ok(fixtures) => fixtures,
        Err(err) => {
            let test = Trial::test(format!("{SUITE_NAME}::setup"), move || Err(Failed::from(err)));
            libtest_mimic::run(&args, vec![test]).exit();
        }
    };

    let mut tests: Vec<Trial> = fixtures
        .into_iter()
        .map(|fixture| {
            let name = format!("{SUITE_NAME}::case::{}", fixture.id);
            Trial::test(name, move || run_fixture(&fixture).map_err(Failed::from))
        })
        .collect();
    tests.push(Trial::test(format!("{SUITE_NAME}::random_sweep"), || {
        run_random_sweep().map_err(Failed::from)
    }));

    libtest_mimic::run(&args, tests).exit();
}

fn load_fixtures(dir: &Path) -> Result<Vec<Fixture>, String> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|err| format!("Failed to list fixtures in '{}': {err}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    if paths.is_empty() {
        return Err(format!("No fixtures found under '{}'.", dir.display()));
    }

    paths
        .iter()
        .map(|path| {
            let data = fs::read_to_string(path)
                .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
            serde_json::from_str(&data)
                .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
        })
        .collect()
}

fn run_fixture(fixture: &Fixture) -> Result<(), String> {
    let config = TrackConfig {
        frame_rate: fixture.frame_rate,
        ..TrackConfig::default()
    };
    let phonemizer = LexiconPhonemizer::new(Lexicon::parse(&fixture.lexicon), false, "M");
    let track = CueTrackBuilder::new(config)
        .with_phonemizer(Box::new(phonemizer))
        .build()
        .map_err(|err| format!("{}: build failed: {err}", fixture.id))?;

    let output = track
        .generate(&TrackInput {
            words: fixture.words.clone(),
            audio: None,
            total_duration_sec: fixture.total_duration_sec,
        })
        .map_err(|err| format!("{}: generate failed: {err}", fixture.id))?;

    check_track_invariants(&output).map_err(|err| format!("{}: {err}", fixture.id))?;

    let intervals: Vec<(u32, u32)> = output
        .intervals
        .iter()
        .map(|i| (i.start_frame, i.end_frame))
        .collect();
    if intervals != fixture.expected.intervals {
        return Err(format!(
            "{}: intervals {intervals:?} != expected {:?}",
            fixture.id, fixture.expected.intervals
        ));
    }

    let runs = phoneme_runs(&output);
    if runs != fixture.expected.runs {
        return Err(format!(
            "{}: phoneme runs {runs:?} != expected {:?}",
            fixture.id, fixture.expected.runs
        ));
    }

    if output.diagnostics.dropped_phonemes != fixture.expected.dropped_phonemes {
        return Err(format!(
            "{}: dropped {} phonemes, expected {}",
            fixture.id, output.diagnostics.dropped_phonemes, fixture.expected.dropped_phonemes
        ));
    }
    if output.diagnostics.clamped_intervals.len() != fixture.expected.clamped_intervals {
        return Err(format!(
            "{}: clamped {} intervals, expected {}",
            fixture.id,
            output.diagnostics.clamped_intervals.len(),
            fixture.expected.clamped_intervals
        ));
    }
    Ok(())
}

struct Letters;

impl Phonemizer for Letters {
    fn phonemize(&self, text: &str) -> Vec<String> {
        text.chars().map(|c| c.to_string()).collect()
    }
}

fn run_random_sweep() -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED);
    let alphabet = "abcdefghijklmnop";

    for case in 0..SWEEP_CASES {
        let frame_rate = [24u32, 25, 30, 60][rng.gen_range(0..4)];
        let track = CueTrackBuilder::new(TrackConfig {
            frame_rate,
            ..TrackConfig::default()
        })
        .with_phonemizer(Box::new(Letters))
        .build()
        .map_err(|err| format!("case {case}: build failed: {err}"))?;

        let mut words = Vec::new();
        let mut t = 0.0f64;
        for _ in 0..rng.gen_range(0..10) {
            t += rng.gen_range(0.0..0.4);
            let len = rng.gen_range(0.005..0.7);
            let letters = rng.gen_range(1..alphabet.len());
            words.push(TranscriptWord {
                text: alphabet[..letters].to_string(),
                start_sec: t,
                end_sec: t + len,
            });
            t += len;
        }
        let total_duration_sec = rng.gen_bool(0.5).then(|| t + rng.gen_range(0.0..1.0));

        let output = track
            .generate(&TrackInput {
                words,
                audio: None,
                total_duration_sec,
            })
            .map_err(|err| format!("case {case}: generate failed: {err}"))?;
        check_track_invariants(&output).map_err(|err| format!("case {case}: {err}"))?;
    }
    Ok(())
}

fn check_track_invariants(output: &TrackOutput) -> Result<(), String> {
    for (expected, row) in (1u32..).zip(&output.rows) {
        if row.frame != expected {
            return Err(format!("frame {} found where {expected} was expected", row.frame));
        }
        let meta = cue_track::CueMetadata {
            character: row.character.clone(),
            head_direction: row.head_direction,
            eye_direction: row.eye_direction,
            emotion: row.emotion,
            eye_blinking: row.eye_blinking,
            body_pose: row.body_pose.clone(),
            mode: row.mode.clone(),
            background: row.background.clone(),
        };
        if row.hash != cue_hash(&meta, &row.phoneme) {
            return Err(format!("frame {} hash does not match its fields", row.frame));
        }
    }

    let mut next_start = 1u32;
    let mut total = 0usize;
    for interval in &output.intervals {
        if interval.start_frame != next_start || interval.end_frame < interval.start_frame {
            return Err(format!(
                "interval [{}, {}] breaks contiguity (expected start {next_start})",
                interval.start_frame, interval.end_frame
            ));
        }
        next_start = interval.end_frame + 1;
        total += interval.total_frames() as usize;
    }
    if total != output.rows.len() {
        return Err(format!(
            "intervals cover {total} frames but {} rows were emitted",
            output.rows.len()
        ));
    }
    Ok(())
}

fn phoneme_runs(output: &TrackOutput) -> Vec<(String, u32)> {
    let mut runs: Vec<(String, u32)> = Vec::new();
    for row in &output.rows {
        match runs.last_mut() {
            Some((phoneme, count)) if *phoneme == row.phoneme => *count += 1,
            _ => runs.push((row.phoneme.clone(), 1)),
        }
    }
    runs
}
