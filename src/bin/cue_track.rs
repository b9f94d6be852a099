use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use cue_track::{
    load_audio, load_transcript, summarize, CueTrackBuilder, TrackConfig, TrackInput,
};
use tracing_subscriber::EnvFilter;

#[path = "cue_track/csv_track_formatter.rs"]
mod csv_track_formatter;
#[path = "cue_track/json_track_formatter.rs"]
mod json_track_formatter;
#[path = "cue_track/text_grid_track_formatter.rs"]
mod text_grid_track_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    /// Word and phoneme tiers for inspection in Praat.
    #[value(name = "textgrid")]
    TextGrid,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::TextGrid => "TextGrid",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "cue_track")]
#[command(about = "Build a per-frame lip-sync cue track from a timed transcript")]
struct Args {
    /// Word timings: `[{"text", "start", "end"}]`, whisper_timestamped
    /// `{"segments": [{"words": [...]}]}` or `{"chunks": [{"text", "timestamp"}]}`.
    #[arg(long, env = "CUE_TRACK_TRANSCRIPT")]
    transcript: PathBuf,
    /// WAV or FLAC source. Enables silence trimming and sets the timeline length.
    #[arg(long, env = "CUE_TRACK_AUDIO")]
    audio: Option<PathBuf>,
    #[arg(long, env = "CUE_TRACK_CONFIG")]
    config: Option<PathBuf>,
    /// CMUdict-format pronunciation lexicon.
    #[arg(long, env = "CUE_TRACK_LEXICON")]
    lexicon: Option<PathBuf>,
    #[arg(long, env = "CUE_TRACK_FRAME_RATE")]
    frame_rate: Option<u32>,
    /// Timeline length in seconds, overrides the audio duration.
    #[arg(long, env = "CUE_TRACK_DURATION")]
    duration: Option<f64>,
    #[arg(long, env = "CUE_TRACK_OUT")]
    out: Option<PathBuf>,
    #[arg(
        long,
        env = "CUE_TRACK_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Csv
    )]
    output_format: OutputFormat,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TrackConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => TrackConfig::default(),
    };
    if let Some(frame_rate) = args.frame_rate {
        config.frame_rate = frame_rate;
    }
    if let Some(lexicon) = &args.lexicon {
        config.lexicon_path = Some(lexicon.to_string_lossy().to_string());
    }
    let frame_rate = config.frame_rate;

    let track = CueTrackBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to set up cue track: {err}"))?;

    let words = load_transcript(&args.transcript).map_err(|err| {
        format!(
            "Failed to load transcript '{}': {err}",
            args.transcript.display()
        )
    })?;
    let audio = match &args.audio {
        Some(path) => Some(
            load_audio(path)
                .map_err(|err| format!("Failed to load audio '{}': {err}", path.display()))?,
        ),
        None => None,
    };
    if let Some(clip) = &audio {
        tracing::info!(duration_sec = clip.duration_sec(), "audio duration");
    }

    let input = TrackInput {
        words,
        audio,
        total_duration_sec: args.duration,
    };
    let output = track
        .generate(&input)
        .map_err(|err| format!("Failed to generate cue track: {err}"))?;

    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_out_path(&args.transcript, args.output_format));
    match args.output_format {
        OutputFormat::Csv => csv_track_formatter::write_track(&out_path, &output.rows)?,
        OutputFormat::Json => {
            let document = json_track_formatter::TrackDocument {
                schema_version: json_track_formatter::SCHEMA_VERSION,
                meta: json_track_formatter::Meta {
                    generated_at: Utc::now().to_rfc3339(),
                    transcript_path: args.transcript.display().to_string(),
                    audio_path: args.audio.as_ref().map(|p| p.display().to_string()),
                    frame_rate,
                },
                summary: summarize(&output),
                rows: &output.rows,
            };
            json_track_formatter::write_track(&out_path, &document)?
        }
        OutputFormat::TextGrid => {
            text_grid_track_formatter::write_textgrid(&out_path, &output, frame_rate)?
        }
    }

    tracing::info!(
        path = %out_path.display(),
        frames = output.rows.len(),
        "cue track written"
    );
    Ok(())
}

fn default_out_path(transcript: &Path, format: OutputFormat) -> PathBuf {
    let stem = transcript
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("track");
    transcript.with_file_name(format!("{stem}.frames.{}", format.extension()))
}
