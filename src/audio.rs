use std::path::Path;

use claxon::FlacReader;

use crate::error::TrackError;
use crate::types::AudioClip;

/// Decodes a WAV or FLAC file (picked by extension) into a mono clip.
pub fn load_audio(path: &Path) -> Result<AudioClip, TrackError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let clip = match extension.as_deref() {
        Some("wav") | Some("wave") => read_wav_mono(path)?,
        Some("flac") => read_flac_mono(path)?,
        _ => {
            return Err(TrackError::invalid_input(format!(
                "unsupported audio format: {}",
                path.display()
            )))
        }
    };
    tracing::debug!(
        path = %path.display(),
        sample_rate_hz = clip.sample_rate_hz,
        duration_sec = clip.duration_sec(),
        "audio loaded"
    );
    Ok(clip)
}

fn read_wav_mono(path: &Path) -> Result<AudioClip, TrackError> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| TrackError::audio("open WAV", e))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(TrackError::audio("read WAV", "zero channels"));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| TrackError::audio("read WAV samples", e))?,
        hound::SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample as i32);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| TrackError::audio("read WAV samples", e))?
        }
    };

    Ok(AudioClip {
        sample_rate_hz: spec.sample_rate,
        samples: downmix(&interleaved, channels),
    })
}

fn read_flac_mono(path: &Path) -> Result<AudioClip, TrackError> {
    let mut reader = FlacReader::open(path).map_err(|e| TrackError::audio("open FLAC", e))?;
    let streaminfo = reader.streaminfo();
    let channels = streaminfo.channels as usize;
    if channels == 0 {
        return Err(TrackError::audio("read FLAC", "zero channels"));
    }
    let scale = int_scale(streaminfo.bits_per_sample as i32);

    let interleaved: Vec<f32> = reader
        .samples()
        .map(|s| s.map(|v| v as f32 / scale))
        .collect::<Result<_, _>>()
        .map_err(|e| TrackError::audio("read FLAC samples", e))?;

    Ok(AudioClip {
        sample_rate_hz: streaminfo.sample_rate,
        samples: downmix(&interleaved, channels),
    })
}

fn int_scale(bits_per_sample: i32) -> f32 {
    if bits_per_sample > 1 {
        ((1_i64 << (bits_per_sample - 1)) - 1) as f32
    } else {
        1.0
    }
}

fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_channels() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix(&stereo, 2), vec![0.5, 0.5, 0.0]);
        assert_eq!(downmix(&stereo, 1), stereo.to_vec());
    }

    #[test]
    fn wav_round_trip_through_hound() {
        let path = std::env::temp_dir().join("cue_track_audio_load.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
        for i in 0..8_000 {
            let v = if i < 4_000 { 0i16 } else { i16::MAX };
            writer.write_sample(v).expect("write sample");
        }
        writer.finalize().expect("finalize wav");

        let clip = load_audio(&path).expect("load wav");
        assert_eq!(clip.sample_rate_hz, 8_000);
        assert_eq!(clip.samples.len(), 8_000);
        assert!((clip.duration_sec() - 1.0).abs() < 1e-12);
        assert_eq!(clip.samples[0], 0.0);
        assert!((clip.samples[7_999] - 1.0).abs() < 1e-6);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let result = load_audio(Path::new("speech.mp3"));
        assert!(matches!(result, Err(TrackError::InvalidInput { .. })));
    }

    #[test]
    fn missing_file_is_an_audio_error() {
        let result = load_audio(Path::new("/nonexistent/speech.wav"));
        assert!(matches!(result, Err(TrackError::Audio { .. })));
    }
}
