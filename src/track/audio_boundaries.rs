const STRICT_MIN_CONSEC_WINDOWS: usize = 3;
const LENIENT_MIN_CONSEC_WINDOWS: usize = 2;
const MIN_THRESHOLD: f32 = 0.001;
/// Leading or trailing quiet shorter than this counts as speech.
const MIN_SILENCE_MS: f64 = 50.0;

/// Seconds of silence before the first and after the last speech window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceBounds {
    pub leading_sec: f64,
    pub trailing_sec: f64,
}

/// Finds leading/trailing silence in a clip, or `None` if nothing is audible.
///
/// The threshold follows the clip's own loudness: a window is speech when its
/// RMS is above `clip_rms^1.5`, i.e. 1.5 times the clip level in dBFS.
pub fn detect_silence_bounds(
    samples: &[f32],
    sample_rate_hz: u32,
    window_ms: f64,
) -> Option<SilenceBounds> {
    let window_rms = compute_window_rms(samples, sample_rate_hz, window_ms)?;
    let threshold = loudness_threshold(samples);

    let onset = first_run_above_threshold(&window_rms, threshold, STRICT_MIN_CONSEC_WINDOWS)
        .or_else(|| first_run_above_threshold(&window_rms, threshold, LENIENT_MIN_CONSEC_WINDOWS))?;
    let offset = last_run_above_threshold(&window_rms, threshold, STRICT_MIN_CONSEC_WINDOWS)
        .or_else(|| last_run_above_threshold(&window_rms, threshold, LENIENT_MIN_CONSEC_WINDOWS))?;
    if offset < onset {
        return None;
    }

    let window_sec = window_ms / 1000.0;
    let duration_sec = samples.len() as f64 / sample_rate_hz as f64;
    let leading_sec = onset as f64 * window_sec;
    let trailing_sec = (duration_sec - (offset + 1) as f64 * window_sec).max(0.0);

    Some(SilenceBounds {
        leading_sec: suppress_short_silence(leading_sec),
        trailing_sec: suppress_short_silence(trailing_sec),
    })
}

fn suppress_short_silence(sec: f64) -> f64 {
    if sec * 1000.0 < MIN_SILENCE_MS {
        0.0
    } else {
        sec
    }
}

fn loudness_threshold(samples: &[f32]) -> f32 {
    let mean_sq =
        samples.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>() / samples.len() as f64;
    let clip_rms = mean_sq.sqrt();
    (clip_rms.powf(1.5) as f32).max(MIN_THRESHOLD)
}

fn first_run_above_threshold(
    window_rms: &[f32],
    threshold: f32,
    min_consec_windows: usize,
) -> Option<usize> {
    let mut run_start = 0usize;
    let mut run_len = 0usize;
    for (idx, rms) in window_rms.iter().copied().enumerate() {
        if rms >= threshold {
            if run_len == 0 {
                run_start = idx;
            }
            run_len += 1;
            if run_len >= min_consec_windows {
                return Some(run_start);
            }
            continue;
        }
        run_len = 0;
    }
    None
}

fn last_run_above_threshold(
    window_rms: &[f32],
    threshold: f32,
    min_consec_windows: usize,
) -> Option<usize> {
    let mut run_end = 0usize;
    let mut run_len = 0usize;
    for (idx, rms) in window_rms.iter().copied().enumerate().rev() {
        if rms >= threshold {
            if run_len == 0 {
                run_end = idx;
            }
            run_len += 1;
            if run_len >= min_consec_windows {
                return Some(run_end);
            }
            continue;
        }
        run_len = 0;
    }
    None
}

fn compute_window_rms(samples: &[f32], sample_rate_hz: u32, window_ms: f64) -> Option<Vec<f32>> {
    if samples.is_empty() || sample_rate_hz == 0 {
        return None;
    }
    let window_len = ((sample_rate_hz as f64 * window_ms) / 1000.0).round() as usize;
    let window_len = window_len.max(1);

    let window_rms: Vec<f32> = samples
        .chunks(window_len)
        .map(|chunk| {
            let mean_sq =
                chunk.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>() / chunk.len() as f64;
            mean_sq.sqrt() as f32
        })
        .collect();
    if window_rms.is_empty() {
        return None;
    }
    Some(window_rms)
}
