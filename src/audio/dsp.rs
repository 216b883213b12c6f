//! Digital signal processing helpers shared by assembly and quality analysis

use std::f32::consts::PI;

/// Scale `signal` so its absolute peak equals `peak`
///
/// Near-silent signals are returned unchanged.
pub fn normalize_audio_peak(signal: &[f32], peak: f32) -> Vec<f32> {
    let max_abs = compute_peak(signal);
    if max_abs < 1e-8 {
        return signal.to_vec();
    }

    let scale = peak / max_abs;
    signal.iter().map(|x| x * scale).collect()
}

/// Linear fade in/out, in place
pub fn apply_fade(signal: &mut [f32], fade_in_samples: usize, fade_out_samples: usize) {
    let len = signal.len();

    let fade_in = fade_in_samples.min(len);
    for i in 0..fade_in {
        signal[i] *= i as f32 / fade_in_samples as f32;
    }

    let fade_out = fade_out_samples.min(len);
    for i in 0..fade_out {
        signal[len - 1 - i] *= i as f32 / fade_out_samples as f32;
    }
}

/// Milliseconds to a sample count
pub fn ms_to_samples(ms: f32, sample_rate: u32) -> usize {
    (ms / 1000.0 * sample_rate as f32).round().max(0.0) as usize
}

pub fn compute_rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    (mean_power(signal)).sqrt()
}

pub fn mean_power(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|x| x * x).sum::<f32>() / signal.len() as f32
}

/// Absolute peak amplitude
pub fn compute_peak(signal: &[f32]) -> f32 {
    signal.iter().map(|x| x.abs()).fold(0.0f32, f32::max)
}

/// Periodic Hann window
pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / size as f32).cos()))
        .collect()
}

/// Overlapping frames of `frame_size` samples advanced by `hop`
///
/// Only full frames are produced.
pub fn frames(signal: &[f32], frame_size: usize, hop: usize) -> impl Iterator<Item = &[f32]> {
    let count = if frame_size == 0 || hop == 0 || signal.len() < frame_size {
        0
    } else {
        (signal.len() - frame_size) / hop + 1
    };
    (0..count).map(move |i| &signal[i * hop..i * hop + frame_size])
}

/// Value at quantile `q` (0..=1) of `values`, nearest-rank on a sorted copy
pub fn percentile(values: &[f32], q: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = (q.clamp(0.0, 1.0) * (sorted.len() - 1) as f32).round() as usize;
    sorted[rank]
}

/// Amplitude ratio in decibels
pub fn amplitude_to_db(ratio: f32) -> f32 {
    20.0 * ratio.log10()
}

/// Power ratio in decibels
pub fn power_to_db(ratio: f32) -> f32 {
    10.0 * ratio.log10()
}
