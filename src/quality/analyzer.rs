//! Objective audio quality scoring
//!
//! Measures noise, clipping, silence, dynamic range and spectral flatness of
//! a synthesized buffer and folds them into a 0-100 score with a verdict
//! and actionable recommendations.

use crate::audio::dsp::{self, amplitude_to_db, power_to_db};
use crate::audio::AudioData;
use crate::config::QualityConfig;
use crate::{Error, Result};
use num_complex::Complex;
use realfft::RealFftPlanner;
use serde::Serialize;
use std::fmt;

/// Verdict derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Unacceptable,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QualityLevel::Excellent => "excellent",
            QualityLevel::Good => "good",
            QualityLevel::Fair => "fair",
            QualityLevel::Poor => "poor",
            QualityLevel::Unacceptable => "unacceptable",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// 0-100
    pub overall_score: u8,
    pub level: QualityLevel,
    pub snr_db: f32,
    /// Fraction of samples at full scale
    pub clipping_rate: f32,
    /// Fraction of silent frames
    pub silence_ratio: f32,
    pub dynamic_range_db: f32,
    /// 0 for a pure tone, close to 1 for white noise
    pub spectral_flatness: f32,
    pub duration_s: f32,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl QualityReport {
    /// Check if quality passes threshold
    pub fn passes(&self, threshold: u8) -> bool {
        self.overall_score >= threshold && self.level != QualityLevel::Unacceptable
    }
}

/// Samples at or above this magnitude count as clipped
const CLIP_LEVEL: f32 = 1.0 - 1e-3;
/// Share of frames used for the signal and noise estimates
const SNR_FRAME_SHARE: f32 = 0.1;
const NOISE_FLOOR: f32 = 1e-10;
const MAX_SNR_DB: f32 = 100.0;
const RMS_FLOOR: f32 = 1e-5;
/// Peak below which a buffer is treated as silent
const SILENT_PEAK: f32 = 1e-6;

const SEVERE_CLIPPING: f32 = 0.01;
const SEVERE_SNR_DB: f32 = 15.0;
const SEVERE_SILENCE: f32 = 0.8;
/// Highest score a report with a severe issue can get
const SEVERE_CAP: u8 = 49;

const WEIGHT_SNR: f32 = 0.30;
const WEIGHT_CLIPPING: f32 = 0.25;
const WEIGHT_SILENCE: f32 = 0.15;
const WEIGHT_DYNAMIC_RANGE: f32 = 0.15;
const WEIGHT_FLATNESS: f32 = 0.15;

#[derive(Debug, Clone, Copy)]
struct Metrics {
    snr_db: f32,
    clipping_rate: f32,
    silence_ratio: f32,
    dynamic_range_db: f32,
    spectral_flatness: f32,
}

#[derive(Debug, Clone, Default)]
pub struct AudioQualityAnalyzer {
    config: QualityConfig,
}

impl AudioQualityAnalyzer {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn analyze_audio(&self, audio: &AudioData) -> Result<QualityReport> {
        self.analyze(&audio.samples, audio.sample_rate)
    }

    pub fn analyze(&self, samples: &[f32], sample_rate: u32) -> Result<QualityReport> {
        let frame_size = self.config.frame_size;
        let hop = self.config.hop_size;

        if frame_size == 0 || hop == 0 {
            return Err(Error::Config("frame and hop sizes must be > 0".into()));
        }
        if sample_rate == 0 {
            return Err(Error::MalformedAudio("sample rate must be > 0".into()));
        }
        if samples.len() < frame_size {
            return Err(Error::MalformedAudio(format!(
                "{} samples is shorter than one {}-sample frame",
                samples.len(),
                frame_size
            )));
        }
        if let Some(i) = samples.iter().position(|s| !s.is_finite()) {
            return Err(Error::MalformedAudio(format!(
                "non-finite sample at index {}",
                i
            )));
        }

        let duration_s = samples.len() as f32 / sample_rate as f32;

        if dsp::compute_peak(samples) < SILENT_PEAK {
            log::debug!("quality analysis: silent buffer of {:.2} s", duration_s);
            return Ok(silent_report(duration_s));
        }

        let rms: Vec<f32> = dsp::frames(samples, frame_size, hop)
            .map(dsp::compute_rms)
            .collect();
        let metrics = Metrics {
            snr_db: estimate_snr(&rms),
            clipping_rate: samples.iter().filter(|s| s.abs() >= CLIP_LEVEL).count() as f32
                / samples.len() as f32,
            silence_ratio: rms.iter().filter(|&&r| r < self.config.silence_rms).count() as f32
                / rms.len() as f32,
            dynamic_range_db: dynamic_range(&rms),
            spectral_flatness: self.spectral_flatness(samples, &rms)?,
        };

        let report = build_report(metrics, duration_s);
        log::debug!(
            "quality analysis: score {} ({}), snr {:.1} dB, clipping {:.4}, silence {:.2}",
            report.overall_score,
            report.level,
            report.snr_db,
            report.clipping_rate,
            report.silence_ratio
        );
        Ok(report)
    }

    /// Mean flatness of the Hann-windowed magnitude spectrum over non-silent frames
    fn spectral_flatness(&self, samples: &[f32], rms: &[f32]) -> Result<f32> {
        let frame_size = self.config.frame_size;
        let window = dsp::hann_window(frame_size);
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame_size);
        let mut input = fft.make_input_vec();
        let mut spectrum: Vec<Complex<f32>> = fft.make_output_vec();

        let mut total = 0.0f32;
        let mut counted = 0usize;

        for (frame, &frame_rms) in dsp::frames(samples, frame_size, self.config.hop_size).zip(rms) {
            if frame_rms < self.config.silence_rms {
                continue;
            }
            for ((dst, &x), &w) in input.iter_mut().zip(frame).zip(&window) {
                *dst = x * w;
            }
            fft.process(&mut input, &mut spectrum)
                .map_err(|e| Error::Audio(format!("FFT failed: {}", e)))?;

            let magnitudes: Vec<f32> = spectrum.iter().map(|c| c.norm() + NOISE_FLOOR).collect();
            let n = magnitudes.len() as f32;
            let arithmetic = magnitudes.iter().sum::<f32>() / n;
            let geometric = (magnitudes.iter().map(|m| m.ln()).sum::<f32>() / n).exp();
            total += geometric / arithmetic;
            counted += 1;
        }

        Ok(if counted == 0 { 0.0 } else { total / counted as f32 })
    }
}

/// Loudest frames against quietest frames, dB
fn estimate_snr(rms: &[f32]) -> f32 {
    let mut powers: Vec<f32> = rms.iter().map(|r| r * r).collect();
    powers.sort_by(|a, b| a.total_cmp(b));
    let k = ((powers.len() as f32 * SNR_FRAME_SHARE) as usize).max(1);

    let noise = (powers[..k].iter().sum::<f32>() / k as f32).max(NOISE_FLOOR);
    let signal = powers[powers.len() - k..].iter().sum::<f32>() / k as f32;
    power_to_db((signal / noise).max(1.0)).min(MAX_SNR_DB)
}

fn dynamic_range(rms: &[f32]) -> f32 {
    let loud = dsp::percentile(rms, 0.95).max(RMS_FLOOR);
    let quiet = dsp::percentile(rms, 0.05).max(RMS_FLOOR);
    amplitude_to_db(loud / quiet)
}

fn level_for(score: u8, severe: usize) -> QualityLevel {
    match score {
        85..=u8::MAX => QualityLevel::Excellent,
        70..=84 => QualityLevel::Good,
        50..=69 => QualityLevel::Fair,
        _ if severe >= 2 => QualityLevel::Unacceptable,
        _ => QualityLevel::Poor,
    }
}

fn build_report(m: Metrics, duration_s: f32) -> QualityReport {
    let snr_score = ((m.snr_db - 10.0) / 30.0).clamp(0.0, 1.0);
    let clipping_score = (1.0 - m.clipping_rate / SEVERE_CLIPPING).clamp(0.0, 1.0);
    let silence_score = if m.silence_ratio <= 0.3 {
        1.0
    } else {
        (1.0 - (m.silence_ratio - 0.3) / 0.5).clamp(0.0, 1.0)
    };
    let dynamic_range_score = ((m.dynamic_range_db - 6.0) / 24.0).clamp(0.0, 1.0);
    let flatness_score = (1.0 - (m.spectral_flatness - 0.3) / 0.5).clamp(0.0, 1.0);

    let weighted = WEIGHT_SNR * snr_score
        + WEIGHT_CLIPPING * clipping_score
        + WEIGHT_SILENCE * silence_score
        + WEIGHT_DYNAMIC_RANGE * dynamic_range_score
        + WEIGHT_FLATNESS * flatness_score;
    let mut score = (weighted * 100.0).round().clamp(0.0, 100.0) as u8;

    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    let mut severe = 0usize;

    if m.clipping_rate > SEVERE_CLIPPING {
        severe += 1;
    }
    if m.snr_db < SEVERE_SNR_DB {
        severe += 1;
    }
    if m.silence_ratio > SEVERE_SILENCE {
        severe += 1;
    }

    if m.clipping_rate > 0.001 {
        issues.push(format!(
            "clipping detected ({:.2}% of samples)",
            m.clipping_rate * 100.0
        ));
        recommendations.push("reduce gain or apply a limiter before export".to_string());
    }
    if m.snr_db < 25.0 {
        issues.push(format!("background noise (SNR {:.1} dB)", m.snr_db));
        recommendations.push("apply noise reduction".to_string());
    }
    if m.silence_ratio > 0.5 {
        issues.push(format!(
            "excessive silence ({:.0}% of frames)",
            m.silence_ratio * 100.0
        ));
        recommendations.push("trim leading and trailing silence".to_string());
    }
    if m.dynamic_range_db < 10.0 {
        issues.push(format!("low dynamic range ({:.1} dB)", m.dynamic_range_db));
        recommendations.push("reduce compression on the output stage".to_string());
    }
    if m.spectral_flatness > 0.5 {
        issues.push(format!(
            "noise-like spectrum (flatness {:.2})",
            m.spectral_flatness
        ));
        recommendations.push("check the vocoder output for hiss or artifacts".to_string());
    }

    if severe > 0 {
        score = score.min(SEVERE_CAP);
    }

    QualityReport {
        overall_score: score,
        level: level_for(score, severe),
        snr_db: m.snr_db,
        clipping_rate: m.clipping_rate,
        silence_ratio: m.silence_ratio,
        dynamic_range_db: m.dynamic_range_db,
        spectral_flatness: m.spectral_flatness,
        duration_s,
        issues,
        recommendations,
    }
}

fn silent_report(duration_s: f32) -> QualityReport {
    QualityReport {
        overall_score: 0,
        // Silent audio and full silence are both severe
        level: level_for(0, 2),
        snr_db: 0.0,
        clipping_rate: 0.0,
        silence_ratio: 1.0,
        dynamic_range_db: 0.0,
        spectral_flatness: 0.0,
        duration_s,
        issues: vec![
            "silent audio".to_string(),
            "excessive silence (100% of frames)".to_string(),
        ],
        recommendations: vec!["check that synthesis produced any output".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::PI;

    const SR: u32 = 24000;

    /// Harmonic bursts separated by short near-silent gaps
    fn speech_like(seconds: f32) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(7);
        let len = (seconds * SR as f32) as usize;
        (0..len)
            .map(|i| {
                let t = i as f32 / SR as f32;
                let noise = rng.gen_range(-0.001f32..0.001);
                if (t % 0.5) < 0.4 {
                    let f0 = 180.0;
                    0.3 * (2.0 * PI * f0 * t).sin()
                        + 0.1 * (2.0 * PI * 2.0 * f0 * t).sin()
                        + 0.05 * (2.0 * PI * 3.0 * f0 * t).sin()
                        + noise
                } else {
                    noise
                }
            })
            .collect()
    }

    fn analyzer() -> AudioQualityAnalyzer {
        AudioQualityAnalyzer::new(QualityConfig::default())
    }

    #[test]
    fn test_clean_audio_scores_well() {
        let report = analyzer().analyze(&speech_like(3.0), SR).unwrap();
        assert!(report.overall_score >= 70, "score {}", report.overall_score);
        assert!(report.level >= QualityLevel::Good);
        assert!(report.snr_db > 25.0);
        assert_eq!(report.clipping_rate, 0.0);
        assert!(report.passes(70));
        assert!((report.duration_s - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_clipped_audio_is_poor() {
        let mut samples = speech_like(10.0);
        let step = 50; // 2% of samples
        for i in (0..samples.len()).step_by(step) {
            samples[i] = 1.0;
        }
        let report = analyzer().analyze(&samples, SR).unwrap();
        assert!(report.clipping_rate > 0.019);
        assert!(report.overall_score <= 49);
        assert!(matches!(
            report.level,
            QualityLevel::Poor | QualityLevel::Unacceptable
        ));
        assert!(report.issues.iter().any(|i| i.contains("clipping")));
    }

    #[test]
    fn test_more_clipping_never_scores_higher() {
        let mut last = u8::MAX;
        for clipping_rate in [0.0, 0.001, 0.005, 0.01, 0.011, 0.02, 0.5] {
            let metrics = Metrics {
                snr_db: 40.0,
                clipping_rate,
                silence_ratio: 0.1,
                dynamic_range_db: 30.0,
                spectral_flatness: 0.1,
            };
            let score = build_report(metrics, 1.0).overall_score;
            assert!(score <= last, "{} scored {}", clipping_rate, score);
            last = score;
        }
        assert!(last <= SEVERE_CAP);
    }

    #[test]
    fn test_white_noise_flags_noise() {
        let mut rng = StdRng::seed_from_u64(11);
        let samples: Vec<f32> = (0..SR as usize * 2).map(|_| rng.gen_range(-0.3f32..0.3)).collect();
        let report = analyzer().analyze(&samples, SR).unwrap();
        assert!(report.level <= QualityLevel::Poor);
        assert!(report.spectral_flatness > 0.5);
        assert!(report.issues.iter().any(|i| i.contains("background noise")));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r == "apply noise reduction"));
    }

    #[test]
    fn test_silent_audio_never_fails() {
        let report = analyzer().analyze(&vec![0.0; SR as usize], SR).unwrap();
        assert_eq!(report.overall_score, 0);
        assert!(report.issues.iter().any(|i| i == "silent audio"));
        assert!(!report.passes(1));
    }

    #[test]
    fn test_malformed_audio() {
        let a = analyzer();
        assert!(matches!(a.analyze(&[0.1; 4096], 0), Err(Error::MalformedAudio(_))));
        assert!(matches!(a.analyze(&[0.1; 100], SR), Err(Error::MalformedAudio(_))));
        let mut samples = vec![0.1f32; 4096];
        samples[10] = f32::INFINITY;
        assert!(matches!(a.analyze(&samples, SR), Err(Error::MalformedAudio(_))));
    }

    #[test]
    fn test_zero_frame_size_is_config_error() {
        let a = AudioQualityAnalyzer::new(QualityConfig {
            frame_size: 0,
            ..QualityConfig::default()
        });
        assert!(matches!(a.analyze(&[0.1; 4096], SR), Err(Error::Config(_))));
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for(85, 0), QualityLevel::Excellent);
        assert_eq!(level_for(84, 0), QualityLevel::Good);
        assert_eq!(level_for(50, 0), QualityLevel::Fair);
        assert_eq!(level_for(49, 1), QualityLevel::Poor);
        assert_eq!(level_for(30, 2), QualityLevel::Unacceptable);
    }
}
