//! Chunk-boundary blending
//!
//! The tail of one chunk is overlapped with the head of the next and the two
//! are mixed with complementary gain curves.

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

/// Gain curve pair used over the overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossfadeAlgorithm {
    /// sqrt ramps, constant power for uncorrelated signals
    EqualPower,
    /// cos² / sin², constant amplitude with smooth ends
    #[default]
    RaisedCosine,
    Linear,
}

impl CrossfadeAlgorithm {
    /// Fade-out and fade-in gains at position `t` in [0, 1]
    pub fn gains(&self, t: f32) -> (f32, f32) {
        match self {
            CrossfadeAlgorithm::EqualPower => ((1.0 - t).sqrt(), t.sqrt()),
            CrossfadeAlgorithm::RaisedCosine => {
                let angle = t * FRAC_PI_2;
                (angle.cos().powi(2), angle.sin().powi(2))
            }
            CrossfadeAlgorithm::Linear => (1.0 - t, t),
        }
    }
}

impl fmt::Display for CrossfadeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrossfadeAlgorithm::EqualPower => "equal_power",
            CrossfadeAlgorithm::RaisedCosine => "raised_cosine",
            CrossfadeAlgorithm::Linear => "linear",
        };
        f.write_str(name)
    }
}

impl FromStr for CrossfadeAlgorithm {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "equal_power" => Ok(CrossfadeAlgorithm::EqualPower),
            "raised_cosine" | "cosine" => Ok(CrossfadeAlgorithm::RaisedCosine),
            "linear" => Ok(CrossfadeAlgorithm::Linear),
            other => Err(crate::Error::InvalidFormat(format!(
                "unknown crossfade algorithm '{}'",
                other
            ))),
        }
    }
}

/// Number of overlapping samples for a crossfade duration
pub fn overlap_samples(duration_s: f32, sample_rate: u32) -> usize {
    (duration_s.max(0.0) * sample_rate as f32).round() as usize
}

/// Blend `a` into `b` over `duration_s` seconds
///
/// The output holds `a.len() + b.len() - overlap` samples. An overlap longer
/// than either chunk is clamped to the shorter chunk.
pub fn crossfade(
    a: &[f32],
    b: &[f32],
    duration_s: f32,
    sample_rate: u32,
    algorithm: CrossfadeAlgorithm,
) -> Vec<f32> {
    let requested = overlap_samples(duration_s, sample_rate);
    let overlap = requested.min(a.len()).min(b.len());
    if overlap < requested {
        log::warn!(
            "crossfade of {} samples clamped to {} (chunks of {} and {} samples)",
            requested,
            overlap,
            a.len(),
            b.len()
        );
    }

    let head = a.len() - overlap;
    let mut out = Vec::with_capacity(a.len() + b.len() - overlap);
    out.extend_from_slice(&a[..head]);

    let denom = overlap.saturating_sub(1).max(1) as f32;
    for i in 0..overlap {
        let t = if overlap == 1 { 0.5 } else { i as f32 / denom };
        let (fade_out, fade_in) = algorithm.gains(t);
        out.push(a[head + i] * fade_out + b[i] * fade_in);
    }

    out.extend_from_slice(&b[overlap..]);
    out
}

/// Fold a chunk sequence into one buffer
///
/// `durations[i]` is the crossfade between chunk `i` and chunk `i + 1`;
/// missing entries mean a plain concatenation.
pub fn stitch(
    chunks: &[Vec<f32>],
    durations: &[f32],
    sample_rate: u32,
    algorithm: CrossfadeAlgorithm,
) -> Vec<f32> {
    let mut iter = chunks.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    iter.enumerate().fold(first.clone(), |merged, (i, next)| {
        let duration = durations.get(i).copied().unwrap_or(0.0);
        crossfade(&merged, next, duration, sample_rate, algorithm)
    })
}
