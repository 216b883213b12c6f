//! Assembly of synthesized chunks into one delivered buffer
//!
//! Chunks come back from the acoustic model one per synthesis chunk. They
//! are brought to a common rate, crossfaded according to the boundary after
//! each chunk, post-processed and scored.

use super::crossfade::{stitch, CrossfadeAlgorithm};
use super::dsp::{apply_fade, ms_to_samples, normalize_audio_peak};
use super::resample::resample_samples;
use super::AudioData;
use crate::config::{AdaptiveConfig, Config, QualityConfig};
use crate::pipeline::{AdaptiveParameterSelector, BoundaryKind};
use crate::quality::{AudioQualityAnalyzer, QualityReport};
use crate::{Error, Result};
use rayon::prelude::*;

/// One synthesized chunk
#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Seam after this chunk
    pub boundary: BoundaryKind,
}

impl AudioChunk {
    pub fn new(samples: Vec<f32>, sample_rate: u32, boundary: BoundaryKind) -> Self {
        Self {
            samples,
            sample_rate,
            boundary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    /// Output sample rate
    pub sample_rate: u32,
    pub base_crossfade_s: f32,
    pub algorithm: CrossfadeAlgorithm,
    pub target_peak: f32,
    pub edge_fade_ms: f32,
    pub adaptive: AdaptiveConfig,
    pub quality: QualityConfig,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AssemblyOptions {
    fn from(config: &Config) -> Self {
        Self {
            sample_rate: config.synthesis.sample_rate,
            base_crossfade_s: config.synthesis.base_crossfade_s,
            algorithm: config.crossfade.algorithm,
            target_peak: config.crossfade.target_peak,
            edge_fade_ms: config.crossfade.edge_fade_ms,
            adaptive: config.adaptive.clone(),
            quality: config.quality.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssembledAudio {
    pub audio: AudioData,
    /// Crossfade used at each seam, seconds
    pub crossfades_s: Vec<f32>,
    pub quality: QualityReport,
}

/// Merge `chunks` into a single post-processed, scored buffer
pub fn assemble(chunks: &[AudioChunk], options: &AssemblyOptions) -> Result<AssembledAudio> {
    if chunks.is_empty() {
        return Err(Error::Audio("no chunks to assemble".into()));
    }
    for (i, chunk) in chunks.iter().enumerate() {
        if chunk.sample_rate == 0 {
            return Err(Error::MalformedAudio(format!(
                "chunk {} has a zero sample rate",
                i
            )));
        }
        if chunk.samples.iter().any(|s| !s.is_finite()) {
            return Err(Error::MalformedAudio(format!(
                "chunk {} contains non-finite samples",
                i
            )));
        }
    }

    let sr = options.sample_rate;
    let resampled: Vec<Vec<f32>> = chunks
        .par_iter()
        .map(|chunk| resample_samples(&chunk.samples, chunk.sample_rate, sr))
        .collect::<Result<_>>()?;

    let selector = AdaptiveParameterSelector::new(options.adaptive.clone());
    let crossfades_s: Vec<f32> = chunks
        .iter()
        .take(chunks.len() - 1)
        .map(|chunk| selector.crossfade_for(chunk.boundary, options.base_crossfade_s))
        .collect();

    let merged = stitch(&resampled, &crossfades_s, sr, options.algorithm);
    let mut samples = normalize_audio_peak(&merged, options.target_peak);
    let fade = ms_to_samples(options.edge_fade_ms, sr);
    apply_fade(&mut samples, fade, fade);

    let audio = AudioData::new(samples, sr);
    let quality = AudioQualityAnalyzer::new(options.quality.clone()).analyze_audio(&audio)?;

    log::info!(
        "assembled {} chunks into {:.2} s of audio (quality {} / {})",
        chunks.len(),
        audio.duration(),
        quality.overall_score,
        quality.level
    );

    Ok(AssembledAudio {
        audio,
        crossfades_s,
        quality,
    })
}
