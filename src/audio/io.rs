//! WAV input and output

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Mono audio buffer
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    /// Samples in [-1, 1]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioData {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration in seconds, 0 for a zero sample rate
    pub fn duration(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Reject buffers no analysis can run on
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::MalformedAudio("sample rate must be > 0".into()));
        }
        if let Some(i) = self.samples.iter().position(|s| !s.is_finite()) {
            return Err(Error::MalformedAudio(format!(
                "non-finite sample at index {}",
                i
            )));
        }
        Ok(())
    }
}

/// Output encoding for [`save_audio`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavEncoding {
    /// 16-bit integer PCM, samples clamped to [-1, 1]
    #[default]
    Pcm16,
    Float32,
}

/// Load a WAV file as mono
///
/// Multi-channel files are averaged down. When `target_sr` differs from the
/// file's rate the audio is resampled.
pub fn load_audio<P: AsRef<Path>>(path: P, target_sr: Option<u32>) -> Result<AudioData> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let samples = if channels > 1 {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        interleaved
    };

    log::debug!(
        "loaded {} ({} samples, {} Hz, {} ch)",
        path.display(),
        samples.len(),
        spec.sample_rate,
        channels
    );

    let audio = AudioData::new(samples, spec.sample_rate);
    match target_sr {
        Some(target) if target != audio.sample_rate => super::resample::resample(&audio, target),
        _ => Ok(audio),
    }
}

/// Write mono audio to a WAV file
pub fn save_audio<P: AsRef<Path>>(path: P, audio: &AudioData, encoding: WavEncoding) -> Result<()> {
    audio.validate()?;

    let (bits_per_sample, sample_format) = match encoding {
        WavEncoding::Pcm16 => (16, SampleFormat::Int),
        WavEncoding::Float32 => (32, SampleFormat::Float),
    };
    let spec = WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample,
        sample_format,
    };

    let mut writer = WavWriter::create(path, spec)?;
    match encoding {
        WavEncoding::Pcm16 => {
            for &sample in &audio.samples {
                let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
                writer.write_sample(value)?;
            }
        }
        WavEncoding::Float32 => {
            for &sample in &audio.samples {
                writer.write_sample(sample)?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}

/// Load several files in parallel
pub fn load_audio_batch<P: AsRef<Path> + Sync>(
    paths: &[P],
    target_sr: Option<u32>,
) -> Result<Vec<AudioData>> {
    use rayon::prelude::*;

    paths
        .par_iter()
        .map(|p| load_audio(p, target_sr))
        .collect()
}
