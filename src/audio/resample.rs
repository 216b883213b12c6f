//! Sample-rate conversion using rubato

use crate::{Error, Result};
use rubato::{FastFixedIn, PolynomialDegree, Resampler};

use super::AudioData;

/// Input frames handed to the resampler per call
const CHUNK_SIZE: usize = 1024;

/// Convert `samples` from `from_sr` to `to_sr`
pub fn resample_samples(samples: &[f32], from_sr: u32, to_sr: u32) -> Result<Vec<f32>> {
    if from_sr == 0 || to_sr == 0 {
        return Err(Error::MalformedAudio("sample rate must be > 0".into()));
    }
    if from_sr == to_sr || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_sr as f64 / from_sr as f64;
    let mut resampler =
        FastFixedIn::<f32>::new(ratio, 1.0, PolynomialDegree::Cubic, CHUNK_SIZE, 1)
            .map_err(|e| Error::Audio(format!("Failed to create resampler: {}", e)))?;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + CHUNK_SIZE);
    let mut input = vec![vec![0.0f32; CHUNK_SIZE]];

    for chunk in samples.chunks(CHUNK_SIZE) {
        let needed = resampler.input_frames_next();
        input[0].resize(needed, 0.0);
        input[0][..chunk.len()].copy_from_slice(chunk);
        input[0][chunk.len()..].fill(0.0);

        let out = resampler
            .process(&input, None)
            .map_err(|e| Error::Audio(format!("Resampling failed: {}", e)))?;
        output.extend_from_slice(&out[0]);
    }

    let expected = (samples.len() as f64 * ratio).round() as usize;
    output.resize(expected, 0.0);
    log::trace!(
        "resampled {} samples {} Hz -> {} samples {} Hz",
        samples.len(),
        from_sr,
        output.len(),
        to_sr
    );
    Ok(output)
}

/// Resample audio to `target_sr`
pub fn resample(audio: &AudioData, target_sr: u32) -> Result<AudioData> {
    let samples = resample_samples(&audio.samples, audio.sample_rate, target_sr)?;
    Ok(AudioData::new(samples, target_sr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_is_identity() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(resample_samples(&samples, 24000, 24000).unwrap(), samples);
    }

    #[test]
    fn test_output_length_follows_ratio() {
        let samples = vec![0.0f32; 22050];
        let out = resample_samples(&samples, 22050, 24000).unwrap();
        assert_eq!(out.len(), 24000);
    }

    #[test]
    fn test_zero_rate_is_malformed() {
        assert!(matches!(
            resample_samples(&[0.0; 10], 0, 24000),
            Err(Error::MalformedAudio(_))
        ));
    }
}
