//! Audio processing module for acento
//!
//! Chunk crossfading and assembly, WAV I/O, resampling and the DSP helpers
//! used by quality analysis.

pub mod assemble;
pub mod crossfade;
pub mod dsp;
mod io;
mod resample;

pub use assemble::{assemble, AssembledAudio, AssemblyOptions, AudioChunk};
pub use crossfade::{crossfade, stitch, CrossfadeAlgorithm};
pub use dsp::{apply_fade, compute_peak, compute_rms, normalize_audio_peak};
pub use io::{load_audio, load_audio_batch, save_audio, AudioData, WavEncoding};
pub use resample::{resample, resample_samples};
