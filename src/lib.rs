//! acento - regional Spanish prosody enhancement for text-to-speech
//!
//! Prepares Spanish text for an external acoustic model and checks the audio
//! that comes back.
//!
//! # Features
//! - Spanish text normalization (numbers, currency, dates, times, abbreviations)
//! - Region detection from slang and regional phonetic rewriting
//! - Utterance, discourse and breath-level prosody analysis
//! - Complexity-driven synthesis parameters and chunking
//! - Chunk crossfading, assembly and objective quality scoring
//!
//! # Example
//! ```no_run
//! use acento::{Config, EnhancementPipeline};
//! use acento::prosody::VoiceType;
//! use acento::text::RegionSelection;
//!
//! let pipeline = EnhancementPipeline::new(Config::default()).unwrap();
//! let enhanced = pipeline
//!     .enhance("Che, ¿vos querés unos mates?", RegionSelection::Auto, VoiceType::Female)
//!     .unwrap();
//! for chunk in &enhanced.chunks {
//!     println!("{} ({} steps)", chunk.text, chunk.parameters.steps);
//! }
//! ```

// Allow traditional for loops - often clearer for audio DSP code
#![allow(clippy::needless_range_loop)]

pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prosody;
pub mod quality;
pub mod text;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{EnhancedText, EnhancementPipeline, ProcessingResult, RegionalTextProcessor};
pub use quality::{AudioQualityAnalyzer, QualityLevel, QualityReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default output sample rate
pub const SAMPLE_RATE: u32 = 24000;
