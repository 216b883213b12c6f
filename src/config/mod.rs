//! Configuration management for acento

use crate::audio::CrossfadeAlgorithm;
use crate::prosody::VoiceType;
use crate::text::RegionSelection;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for acento
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-side and chunking settings
    pub synthesis: SynthesisConfig,
    /// Pause durations and breath thresholds
    pub breath: BreathConfig,
    /// Complexity breakpoints and crossfade factors
    pub adaptive: AdaptiveConfig,
    /// Audio crossfade settings
    pub crossfade: CrossfadeConfig,
    /// Audio quality thresholds
    pub quality: QualityConfig,
}

/// Synthesis request defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Iteration steps before complexity scaling
    pub base_steps: usize,
    /// Crossfade length before boundary scaling, seconds
    pub base_crossfade_s: f32,
    /// Maximum characters per synthesis chunk
    pub max_chunk_chars: usize,
    /// Output sample rate
    pub sample_rate: u32,
    /// Region used when the caller does not pick one
    pub region: RegionSelection,
    pub voice: VoiceType,
    /// Apply regional phonetic rewriting
    pub apply_phonetics: bool,
}

/// Pause and breath modelling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathConfig {
    /// Speaking time per character at neutral pace
    pub seconds_per_char: f32,
    /// Elapsed time after which a long pause becomes a breath
    pub soft_threshold_s: f32,
    /// Maximum time between two breaths
    pub hard_threshold_s: f32,
    pub micro_pause_ms: u32,
    pub short_pause_ms: u32,
    pub medium_pause_ms: u32,
    pub long_pause_ms: u32,
    pub paragraph_pause_ms: u32,
    /// Minimum duration of any breath pause
    pub breath_min_ms: u32,
}

/// Complexity scoring and parameter scaling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    pub question_weight: f32,
    pub exclamation_weight: f32,
    /// Added for every sentence beyond the first
    pub sentence_weight: f32,
    /// Added for every `chars_per_unit` characters
    pub length_weight: f32,
    pub chars_per_unit: usize,
    /// Ascending score thresholds paired with step multipliers
    pub breakpoints: Vec<(f32, f32)>,
    /// Multiplier for scores above the last breakpoint
    pub top_multiplier: f32,
    pub min_steps: usize,
    pub max_steps: usize,
    pub mid_utterance_factor: f32,
    pub punctuation_pause_factor: f32,
    /// Upper bound for punctuation-pause crossfades, seconds
    pub max_crossfade_s: f32,
}

/// Crossfade settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossfadeConfig {
    pub algorithm: CrossfadeAlgorithm,
    /// Fade applied to the start and end of assembled audio, milliseconds
    pub edge_fade_ms: f32,
    /// Peak level after normalization
    pub target_peak: f32,
}

/// Quality analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub frame_size: usize,
    pub hop_size: usize,
    /// Frames quieter than this RMS count as silence
    pub silence_rms: f32,
    /// Minimum score for a report to pass
    pub min_score: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            synthesis: SynthesisConfig::default(),
            breath: BreathConfig::default(),
            adaptive: AdaptiveConfig::default(),
            crossfade: CrossfadeConfig::default(),
            quality: QualityConfig::default(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_steps: 32,
            base_crossfade_s: 0.1,
            max_chunk_chars: 200,
            sample_rate: crate::SAMPLE_RATE,
            region: RegionSelection::Auto,
            voice: VoiceType::Female,
            apply_phonetics: true,
        }
    }
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self {
            seconds_per_char: 0.06,
            soft_threshold_s: 8.0,
            hard_threshold_s: 25.0,
            micro_pause_ms: 80,
            short_pause_ms: 250,
            medium_pause_ms: 400,
            long_pause_ms: 650,
            paragraph_pause_ms: 1000,
            breath_min_ms: 300,
        }
    }
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            question_weight: 1.5,
            exclamation_weight: 1.0,
            sentence_weight: 0.5,
            length_weight: 1.0,
            chars_per_unit: 100,
            breakpoints: vec![(1.0, 0.75), (2.5, 1.0), (4.0, 1.25)],
            top_multiplier: 1.5,
            min_steps: 12,
            max_steps: 32,
            mid_utterance_factor: 0.48,
            punctuation_pause_factor: 1.25,
            max_crossfade_s: 1.0,
        }
    }
}

impl Default for CrossfadeConfig {
    fn default() -> Self {
        Self {
            algorithm: CrossfadeAlgorithm::RaisedCosine,
            edge_fade_ms: 5.0,
            // -1 dBFS
            target_peak: 0.89,
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            frame_size: 1024,
            hop_size: 512,
            silence_rms: 0.01,
            min_score: 70,
        }
    }
}

/// Hard upper bound for configured iteration steps
pub const MAX_STEPS_LIMIT: usize = 64;

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load YAML or JSON depending on the file extension
    pub fn load_any<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::load_json(path),
            _ => Self::load(path),
        }
    }

    /// Save configuration to YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create default configuration and save to file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let s = &self.synthesis;
        if s.base_steps == 0 {
            return Err(Error::Config("base_steps must be > 0".into()));
        }
        if s.base_crossfade_s < 0.0 {
            return Err(Error::Config("base_crossfade_s must be >= 0".into()));
        }
        if s.max_chunk_chars == 0 {
            return Err(Error::Config("max_chunk_chars must be > 0".into()));
        }
        if s.sample_rate == 0 {
            return Err(Error::Config("Sample rate must be > 0".into()));
        }

        let b = &self.breath;
        if b.seconds_per_char <= 0.0 {
            return Err(Error::Config("seconds_per_char must be > 0".into()));
        }
        if b.soft_threshold_s <= 0.0 || b.hard_threshold_s <= b.soft_threshold_s {
            return Err(Error::Config(
                "breath thresholds must satisfy 0 < soft < hard".into(),
            ));
        }

        let a = &self.adaptive;
        if a.chars_per_unit == 0 {
            return Err(Error::Config("chars_per_unit must be > 0".into()));
        }
        if a.min_steps == 0 || a.min_steps > a.max_steps {
            return Err(Error::Config("min_steps must be in 1..=max_steps".into()));
        }
        if a.max_steps > MAX_STEPS_LIMIT {
            return Err(Error::Config(format!(
                "max_steps must be <= {}",
                MAX_STEPS_LIMIT
            )));
        }
        if a.breakpoints.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(Error::Config("adaptive breakpoints must be ascending".into()));
        }
        if a.breakpoints.iter().any(|&(_, m)| m <= 0.0) || a.top_multiplier <= 0.0 {
            return Err(Error::Config("step multipliers must be > 0".into()));
        }
        if a.mid_utterance_factor <= 0.0 || a.punctuation_pause_factor <= 0.0 {
            return Err(Error::Config("crossfade factors must be > 0".into()));
        }

        if self.crossfade.target_peak <= 0.0 || self.crossfade.target_peak > 1.0 {
            return Err(Error::Config("target_peak must be in (0, 1]".into()));
        }
        if self.crossfade.edge_fade_ms < 0.0 {
            return Err(Error::Config("edge_fade_ms must be >= 0".into()));
        }

        let q = &self.quality;
        if q.frame_size == 0 || q.hop_size == 0 {
            return Err(Error::Config("frame and hop sizes must be > 0".into()));
        }
        if q.hop_size > q.frame_size {
            log::warn!(
                "hop_size {} exceeds frame_size {}, some samples are never analysed",
                q.hop_size,
                q.frame_size
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::RegionTag;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = std::env::temp_dir().join("acento_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");

        let mut config = Config::default();
        config.synthesis.region = RegionSelection::Fixed(RegionTag::Chilean);
        config.adaptive.max_steps = 48;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.synthesis.region, RegionSelection::Fixed(RegionTag::Chilean));
        assert_eq!(loaded.adaptive.max_steps, 48);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = std::env::temp_dir().join("acento_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("partial.json");
        std::fs::write(&path, r#"{"synthesis": {"max_chunk_chars": 80}}"#).unwrap();

        let loaded = Config::load_any(&path).unwrap();
        assert_eq!(loaded.synthesis.max_chunk_chars, 80);
        assert_eq!(loaded.synthesis.base_steps, 32);
        assert_eq!(loaded.breath.hard_threshold_s, 25.0);
    }

    #[test]
    fn test_plain_region_name_in_yaml() {
        let config: Config = serde_yaml::from_str("synthesis:\n  region: chilean\n").unwrap();
        assert_eq!(config.synthesis.region, RegionSelection::Fixed(RegionTag::Chilean));

        let config: Config = serde_yaml::from_str("synthesis:\n  region: auto\n").unwrap();
        assert_eq!(config.synthesis.region, RegionSelection::Auto);

        assert!(serde_yaml::from_str::<Config>("synthesis:\n  region: klingon\n").is_err());
        assert!(serde_yaml::to_string(&Config::default()).unwrap().contains("region: auto"));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/acento.yaml"),
            Err(Error::FileNotFound(_))
        ));
    }

    #[test]
    fn test_rejects_step_bound_above_limit() {
        let mut config = Config::default();
        config.adaptive.max_steps = 65;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_inverted_breath_thresholds() {
        let mut config = Config::default();
        config.breath.hard_threshold_s = 5.0;
        assert!(config.validate().is_err());
    }
}
