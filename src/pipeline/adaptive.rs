//! Complexity-driven synthesis parameters
//!
//! Harder utterances (questions, exclamations, several sentences, long
//! text) get more iteration steps; chunk boundaries get crossfades sized to
//! whether the seam falls inside a word run or on a pause.

use crate::config::AdaptiveConfig;
use crate::prosody::UtteranceProsodyAnalyzer;
use serde::{Deserialize, Serialize};

/// What the audio seam after a chunk falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Speech continues without a pause
    MidUtterance,
    /// The seam coincides with a punctuation pause
    PunctuationPause,
    Unspecified,
}

impl Default for BoundaryKind {
    fn default() -> Self {
        BoundaryKind::Unspecified
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdaptiveParameters {
    pub steps: usize,
    pub crossfade_s: f32,
    pub complexity: f32,
    pub boundary: BoundaryKind,
}

#[derive(Debug, Clone, Default)]
pub struct AdaptiveParameterSelector {
    config: AdaptiveConfig,
    analyzer: UtteranceProsodyAnalyzer,
}

impl AdaptiveParameterSelector {
    pub fn new(config: AdaptiveConfig) -> Self {
        Self {
            config,
            analyzer: UtteranceProsodyAnalyzer::new(),
        }
    }

    /// Weighted complexity score of `text`
    pub fn complexity(&self, text: &str) -> f32 {
        let c = &self.config;
        let analysis = self.analyzer.analyze(text);
        let mut score = 0.0;
        if analysis.has_question() {
            score += c.question_weight;
        }
        if analysis.has_exclamation() {
            score += c.exclamation_weight;
        }
        score += c.sentence_weight * analysis.sentence_count.saturating_sub(1) as f32;
        score += c.length_weight * (text.chars().count() / c.chars_per_unit.max(1)) as f32;
        score
    }

    /// Iteration steps for a complexity score
    pub fn steps_for(&self, complexity: f32, base_steps: usize) -> usize {
        let c = &self.config;
        let multiplier = c
            .breakpoints
            .iter()
            .find(|&&(threshold, _)| complexity < threshold)
            .map_or(c.top_multiplier, |&(_, m)| m);
        let steps = (base_steps as f32 * multiplier).round() as usize;
        steps.clamp(c.min_steps, c.max_steps)
    }

    /// Boundary kind implied by how `text` ends
    pub fn boundary_of(&self, text: &str) -> BoundaryKind {
        match text.trim_end().chars().last() {
            Some(ch) if matches!(ch, ',' | ';' | ':' | '.' | '!' | '?' | '…') => {
                BoundaryKind::PunctuationPause
            }
            Some(ch) if ch.is_alphanumeric() => BoundaryKind::MidUtterance,
            _ => BoundaryKind::Unspecified,
        }
    }

    /// Crossfade length for a boundary
    pub fn crossfade_for(&self, boundary: BoundaryKind, base_crossfade_s: f32) -> f32 {
        let c = &self.config;
        match boundary {
            BoundaryKind::MidUtterance => base_crossfade_s * c.mid_utterance_factor,
            BoundaryKind::PunctuationPause => {
                (base_crossfade_s * c.punctuation_pause_factor).min(c.max_crossfade_s)
            }
            BoundaryKind::Unspecified => base_crossfade_s,
        }
    }

    pub fn select(&self, text: &str, base_steps: usize, base_crossfade_s: f32) -> AdaptiveParameters {
        let complexity = self.complexity(text);
        let boundary = self.boundary_of(text);
        let params = AdaptiveParameters {
            steps: self.steps_for(complexity, base_steps),
            crossfade_s: self.crossfade_for(boundary, base_crossfade_s),
            complexity,
            boundary,
        };
        log::debug!(
            "complexity {:.2} -> {} steps, {:.3} s crossfade ({:?})",
            complexity,
            params.steps,
            params.crossfade_s,
            boundary
        );
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> AdaptiveParameterSelector {
        AdaptiveParameterSelector::new(AdaptiveConfig::default())
    }

    #[test]
    fn test_simple_text_uses_fewer_steps() {
        let params = selector().select("Hola a todos.", 32, 0.1);
        assert_eq!(params.complexity, 0.0);
        assert_eq!(params.steps, 24);
    }

    #[test]
    fn test_question_raises_complexity() {
        let params = selector().select("¿Vienes mañana?", 32, 0.1);
        assert_eq!(params.complexity, 1.5);
        assert_eq!(params.steps, 32);
    }

    #[test]
    fn test_steps_are_clamped() {
        let s = selector();
        assert_eq!(s.steps_for(10.0, 32), 32);
        assert_eq!(s.steps_for(0.0, 8), 12);
    }

    #[test]
    fn test_configurable_upper_bound() {
        let config = AdaptiveConfig {
            max_steps: 64,
            ..AdaptiveConfig::default()
        };
        let s = AdaptiveParameterSelector::new(config);
        let text = "¿De verdad? ¡No lo puedo creer! Esto es increíble. Mañana lo veremos.";
        let params = s.select(text, 32, 0.1);
        assert!(params.complexity >= 4.0);
        assert_eq!(params.steps, 48);
    }

    #[test]
    fn test_length_adds_complexity() {
        let text = "a".repeat(250);
        assert_eq!(selector().complexity(&text), 2.0);
    }

    #[test]
    fn test_zero_chars_per_unit_counts_every_char() {
        let config = AdaptiveConfig {
            chars_per_unit: 0,
            ..AdaptiveConfig::default()
        };
        let s = AdaptiveParameterSelector::new(config);
        assert_eq!(s.complexity("hola"), 4.0);
        assert_eq!(s.select("hola", 32, 0.1).steps, 32);
    }

    #[test]
    fn test_boundary_kinds() {
        let s = selector();
        assert_eq!(s.boundary_of("hasta luego,"), BoundaryKind::PunctuationPause);
        assert_eq!(s.boundary_of("hasta luego "), BoundaryKind::MidUtterance);
        assert_eq!(s.boundary_of("hasta «luego»"), BoundaryKind::Unspecified);
    }

    #[test]
    fn test_crossfade_factors() {
        let s = selector();
        assert!((s.crossfade_for(BoundaryKind::MidUtterance, 0.1) - 0.048).abs() < 1e-6);
        assert!((s.crossfade_for(BoundaryKind::PunctuationPause, 0.1) - 0.125).abs() < 1e-6);
        assert_eq!(s.crossfade_for(BoundaryKind::Unspecified, 0.1), 0.1);
        assert_eq!(s.crossfade_for(BoundaryKind::PunctuationPause, 0.9), 1.0);
    }
}
