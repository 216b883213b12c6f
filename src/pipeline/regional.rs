//! Region-aware text processing
//!
//! Normalizes text, detects or assigns its regional variant, applies that
//! region's phonetic rules and attaches profile, slang and prosody markers.

use crate::prosody::{ProsodicProfile, ProsodicProfileStore, ProsodyMarker, UtteranceProsodyAnalyzer};
use crate::text::{
    self, PhoneticRuleEngine, RegionSelection, RegionTag, SlangLexicon, SlangMarker,
    TextNormalizer,
};
use crate::{Error, Result};
use serde::Serialize;

/// Output of one [`RegionalTextProcessor::process`] call
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    original_text: String,
    normalized_text: String,
    phonetic_text: String,
    final_text: String,
    region: RegionTag,
    detection_confidence: f32,
    slang_markers: Vec<SlangMarker>,
    prosodic_markers: Vec<ProsodyMarker>,
    prosodic_profile: &'static ProsodicProfile,
}

impl ProcessingResult {
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    pub fn phonetic_text(&self) -> &str {
        &self.phonetic_text
    }

    /// Text handed to synthesis
    pub fn final_text(&self) -> &str {
        &self.final_text
    }

    pub fn region(&self) -> RegionTag {
        self.region
    }

    /// 1.0 for an explicitly chosen region
    pub fn detection_confidence(&self) -> f32 {
        self.detection_confidence
    }

    /// Slang found in the original text
    pub fn slang_markers(&self) -> &[SlangMarker] {
        &self.slang_markers
    }

    /// Utterance markers over the final text
    pub fn prosodic_markers(&self) -> &[ProsodyMarker] {
        &self.prosodic_markers
    }

    pub fn prosodic_profile(&self) -> &'static ProsodicProfile {
        self.prosodic_profile
    }
}

/// Runs normalization, region assignment and phonetics on one text
#[derive(Debug, Clone, Default)]
pub struct RegionalTextProcessor {
    normalizer: TextNormalizer,
    lexicon: SlangLexicon,
    phonetics: PhoneticRuleEngine,
    profiles: ProsodicProfileStore,
    utterance: UtteranceProsodyAnalyzer,
}

impl RegionalTextProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(
        &self,
        text: &str,
        selection: RegionSelection,
        apply_phonetics: bool,
    ) -> Result<ProcessingResult> {
        if text::is_blank(text) {
            return Err(Error::EmptyInput);
        }

        let (region, detection_confidence) = match selection {
            RegionSelection::Fixed(region) => (region, 1.0),
            RegionSelection::Auto => {
                let detection = self.lexicon.detect_region(text);
                log::debug!(
                    "detected region {} (confidence {:.2}, {} matches)",
                    detection.region,
                    detection.confidence,
                    detection.total_matches
                );
                (detection.region, detection.confidence)
            }
        };

        let normalized_text = self.normalizer.normalize(text);
        let phonetic_text = if apply_phonetics {
            self.phonetics.apply(&normalized_text, region)
        } else {
            normalized_text.clone()
        };
        let final_text = phonetic_text.clone();

        let slang_markers = self.lexicon.find_markers(text, region);
        let prosodic_markers = self.utterance.analyze(&final_text).markers;

        log::debug!(
            "processed text as {}: {} slang markers, {} prosodic markers",
            region,
            slang_markers.len(),
            prosodic_markers.len()
        );

        Ok(ProcessingResult {
            original_text: text.to_string(),
            normalized_text,
            phonetic_text,
            final_text,
            region,
            detection_confidence,
            slang_markers,
            prosodic_markers,
            prosodic_profile: self.profiles.get(region),
        })
    }

    /// Like [`process`](Self::process) with the region given by name
    /// (`"auto"` or a region such as `"chilean"`)
    pub fn process_named(
        &self,
        text: &str,
        region: &str,
        apply_phonetics: bool,
    ) -> Result<ProcessingResult> {
        let selection: RegionSelection = region.parse()?;
        self.process(text, selection, apply_phonetics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prosody::MarkerKind;

    #[test]
    fn test_auto_detects_rioplatense() {
        let result = RegionalTextProcessor::new()
            .process("Che boludo, ¿vos querés tomar unos mates?", RegionSelection::Auto, true)
            .unwrap();
        assert_eq!(result.region(), RegionTag::Rioplatense);
        assert!(result.detection_confidence() > 0.0);
        assert!(!result.slang_markers().is_empty());
        assert_eq!(result.slang_markers()[0].term, "Che");
        assert_eq!(result.prosodic_profile().region, RegionTag::Rioplatense);
    }

    #[test]
    fn test_fixed_region_has_full_confidence() {
        let result = RegionalTextProcessor::new()
            .process("Estamos cansados.", RegionSelection::Fixed(RegionTag::Caribbean), true)
            .unwrap();
        assert_eq!(result.detection_confidence(), 1.0);
        assert_eq!(result.final_text(), "Ehtamoh cansaoh.");
        assert_eq!(result.normalized_text(), "Estamos cansados.");
    }

    #[test]
    fn test_without_phonetics() {
        let result = RegionalTextProcessor::new()
            .process("Estamos cansados.", RegionSelection::Fixed(RegionTag::Caribbean), false)
            .unwrap();
        assert_eq!(result.phonetic_text(), result.normalized_text());
        assert_eq!(result.final_text(), "Estamos cansados.");
    }

    #[test]
    fn test_normalizes_before_phonetics() {
        let result = RegionalTextProcessor::new()
            .process("Tengo 25 euros", RegionSelection::Fixed(RegionTag::Neutral), true)
            .unwrap();
        assert!(result.final_text().contains("veinticinco"));
        assert!(result.final_text().contains("euros"));
        assert_eq!(result.original_text(), "Tengo 25 euros");
    }

    #[test]
    fn test_markers_come_from_final_text() {
        let result = RegionalTextProcessor::new()
            .process("¿Vienes?", RegionSelection::Auto, true)
            .unwrap();
        assert_eq!(result.prosodic_markers().len(), 1);
        assert_eq!(result.prosodic_markers()[0].kind, MarkerKind::QuestionRise);
    }

    #[test]
    fn test_empty_input_rejected() {
        let processor = RegionalTextProcessor::new();
        assert!(matches!(
            processor.process("   \n", RegionSelection::Auto, true),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_unknown_region_rejected_first() {
        let processor = RegionalTextProcessor::new();
        assert!(matches!(
            processor.process_named("Hola", "klingon", true),
            Err(Error::InvalidRegion(_))
        ));
        // Region validation happens before input validation
        assert!(matches!(
            processor.process_named("", "klingon", true),
            Err(Error::InvalidRegion(_))
        ));
    }

    #[test]
    fn test_named_region() {
        let result = RegionalTextProcessor::new()
            .process_named("La lluvia cae", "rioplatense", true)
            .unwrap();
        assert_eq!(result.final_text(), "La shuvia cae");
    }
}
