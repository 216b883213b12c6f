//! Empirical prosodic profiles per regional variant
//!
//! Static lookups: one immutable profile per region, never computed.

use crate::text::RegionTag;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Lexical stress realisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StressPattern {
    Standard,
    /// Lengthened stressed syllable with a secondary pitch accent
    DoubleAccent,
    Melodic,
    Clear,
}

/// Overall intonation character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntonationQuality {
    Neutral,
    Plaintive,
    Expressive,
    Clear,
}

/// Speaker voice type, selects the F0 range of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    Male,
    Female,
}

impl fmt::Display for VoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceType::Male => f.write_str("male"),
            VoiceType::Female => f.write_str("female"),
        }
    }
}

impl FromStr for VoiceType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(VoiceType::Male),
            "female" | "f" => Ok(VoiceType::Female),
            other => Err(crate::Error::InvalidFormat(format!(
                "voice type must be 'male' or 'female', got '{}'",
                other
            ))),
        }
    }
}

/// Prosodic constants of one regional variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProsodicProfile {
    pub region: RegionTag,
    /// Conversational speaking rate relative to neutral (< 1 is slower)
    pub pace_multiplier: f32,
    /// Speaking rate when reading aloud, relative to neutral
    pub reading_pace_multiplier: f32,
    pub stress_pattern: StressPattern,
    pub intonation_quality: IntonationQuality,
    /// Typical F0 range of female speakers, Hz
    pub f0_range_female: (f32, f32),
    /// Typical F0 range of male speakers, Hz
    pub f0_range_male: (f32, f32),
    pub rhythmic_pattern: &'static str,
    pub emotional_coloring: &'static str,
}

impl ProsodicProfile {
    /// F0 range (low, high) for a voice type
    pub fn f0_range(&self, voice: VoiceType) -> (f32, f32) {
        match voice {
            VoiceType::Male => self.f0_range_male,
            VoiceType::Female => self.f0_range_female,
        }
    }
}

static PROFILES: [ProsodicProfile; RegionTag::COUNT] = [
    ProsodicProfile {
        region: RegionTag::Neutral,
        pace_multiplier: 1.0,
        reading_pace_multiplier: 1.0,
        stress_pattern: StressPattern::Standard,
        intonation_quality: IntonationQuality::Neutral,
        f0_range_female: (165.0, 255.0),
        f0_range_male: (85.0, 155.0),
        rhythmic_pattern: "syllable-timed, even",
        emotional_coloring: "neutral",
    },
    ProsodicProfile {
        region: RegionTag::Rioplatense,
        pace_multiplier: 0.92,
        reading_pace_multiplier: 0.95,
        stress_pattern: StressPattern::DoubleAccent,
        intonation_quality: IntonationQuality::Expressive,
        f0_range_female: (170.0, 290.0),
        f0_range_male: (90.0, 175.0),
        rhythmic_pattern: "lengthened stressed syllables, Italianate contours",
        emotional_coloring: "expressive, emphatic",
    },
    ProsodicProfile {
        region: RegionTag::Colombian,
        pace_multiplier: 0.95,
        reading_pace_multiplier: 0.93,
        stress_pattern: StressPattern::Clear,
        intonation_quality: IntonationQuality::Clear,
        f0_range_female: (160.0, 250.0),
        f0_range_male: (85.0, 150.0),
        rhythmic_pattern: "syllable-timed, careful articulation",
        emotional_coloring: "courteous, formal",
    },
    ProsodicProfile {
        region: RegionTag::Mexican,
        pace_multiplier: 1.0,
        reading_pace_multiplier: 0.97,
        stress_pattern: StressPattern::Melodic,
        intonation_quality: IntonationQuality::Plaintive,
        f0_range_female: (170.0, 270.0),
        f0_range_male: (90.0, 160.0),
        rhythmic_pattern: "strong consonants, reduced unstressed vowels",
        emotional_coloring: "warm, courteous",
    },
    ProsodicProfile {
        region: RegionTag::Chilean,
        pace_multiplier: 1.12,
        reading_pace_multiplier: 1.05,
        stress_pattern: StressPattern::Standard,
        intonation_quality: IntonationQuality::Expressive,
        f0_range_female: (175.0, 280.0),
        f0_range_male: (95.0, 170.0),
        rhythmic_pattern: "fast, clipped codas",
        emotional_coloring: "energetic, informal",
    },
    ProsodicProfile {
        region: RegionTag::Caribbean,
        pace_multiplier: 1.15,
        reading_pace_multiplier: 1.08,
        stress_pattern: StressPattern::Melodic,
        intonation_quality: IntonationQuality::Expressive,
        f0_range_female: (175.0, 300.0),
        f0_range_male: (95.0, 180.0),
        rhythmic_pattern: "fast, aspirated codas",
        emotional_coloring: "vivid, animated",
    },
    ProsodicProfile {
        region: RegionTag::Andean,
        pace_multiplier: 0.85,
        reading_pace_multiplier: 0.88,
        stress_pattern: StressPattern::Clear,
        intonation_quality: IntonationQuality::Plaintive,
        f0_range_female: (160.0, 245.0),
        f0_range_male: (85.0, 145.0),
        rhythmic_pattern: "slow, consonant-preserving",
        emotional_coloring: "calm, polite",
    },
];

/// Read-only access to the per-region profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct ProsodicProfileStore;

impl ProsodicProfileStore {
    pub fn new() -> Self {
        Self
    }

    /// Profile of `region`
    pub fn get(&self, region: RegionTag) -> &'static ProsodicProfile {
        &PROFILES[region.index()]
    }

    /// All profiles in region order
    pub fn all(&self) -> &'static [ProsodicProfile] {
        &PROFILES
    }
}
