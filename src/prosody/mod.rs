//! Prosody analysis for acento
//!
//! Regional prosodic profiles plus the three analyzers that enrich a
//! processed text: utterance markers, discourse intonation and breath
//! planning.

pub mod breath;
pub mod discourse;
pub mod profile;
pub mod utterance;

pub use breath::{BreathPauseModeler, BreathPlan, Pause, PauseClass};
pub use discourse::{
    DeclinationUnit, DiscourseAnalysis, DiscourseProsodyAnalyzer, DiscourseRole, F0Level,
    IntonationalPhrase, NuclearTone,
};
pub use profile::{
    IntonationQuality, ProsodicProfile, ProsodicProfileStore, StressPattern, VoiceType,
};
pub use utterance::{
    Intensity, MarkerKind, ProsodyMarker, UtteranceAnalysis, UtteranceProsodyAnalyzer,
};
